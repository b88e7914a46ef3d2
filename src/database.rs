use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::campaign::db::{CampaignStore, SqliteCampaignStore};
use crate::error::Error;

pub trait Database: Send + Sync {
    fn campaigns(&self) -> &dyn CampaignStore;
}

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    campaigns: SqliteCampaignStore,
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Opens (creating if needed) the database file at `path` and makes sure
    /// the schema exists.
    #[tracing::instrument]
    pub async fn connect(path: &Path) -> Result<SqliteDatabase, Error> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        SqliteDatabase::initialize(pool).await
    }

    pub async fn initialize(pool: SqlitePool) -> Result<SqliteDatabase, Error> {
        let db = SqliteDatabase {
            campaigns: SqliteCampaignStore::new(pool.clone()),
            pool,
        };

        db.campaigns.ensure_schema().await?;

        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    fn campaigns(&self) -> &dyn CampaignStore {
        &self.campaigns
    }
}
