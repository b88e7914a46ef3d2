use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::SqlitePool;

use crate::error::Error;

use super::{Campaign, CampaignId, CampaignStats, NewCampaign};

const CREATE_CAMPAIGNS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS campaigns (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        podcast_name TEXT NOT NULL,
        rss_feed TEXT NOT NULL,
        target_audience TEXT,
        budget INTEGER,
        status TEXT DEFAULT 'active',
        clicks INTEGER DEFAULT 0,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

macro_rules! select_campaigns {
    ($($clause:literal),*) => {
        concat!(
            "SELECT id, name, podcast_name, rss_feed, target_audience, budget, status, clicks, created_at \
             FROM campaigns",
            $(" ", $clause),*
        )
    };
}

// created_at only has second precision, so id settles ties
const SELECT_CAMPAIGNS_NEWEST_FIRST: &str = select_campaigns!("ORDER BY created_at DESC, id DESC");
const SELECT_CAMPAIGN_BY_ID: &str = select_campaigns!("WHERE id = ?");

#[async_trait]
pub trait CampaignStore: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), Error>;

    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<CampaignId, Error>;

    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error>;

    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error>;

    async fn fetch_campaign_stats(&self) -> Result<CampaignStats, Error>;
}

#[derive(Debug, Clone)]
pub struct SqliteCampaignStore {
    pool: SqlitePool,
}

impl SqliteCampaignStore {
    pub fn new(pool: SqlitePool) -> SqliteCampaignStore {
        SqliteCampaignStore { pool }
    }
}

#[async_trait]
impl CampaignStore for SqliteCampaignStore {
    #[tracing::instrument(skip(self))]
    async fn ensure_schema(&self) -> Result<(), Error> {
        sqlx::query(CREATE_CAMPAIGNS_TABLE)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn insert_campaign(&self, campaign: &NewCampaign) -> Result<CampaignId, Error> {
        let result = sqlx::query(
            "INSERT INTO campaigns (name, podcast_name, rss_feed, target_audience, budget) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(campaign.name.as_str())
        .bind(campaign.podcast_name.as_str())
        .bind(campaign.rss_feed.as_str())
        .bind(campaign.target_audience.as_deref())
        .bind(campaign.budget)
        .execute(&self.pool)
        .await?;

        Ok(CampaignId(result.last_insert_rowid()))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaigns(&self) -> Result<Vec<Campaign>, Error> {
        let campaigns: Vec<Campaign> = sqlx::query_as::<_, Campaign>(SELECT_CAMPAIGNS_NEWEST_FIRST)
            .fetch(&self.pool)
            .try_collect()
            .await?;

        Ok(campaigns)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_by_id(
        &self,
        campaign_id: CampaignId,
    ) -> Result<Option<Campaign>, Error> {
        let campaign: Option<Campaign> = sqlx::query_as::<_, Campaign>(SELECT_CAMPAIGN_BY_ID)
            .bind(campaign_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(campaign)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_campaign_stats(&self) -> Result<CampaignStats, Error> {
        let (active_count, total_clicks): (i64, i64) = sqlx::query_as(
            "SELECT \
                (SELECT COUNT(*) FROM campaigns WHERE status = 'active'), \
                (SELECT COALESCE(SUM(clicks), 0) FROM campaigns)",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CampaignStats {
            active_count,
            total_clicks,
        })
    }
}
