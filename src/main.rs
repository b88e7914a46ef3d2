use std::net::TcpListener;

use clap::Parser;
use tracing::info;

use campaign_tracker::config::Settings;
use campaign_tracker::database::SqliteDatabase;
use campaign_tracker::error::Error;
use campaign_tracker::{startup, telemetry};

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let _ = dotenvy::dotenv();
    let settings = Settings::parse();
    telemetry::init_subscriber(&settings.log_level);

    info!("opening db: {}", settings.database.display());
    let db = SqliteDatabase::connect(&settings.database).await?;

    let address = settings.address();
    info!("listening on: {}", address);
    let listener = TcpListener::bind(&address)?;

    startup::run(listener, db)?.await?;

    Ok(())
}
