use crate::database::Database;
use crate::error::Error;

use super::{Campaign, CampaignId, CampaignStats, NewCampaign};

#[tracing::instrument(skip(db))]
pub async fn create_campaign(db: &dyn Database, campaign: NewCampaign) -> Result<CampaignId, Error> {
    let campaign_id = db.campaigns().insert_campaign(&campaign).await?;

    Ok(campaign_id)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: &dyn Database) -> Result<Vec<Campaign>, Error> {
    let campaigns = db.campaigns().fetch_campaigns().await?;

    Ok(campaigns)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_by_id(
    db: &dyn Database,
    campaign_id: CampaignId,
) -> Result<Campaign, Error> {
    let campaign = db
        .campaigns()
        .fetch_campaign_by_id(campaign_id)
        .await?
        .ok_or(Error::CampaignNotFound { campaign_id })?;

    Ok(campaign)
}

#[tracing::instrument(skip(db))]
pub async fn get_campaign_stats(db: &dyn Database) -> Result<CampaignStats, Error> {
    let stats = db.campaigns().fetch_campaign_stats().await?;

    Ok(stats)
}
