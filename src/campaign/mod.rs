use std::fmt::{Display, Formatter};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod db;
pub mod endpoints;
pub mod manager;
pub mod views;
pub use endpoints::*;

/// Layout of `created_at` as written by sqlite's `CURRENT_TIMESTAMP`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Status assigned by the store to every new campaign.
pub const ACTIVE_STATUS: &str = "active";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct CampaignId(pub i64);

impl Display for CampaignId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub podcast_name: String,
    pub rss_feed: String,
    pub target_audience: Option<String>,
    pub budget: Option<i64>,
    pub status: String,
    pub clicks: i64,
    pub created_at: NaiveDateTime,
}

impl Campaign {
    /// Synthetic click-through estimate in percent.
    pub fn ctr(&self) -> f64 {
        self.clicks as f64 * 0.1
    }
}

/// The values a caller supplies when creating a campaign; everything else is
/// filled in by the store.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCampaign {
    pub name: String,
    pub podcast_name: String,
    pub rss_feed: String,
    pub target_audience: Option<String>,
    pub budget: Option<i64>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CampaignStats {
    pub active_count: i64,
    pub total_clicks: i64,
}

impl CampaignStats {
    /// Average click-through estimate in percent. The active count floors at
    /// one so an empty store reports 0.0.
    pub fn average_ctr(&self) -> f64 {
        self.total_clicks as f64 / self.active_count.max(1) as f64 * 0.1
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn campaign_with_clicks(clicks: i64) -> Campaign {
        Campaign {
            id: CampaignId(1),
            name: "Summer Promo".to_string(),
            podcast_name: "Tech Talk".to_string(),
            rss_feed: "https://example.com/feed.xml".to_string(),
            target_audience: None,
            budget: None,
            status: ACTIVE_STATUS.to_string(),
            clicks,
            created_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn average_ctr_of_empty_store_is_zero() {
        let stats = CampaignStats {
            active_count: 0,
            total_clicks: 0,
        };

        assert_eq!(stats.average_ctr(), 0.0);
    }

    #[test]
    fn average_ctr_without_active_campaigns_divides_by_one() {
        let stats = CampaignStats {
            active_count: 0,
            total_clicks: 25,
        };

        assert_eq!(format!("{:.1}", stats.average_ctr()), "2.5");
    }

    #[test]
    fn average_ctr_divides_clicks_across_active_campaigns() {
        let stats = CampaignStats {
            active_count: 4,
            total_clicks: 120,
        };

        assert_eq!(format!("{:.1}", stats.average_ctr()), "3.0");
    }

    #[test]
    fn campaign_ctr_scales_clicks() {
        assert_eq!(campaign_with_clicks(0).ctr(), 0.0);
        assert_eq!(format!("{:.1}", campaign_with_clicks(37).ctr()), "3.7");
    }

    #[test]
    fn campaign_id_displays_as_integer() {
        assert_eq!(CampaignId(42).to_string(), "42");
    }
}
