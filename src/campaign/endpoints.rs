use actix_web::http::header::{self, ContentType};
use actix_web::web::{Data, Form, Json, Path};
use actix_web::{get, post, HttpResponse};
use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::database::Database;
use crate::error::Error;

use super::{manager, views, Campaign, CampaignId, NewCampaign, TIMESTAMP_FORMAT};

/// Fields posted by the create form. Everything is optional at this layer so
/// a missing field reaches the create error path instead of the extractor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateCampaignForm {
    pub name: Option<String>,
    pub podcast_name: Option<String>,
    pub rss_feed: Option<String>,
    pub target_audience: Option<String>,
    pub budget: Option<String>,
}

impl CreateCampaignForm {
    pub fn into_new_campaign(self) -> Result<NewCampaign, Error> {
        Ok(NewCampaign {
            name: required("name", self.name)?,
            podcast_name: required("podcast_name", self.podcast_name)?,
            rss_feed: required("rss_feed", self.rss_feed)?,
            target_audience: self.target_audience,
            budget: parse_budget(self.budget)?,
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, Error> {
    value.ok_or(Error::MissingFormField { field })
}

/// Reads the budget the way an sqlite `INTEGER` column would: surrounding
/// whitespace is ignored and any numeric literal with a whole value is kept.
fn parse_budget(budget: Option<String>) -> Result<Option<i64>, Error> {
    let value = match budget.as_deref() {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    let trimmed = value.trim_matches(|c: char| c.is_ascii_whitespace());
    if let Ok(budget) = trimmed.parse::<i64>() {
        return Ok(Some(budget));
    }

    // 2^63, the first float past i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    match trimmed.parse::<f64>() {
        Ok(budget)
            if budget.is_finite() && budget.fract() == 0.0 && (-LIMIT..LIMIT).contains(&budget) =>
        {
            Ok(Some(budget as i64))
        }
        _ => Err(Error::InvalidBudget {
            value: value.to_string(),
        }),
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignBody {
    pub id: CampaignId,
    pub name: String,
    pub podcast_name: String,
    pub rss_feed: String,
    pub target_audience: Option<String>,
    pub budget: Option<i64>,
    pub status: String,
    pub clicks: i64,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

impl CampaignBody {
    pub fn render(campaign: Campaign) -> CampaignBody {
        CampaignBody {
            id: campaign.id,
            name: campaign.name,
            podcast_name: campaign.podcast_name,
            rss_feed: campaign.rss_feed,
            target_audience: campaign.target_audience,
            budget: campaign.budget,
            status: campaign.status,
            clicks: campaign.clicks,
            created_at: campaign.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CampaignsBody {
    pub success: bool,
    pub campaigns: Vec<CampaignBody>,
}

mod timestamp {
    use super::*;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page)
}

#[get("/")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns_page(db: Data<Box<dyn Database>>) -> Result<HttpResponse, Error> {
    let stats = manager::get_campaign_stats(&***db).await?;
    let campaigns = manager::get_campaigns(&***db).await?;

    Ok(html(views::render_campaigns_page(&stats, &campaigns)))
}

#[post("/create_campaign")]
#[tracing::instrument(skip(db))]
pub async fn create_campaign(
    db: Data<Box<dyn Database>>,
    form: Form<CreateCampaignForm>,
) -> Result<HttpResponse, Error> {
    let form = form.into_inner();

    let campaign_id = insert_from_form(&***db, form)
        .await
        .map_err(|err| Error::CampaignNotCreated(Box::new(err)))?;
    tracing::info!(%campaign_id, "created campaign");

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish())
}

async fn insert_from_form(db: &dyn Database, form: CreateCampaignForm) -> Result<CampaignId, Error> {
    let campaign = form.into_new_campaign()?;

    manager::create_campaign(db, campaign).await
}

#[get("/api/campaigns")]
#[tracing::instrument(skip(db))]
pub async fn get_campaigns(db: Data<Box<dyn Database>>) -> Result<Json<CampaignsBody>, Error> {
    let campaigns = manager::get_campaigns(&***db).await?;

    let body = CampaignsBody {
        success: true,
        campaigns: campaigns.into_iter().map(CampaignBody::render).collect(),
    };

    Ok(Json(body))
}

#[get("/campaign/{campaign_id}")]
#[tracing::instrument(skip(db))]
pub async fn get_campaign_page(
    db: Data<Box<dyn Database>>,
    params: Path<CampaignId>,
) -> Result<HttpResponse, Error> {
    let campaign_id = params.into_inner();

    let campaign = manager::get_campaign_by_id(&***db, campaign_id).await?;

    Ok(html(views::render_campaign_page(&campaign)))
}
