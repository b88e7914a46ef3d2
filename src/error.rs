use std::error::Error as StdError;
use std::fmt::Display;
use std::io::Error as IoError;

use actix_web::error::{PathError, UrlencodedError};
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derivative::Derivative;
use serde::{Serialize, Serializer};
use sqlx::Error as DatabaseError;

use crate::campaign::CampaignId;

#[derive(Debug, Serialize, Derivative)]
#[derivative(PartialEq)]
#[serde(untagged)]
pub enum Error {
    // 400
    #[serde(serialize_with = "display")]
    InvalidPath(#[derivative(PartialEq = "ignore")] PathError),
    #[serde(serialize_with = "display")]
    InvalidForm(#[derivative(PartialEq = "ignore")] UrlencodedError),
    MissingFormField {
        field: &'static str,
    },
    InvalidBudget {
        value: String,
    },

    // 404
    PathNotFound,
    CampaignNotFound {
        campaign_id: CampaignId,
    },

    // 500
    CampaignNotCreated(Box<Error>),
    #[serde(serialize_with = "display")]
    FailedDatabaseCall(#[derivative(PartialEq = "ignore")] DatabaseError),
    #[serde(serialize_with = "display")]
    IoError(#[derivative(PartialEq = "ignore")] IoError),
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidPath(_) => "E4001001",
            Error::InvalidForm(_) => "E4001002",
            Error::MissingFormField { .. } => "E4001004",
            Error::InvalidBudget { .. } => "E4001005",
            Error::PathNotFound => "E4041000",
            Error::CampaignNotFound { .. } => "E4041001",
            Error::CampaignNotCreated(_) => "E5001000",
            Error::FailedDatabaseCall(_) => "E5001001",
            Error::IoError(_) => "E5001003",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Error::InvalidPath(_) => "The given path could not be parsed",
            Error::InvalidForm(_) => "The given form could not be parsed",
            Error::MissingFormField { .. } => "The given form is missing a required field",
            Error::InvalidBudget { .. } => "The given budget is not a whole number",
            Error::PathNotFound => "The requested path was not found",
            Error::CampaignNotFound { .. } => "Campaign not found",
            Error::CampaignNotCreated(_) => "Error creating campaign",
            Error::FailedDatabaseCall(_) => {
                "An error occurred when communicating with the database"
            }
            Error::IoError(_) => "An error occurred during an I/O operation",
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidPath(_) => StatusCode::BAD_REQUEST,
            Error::InvalidForm(_) => StatusCode::BAD_REQUEST,
            Error::MissingFormField { .. } => StatusCode::BAD_REQUEST,
            Error::InvalidBudget { .. } => StatusCode::BAD_REQUEST,
            Error::PathNotFound => StatusCode::NOT_FOUND,
            Error::CampaignNotFound { .. } => StatusCode::NOT_FOUND,
            Error::CampaignNotCreated(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::FailedDatabaseCall(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::IoError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error_code = self.error_code(), "{}", self);
        } else {
            tracing::debug!(error_code = self.error_code(), "{}", self);
        }

        // the html pages report these two as plain text
        match self {
            Error::CampaignNotFound { .. } => {
                return HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(self.error_message());
            }
            Error::CampaignNotCreated(_) => {
                return HttpResponse::build(status)
                    .content_type(ContentType::plaintext())
                    .body(format!("{}: {}", self.error_message(), self));
            }
            _ => {}
        }

        #[derive(Serialize)]
        struct Dummy<'a> {
            error_code: &'static str,
            error_message: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            error_meta: Option<&'a Error>,
        }

        // server-side causes stay in the logs
        let error_meta = if status.is_server_error() {
            None
        } else {
            Some(self)
        };

        HttpResponse::build(status).json(&Dummy {
            error_code: self.error_code(),
            error_message: self.error_message(),
            error_meta,
        })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::CampaignNotCreated(err) => Display::fmt(err, f),
            Error::MissingFormField { field } => write!(f, "missing required field '{}'", field),
            Error::InvalidBudget { value } => {
                write!(f, "budget '{}' is not a whole number", value)
            }
            Error::CampaignNotFound { campaign_id } => {
                write!(f, "campaign {} was not found", campaign_id)
            }
            _ => match self.source() {
                Some(source) => write!(f, "{}: {}", self.error_message(), source),
                None => f.write_str(self.error_message()),
            },
        }
    }
}

impl From<DatabaseError> for Error {
    fn from(error: DatabaseError) -> Error {
        Error::FailedDatabaseCall(error)
    }
}

impl From<IoError> for Error {
    fn from(error: IoError) -> Error {
        Error::IoError(error)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::InvalidPath(err) => Some(err),
            Error::InvalidForm(err) => Some(err),
            Error::CampaignNotCreated(err) => Some(err.as_ref()),
            Error::FailedDatabaseCall(err) => Some(err),
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

fn display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use actix_web::body::MessageBody;

    use super::*;

    fn body_text(response: HttpResponse) -> String {
        let bytes = response.into_body().try_into_bytes().unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn campaign_not_found_is_plain_text_404() {
        let error = Error::CampaignNotFound {
            campaign_id: CampaignId(5),
        };

        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response), "Campaign not found");
    }

    #[test]
    fn campaign_not_created_embeds_the_cause() {
        let error = Error::CampaignNotCreated(Box::new(Error::InvalidBudget {
            value: "lots".to_string(),
        }));

        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_text(response),
            "Error creating campaign: budget 'lots' is not a whole number"
        );
    }

    #[test]
    fn database_failures_use_the_json_envelope() {
        let error = Error::FailedDatabaseCall(DatabaseError::PoolClosed);

        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_text(response)).unwrap();
        assert_eq!(body["error_code"], "E5001001");
        assert!(body.get("error_meta").is_none());
    }

    #[test]
    fn client_errors_keep_their_meta() {
        let error = Error::InvalidBudget {
            value: "lots".to_string(),
        };

        let response = error.error_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&body_text(response)).unwrap();
        assert_eq!(body["error_meta"]["value"], "lots");
    }

    #[test]
    fn path_not_found_is_404() {
        let response = Error::PathNotFound.error_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = serde_json::from_str(&body_text(response)).unwrap();
        assert_eq!(body["error_code"], "E4041000");
    }
}
