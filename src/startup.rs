use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::web::{self, Data, FormConfig, PathConfig, ServiceConfig};
use actix_web::{App, HttpResponse, HttpServer, ResponseError};
use tracing_actix_web::TracingLogger;

use crate::campaign;
use crate::database::{Database, SqliteDatabase};
use crate::error::Error;

/// Registers extractor error handlers and every route.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(PathConfig::default().error_handler(|err, _req| {
        // format path errors with custom format
        Error::InvalidPath(err).into()
    }))
    .app_data(FormConfig::default().error_handler(|err, _req| {
        // the only form is the create form, so undecodable bodies fail the create
        Error::CampaignNotCreated(Box::new(Error::InvalidForm(err))).into()
    }))
    .service(campaign::endpoints::get_campaigns_page)
    .service(campaign::endpoints::create_campaign)
    .service(campaign::endpoints::get_campaigns)
    .service(campaign::endpoints::get_campaign_page)
    .route("/health_check", web::get().to(health_check));
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

pub async fn path_not_found() -> HttpResponse {
    Error::PathNotFound.error_response()
}

pub fn run(listener: TcpListener, db: SqliteDatabase) -> Result<Server, Error> {
    let db = Data::new(Box::new(db) as Box<dyn Database>);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(db.clone())
            .wrap(TracingLogger::default())
            .configure(configure)
            .default_service(web::to(path_not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
