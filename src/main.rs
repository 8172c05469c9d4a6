use std::sync::Mutex;

use actix_web::middleware::NormalizePath;
use actix_web::web::{Data, JsonConfig};
use actix_web::{App, HttpServer, Responder, get};
use dotenvy::dotenv;
use tokio::sync::broadcast::error::RecvError;

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod models;
mod report;
mod routes;
mod state;
mod utils;

use config::Config;
use db::init_db;
use state::AppState;

use crate::docs::ApiDoc;
use tracing::{error, info, warn};
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Attendance admin is running"
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let (data, persistence) = init_db(config.data_file.as_deref()).map_err(|e| {
        error!(error = ?e, "Failed to load attendance data");
        std::io::Error::other(format!("{:#}", e))
    })?;
    let app_state = AppState::new(data, persistence, config.max_attachment_bytes);

    let mut events = app_state.subscribe();
    actix_web::rt::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => info!(?event, "Attendance data changed"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "State change log fell behind")
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let state = Data::new(Mutex::new(app_state));
    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(state.clone())
            .app_data(JsonConfig::default().limit(config_data.max_json_bytes))
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await
}
