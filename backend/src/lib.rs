pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod mail;
pub mod services;
pub mod state;
pub mod store;
pub mod validation;

use actix_web::web;

/// JSON request bodies are small forms; anything larger is rejected.
pub const JSON_LIMIT: usize = 256 * 1024;

/// Registers every route of the application.
pub fn configure_app(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(JSON_LIMIT))
        .service(services::models::configure_routes())
        .service(services::registrations::configure_routes())
        .service(services::contact::configure_routes())
        .service(services::admin::configure_routes())
        .service(services::admin::configure_api_routes());
}
