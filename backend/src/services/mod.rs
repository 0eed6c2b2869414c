//! HTTP endpoints, one sub-module per area. Each area exposes a
//! `configure_routes` function returning its actix `Scope`.

pub mod admin;
pub mod contact;
pub mod models;
pub mod registrations;

use actix_web::HttpResponse;
use serde_json::json;

/// Standard body for a successful form action.
pub(crate) fn success(message: impl Into<String>) -> serde_json::Value {
    json!({ "status": "success", "message": message.into() })
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, location))
        .finish()
}
