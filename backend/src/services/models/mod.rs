//! Public model catalog.
//!
//! - `GET /api/models?q=&specialty=&page=`: paginated search.
//! - `GET /api/models/{id}`: a single profile.

mod get;
mod search;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/models";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(search::process))
        .route("/{id}", get().to(get::process))
}
