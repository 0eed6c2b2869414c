//! # Registration Service Module
//!
//! Public side of the model/brand registration flow.
//!
//! - `POST /api/registrations`: validates the form, stores it as a new
//!   `pending` registration (rejecting an e-mail that is already registered)
//!   and sends a best-effort welcome e-mail.
//! - `GET /api/registrations/status?email=`: current review state of one
//!   registration, as shown on the profile page.

mod status;
mod submit;

pub use submit::submit_registration;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/registrations";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(submit::process))
        .route("/status", get().to(status::process))
}
