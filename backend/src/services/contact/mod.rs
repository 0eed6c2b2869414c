//! Public contact form: `POST /api/contact` stores the message as a new
//! inquiry for the admin inbox.

mod submit;

pub use submit::submit_inquiry;

use actix_web::web::{post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/contact";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(submit::process))
}
