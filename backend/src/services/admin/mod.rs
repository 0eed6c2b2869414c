//! # Admin Service Module
//!
//! Login/logout and the guarded admin API. Every handler here except the
//! login ones takes an [`AdminSession`](crate::auth::guard::AdminSession),
//! so requests without a live session are redirected to `/admin/login`.
//!
//! ## Registered Routes
//!
//! *   **`GET /admin/login`**: redirects to the dashboard when already logged in.
//! *   **`POST /admin/login`**: checks the credentials file and issues the session cookie.
//! *   **`POST /admin/logout`**: revokes the session and clears the cookie.
//! *   **`GET /admin/dashboard`**: logged-in user and record counts.
//! *   **`GET /api/admin/registrations`**: every stored registration.
//! *   **`POST /api/admin/registrations/update`**: changes status/flags of one
//!     registration; `404` when the e-mail is unknown, the file is left as is.
//! *   **`GET /api/admin/inquiries`**: every stored inquiry.
//! *   **`POST /api/admin/inquiries/reply`**: e-mails a reply and marks the
//!     inquiry `replied`. A failed e-mail is reported and nothing is written.

mod dashboard;
mod inquiries;
mod login;
mod logout;
mod registrations;

use actix_web::web::{get, post, resource, scope};
use actix_web::Scope;

const ADMIN_PATH: &str = "/admin";
const API_PATH: &str = "/api/admin";

pub fn configure_routes() -> Scope {
    scope(ADMIN_PATH)
        .service(
            resource("/login")
                .route(get().to(login::page))
                .route(post().to(login::process)),
        )
        .route("/logout", post().to(logout::process))
        .route("/dashboard", get().to(dashboard::process))
}

pub fn configure_api_routes() -> Scope {
    scope(API_PATH)
        .route("/registrations", get().to(registrations::list))
        .route("/registrations/update", post().to(registrations::update))
        .route("/inquiries", get().to(inquiries::list))
        .route("/inquiries/reply", post().to(inquiries::reply))
}
