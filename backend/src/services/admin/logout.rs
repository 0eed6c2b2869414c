use crate::auth::guard::{removal_cookie, AdminSession, LOGIN_PATH};
use crate::state::AppState;
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use log::info;

pub(crate) async fn process(
    state: web::Data<AppState>,
    session: Option<AdminSession>,
) -> HttpResponse {
    if let Some(admin) = session {
        state.sessions.revoke(&admin.token).await;
        info!("Admin '{}' logged out", admin.session.user);
    }

    HttpResponse::SeeOther()
        .insert_header((LOCATION, LOGIN_PATH))
        .cookie(removal_cookie())
        .finish()
}
