use crate::auth::credentials::AdminCredentials;
use crate::auth::guard::{session_cookie, AdminSession, DASHBOARD_PATH};
use crate::error::AppError;
use crate::services::redirect;
use crate::state::AppState;
use crate::validation::validate_login;
use actix_web::http::header::LOCATION;
use actix_web::{web, HttpResponse};
use common::requests::LoginRequest;
use log::{info, warn};
use serde_json::json;

pub(crate) async fn page(session: Option<AdminSession>) -> HttpResponse {
    match session {
        Some(_) => redirect(DASHBOARD_PATH),
        None => HttpResponse::Ok().json(json!({ "status": "login_required" })),
    }
}

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let form = payload.into_inner();
    let errors = validate_login(&form);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let path = state.config.credentials_path();
    let credentials = web::block(move || AdminCredentials::load(&path)).await??;
    if !credentials.matches(form.username.trim(), &form.password) {
        warn!("Rejected admin login for '{}'", form.username);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.sessions.create(form.username.trim()).await;
    info!("Admin '{}' logged in", form.username.trim());

    Ok(HttpResponse::SeeOther()
        .insert_header((LOCATION, DASHBOARD_PATH))
        .cookie(session_cookie(
            &token,
            state.sessions.ttl(),
            state.config.cookie_secure,
        ))
        .finish())
}
