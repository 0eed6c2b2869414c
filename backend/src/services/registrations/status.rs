use crate::error::{AppError, StoreError};
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use common::model::schema::STATUS;
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct StatusQuery {
    email: String,
}

#[derive(Serialize)]
struct RegistrationStatus {
    email: String,
    status: String,
    verified: bool,
    featured: bool,
}

pub(crate) async fn process(
    state: web::Data<AppState>,
    query: web::Query<StatusQuery>,
) -> Result<HttpResponse, AppError> {
    let email = query.into_inner().email.trim().to_lowercase();

    let store = state.clone();
    let key = email.clone();
    let record = web::block(move || store.registrations.find(&key))
        .await??
        .ok_or_else(|| StoreError::NotFound { key: email.clone() })?;

    Ok(HttpResponse::Ok().json(RegistrationStatus {
        status: record.text(STATUS).unwrap_or_default().to_string(),
        verified: record.flag("verified").unwrap_or(false),
        featured: record.flag("featured").unwrap_or(false),
        email,
    }))
}
