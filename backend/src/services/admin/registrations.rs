use crate::auth::guard::AdminSession;
use crate::error::AppError;
use crate::state::AppState;
use crate::validation::validate_registration_update;
use actix_web::{web, HttpResponse};
use common::model::field::FieldValue;
use common::model::record::Record;
use common::model::schema::STATUS;
use common::requests::UpdateRegistrationRequest;
use log::info;
use serde_json::json;

pub(crate) async fn list(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = state.clone();
    let snapshot = web::block(move || store.registrations.snapshot()).await??;
    Ok(HttpResponse::Ok().json(json!({
        "registrations": snapshot.records,
        "version": snapshot.version,
    })))
}

pub(crate) async fn update(
    admin: AdminSession,
    state: web::Data<AppState>,
    payload: web::Json<UpdateRegistrationRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    let errors = validate_registration_update(&request);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let mut patch = Record::new().with(STATUS, FieldValue::text(request.status.as_str()));
    if let Some(verified) = request.verified {
        patch.set("verified", FieldValue::Bool(verified));
    }
    if let Some(featured) = request.featured {
        patch.set("featured", FieldValue::Bool(featured));
    }

    let store = state.clone();
    let email = request.email.trim().to_lowercase();
    let version = request.version.clone();
    // With a version the write only lands if nobody changed the file since
    // the admin's listing was taken.
    let updated = web::block(move || match version {
        Some(version) => store
            .registrations
            .update_versioned(Some(&version), &email, &patch),
        None => store.registrations.update(&email, &patch),
    })
    .await??;
    info!(
        "Admin '{}' set registration {} to {}",
        admin.session.user,
        request.email.trim(),
        request.status
    );

    Ok(HttpResponse::Ok().json(json!({
        "status": "success",
        "message": format!("Registration has been {}.", request.status),
        "registration": updated,
    })))
}
