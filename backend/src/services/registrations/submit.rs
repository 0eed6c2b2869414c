use crate::error::AppError;
use crate::mail::templates;
use crate::services::success;
use crate::state::AppState;
use crate::store::submission::stamp;
use crate::validation::validate_registration;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::record::Record;
use common::requests::RegistrationForm;
use log::{info, warn};
use serde_json::Value;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<RegistrationForm>,
) -> Result<HttpResponse, AppError> {
    submit_registration(&state, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(success(
        "Registration submitted successfully! We will review your profile shortly.",
    )))
}

/// Validates and stores a registration, then sends the welcome e-mail.
///
/// A failed welcome e-mail is logged and otherwise ignored: the registration
/// is already stored at that point.
pub async fn submit_registration(
    state: &web::Data<AppState>,
    mut form: RegistrationForm,
) -> Result<Record, AppError> {
    form.email = form.email.trim().to_lowercase();

    let errors = validate_registration(&form);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let schema = state.registrations.schema();
    let record = schema
        .coerce(&form_fields(&form)?)
        .map_err(AppError::Validation)?;
    let record = stamp(record, schema, Utc::now());

    let store = state.clone();
    let stored = record.clone();
    web::block(move || store.registrations.insert_unique(&stored)).await??;
    info!("New registration from {}", form.email);

    let welcome = templates::welcome(&state.config.mail.from, &form.email, &form.full_name);
    if let Err(e) = state.mailer.send(&welcome).await {
        warn!("Failed to send welcome e-mail to {}: {}", form.email, e);
    }

    Ok(record)
}

/// The form's stored columns, trimmed; `terms` is only checked, never persisted.
fn form_fields(form: &RegistrationForm) -> Result<serde_json::Map<String, Value>, AppError> {
    match serde_json::to_value(form).map_err(|e| AppError::Internal(e.to_string()))? {
        Value::Object(mut fields) => {
            fields.remove("terms");
            for value in fields.values_mut() {
                trim_text(value);
            }
            Ok(fields)
        }
        _ => Err(AppError::Internal("registration form is not an object".to_string())),
    }
}

fn trim_text(value: &mut Value) {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() != s.len() {
                *s = trimmed.to_string();
            }
        }
        Value::Array(items) => items.iter_mut().for_each(trim_text),
        _ => {}
    }
}
