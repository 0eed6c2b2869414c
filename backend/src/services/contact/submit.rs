use crate::error::AppError;
use crate::services::success;
use crate::state::AppState;
use crate::store::submission::stamp;
use crate::validation::validate_contact;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::field::FieldValue;
use common::model::record::Record;
use common::requests::ContactForm;
use log::info;
use uuid::Uuid;

pub(crate) async fn process(
    state: web::Data<AppState>,
    payload: web::Json<ContactForm>,
) -> Result<HttpResponse, AppError> {
    submit_inquiry(&state, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(success(
        "Thank you for contacting us. We will get back to you shortly.",
    )))
}

/// Stores a contact message under a fresh id.
///
/// Inquiries never collide on their key, so a plain append is enough.
pub async fn submit_inquiry(
    state: &web::Data<AppState>,
    form: ContactForm,
) -> Result<Record, AppError> {
    let errors = validate_contact(&form);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let id = Uuid::new_v4().to_string();
    let record = Record::new()
        .with("id", FieldValue::text(id.as_str()))
        .with("name", FieldValue::text(form.name.trim()))
        .with("email", FieldValue::text(form.email.trim()))
        .with("subject", FieldValue::text(form.subject.trim()))
        .with("message", FieldValue::text(form.message.trim()));
    let record = stamp(record, state.inquiries.schema(), Utc::now());

    let store = state.clone();
    let stored = record.clone();
    web::block(move || store.inquiries.append(&stored)).await??;
    info!("New inquiry {} from {}", id, form.email.trim());

    Ok(record)
}
