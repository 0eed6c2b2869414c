use crate::auth::guard::AdminSession;
use crate::error::{AppError, StoreError};
use crate::mail::templates;
use crate::services::success;
use crate::state::AppState;
use crate::validation::validate_reply;
use actix_web::{web, HttpResponse};
use common::model::field::FieldValue;
use common::model::record::Record;
use common::model::schema::STATUS;
use common::requests::ReplyInquiryRequest;
use log::info;

const REPLIED: &str = "replied";

pub(crate) async fn list(
    _admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = state.clone();
    let records = web::block(move || store.inquiries.list()).await??;
    Ok(HttpResponse::Ok().json(records))
}

/// Sends the reply first and only then marks the inquiry as replied, so a
/// failed delivery leaves the inquiry open.
pub(crate) async fn reply(
    admin: AdminSession,
    state: web::Data<AppState>,
    payload: web::Json<ReplyInquiryRequest>,
) -> Result<HttpResponse, AppError> {
    let request = payload.into_inner();
    let errors = validate_reply(&request);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let id = request.id.trim().to_string();

    let store = state.clone();
    let key = id.clone();
    let inquiry = web::block(move || store.inquiries.find(&key))
        .await??
        .ok_or_else(|| StoreError::NotFound { key: id.clone() })?;

    let message = templates::admin_reply(
        &state.config.mail.from,
        inquiry.text("email").unwrap_or_default(),
        inquiry.text("subject").unwrap_or_default(),
        request.message.trim(),
    );
    state.mailer.send(&message).await?;

    let store = state.clone();
    let key = id.clone();
    let patch = Record::new().with(STATUS, FieldValue::text(REPLIED));
    web::block(move || store.inquiries.update(&key, &patch)).await??;
    info!("Admin '{}' replied to inquiry {}", admin.session.user, id);

    Ok(HttpResponse::Ok().json(success("Your reply has been sent.")))
}
