use crate::auth::guard::AdminSession;
use crate::error::AppError;
use crate::state::AppState;
use actix_web::{web, HttpResponse};
use serde_json::json;

pub(crate) async fn process(
    admin: AdminSession,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let store = state.clone();
    let (registrations, inquiries) = web::block(move || {
        Ok::<_, crate::error::StoreError>((
            store.registrations.list()?.len(),
            store.inquiries.list()?.len(),
        ))
    })
    .await??;

    Ok(HttpResponse::Ok().json(json!({
        "user": admin.session.user,
        "registrations": registrations,
        "inquiries": inquiries,
    })))
}
