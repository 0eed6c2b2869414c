use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(state: web::Data<AppState>, id: web::Path<String>) -> impl Responder {
    match state.catalog.get(&id) {
        Some(profile) => HttpResponse::Ok().json(profile),
        None => HttpResponse::NotFound().body("Model not found"),
    }
}
