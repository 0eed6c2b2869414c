use crate::catalog::CatalogQuery;
use crate::state::AppState;
use actix_web::{web, HttpResponse, Responder};

pub(crate) async fn process(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
) -> impl Responder {
    HttpResponse::Ok().json(state.catalog.search(&query))
}
