use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use backend::config::Config;
use backend::state::AppState;
use env_logger::Env;
use log::info;
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::load().map_err(io::Error::other)?;
    let host = config.host.clone();
    let port = config.port;

    info!(
        "Storing registrations in {} and inquiries in {}",
        config.registrations_path().display(),
        config.inquiries_path().display()
    );
    let state = web::Data::new(AppState::from_config(config).map_err(io::Error::other)?);

    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(backend::configure_app)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
