use crate::auth::session::SessionStore;
use crate::catalog::{Catalog, CatalogError};
use crate::config::Config;
use crate::mail::{self, Mailer};
use crate::store::RecordStore;
use common::model::schema::Schema;
use std::sync::Arc;

/// Everything the handlers share, registered once as `web::Data<AppState>`.
pub struct AppState {
    pub config: Config,
    pub registrations: RecordStore,
    pub inquiries: RecordStore,
    pub sessions: SessionStore,
    pub mailer: Arc<dyn Mailer>,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(config: Config, mailer: Arc<dyn Mailer>, catalog: Catalog) -> Self {
        Self {
            registrations: RecordStore::new(config.registrations_path(), Schema::registrations()),
            inquiries: RecordStore::new(config.inquiries_path(), Schema::inquiries()),
            sessions: SessionStore::new(config.session_ttl),
            mailer,
            catalog,
            config,
        }
    }

    /// Production wiring: mailer chosen from the mail settings, catalog read from disk.
    pub fn from_config(config: Config) -> Result<Self, CatalogError> {
        let catalog = Catalog::load(&config.models_path())?;
        let mailer = mail::from_config(&config.mail);
        Ok(Self::new(config, mailer, catalog))
    }
}
