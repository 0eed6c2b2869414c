use common::model::profile::ModelProfile;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const ITEMS_PER_PAGE: usize = 8;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read model catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model catalog: {0}")]
    Json(#[from] serde_json::Error),
}

/// Search parameters of the discover page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    /// `all` (or nothing) disables the filter.
    pub specialty: Option<String>,
    /// 1-based.
    pub page: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub items: Vec<ModelProfile>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Public model profiles, loaded once at start-up.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    profiles: Vec<ModelProfile>,
}

impl Catalog {
    pub fn new(profiles: Vec<ModelProfile>) -> Self {
        Self { profiles }
    }

    /// Loads the catalog; a missing file yields an empty catalog.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        match fs::read_to_string(path) {
            Ok(data) => Ok(Self::new(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found, starting with an empty catalog", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ModelProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn search(&self, query: &CatalogQuery) -> CatalogPage {
        let term = query
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());
        let specialty = query
            .specialty
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"));

        let matches: Vec<&ModelProfile> = self
            .profiles
            .iter()
            .filter(|p| {
                specialty.map_or(true, |wanted| {
                    p.specialties.iter().any(|s| s.eq_ignore_ascii_case(wanted))
                })
            })
            .filter(|p| term.as_deref().map_or(true, |t| matches_term(p, t)))
            .collect();

        let total = matches.len();
        let total_pages = total.div_ceil(ITEMS_PER_PAGE);
        let page = query.page.unwrap_or(1).max(1);
        let items = matches
            .into_iter()
            .skip(page.saturating_sub(1).saturating_mul(ITEMS_PER_PAGE))
            .take(ITEMS_PER_PAGE)
            .cloned()
            .collect();

        CatalogPage {
            items,
            page,
            total_pages,
            total,
        }
    }
}

fn matches_term(profile: &ModelProfile, term: &str) -> bool {
    profile.name.to_lowercase().contains(term)
        || profile.location.to_lowercase().contains(term)
        || profile
            .specialties
            .iter()
            .any(|s| s.to_lowercase().contains(term))
}
