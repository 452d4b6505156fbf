//! Static product catalog and the lookup that picks the final recommendation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

use crate::path::AssessmentPath;

const CATALOG_YAML: &str = include_str!("../data/catalog.yaml");

/// One product card shown on the recommendation screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub features: Vec<String>,
    pub image: String,
    pub estimated_cost: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("catalog entry `{0}` does not name an assessment path")]
    UnknownPath(String),
    #[error("catalog has no entry for `{0}`")]
    MissingPath(AssessmentPath),
}

/// Product lookup keyed by assessment path
#[derive(Debug, Clone)]
pub struct Catalog {
    records: HashMap<AssessmentPath, Recommendation>,
    fallback: Recommendation,
}

impl Catalog {
    /// Load the catalog bundled with the crate.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_yaml(CATALOG_YAML)
    }

    /// Parse a catalog; every assessment path must have an entry.
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, Recommendation> = serde_yaml::from_str(yaml)?;

        let mut records = HashMap::with_capacity(raw.len());
        for (key, record) in raw {
            let path = AssessmentPath::from_key(&key).ok_or(CatalogError::UnknownPath(key))?;
            records.insert(path, record);
        }

        if let Some(missing) = AssessmentPath::ALL
            .into_iter()
            .find(|path| !records.contains_key(path))
        {
            return Err(CatalogError::MissingPath(missing));
        }

        let fallback = records
            .get(&AssessmentPath::FALLBACK)
            .cloned()
            .ok_or(CatalogError::MissingPath(AssessmentPath::FALLBACK))?;

        debug!(entries = records.len(), "catalog loaded");
        Ok(Self { records, fallback })
    }

    pub fn get(&self, path: AssessmentPath) -> &Recommendation {
        self.records.get(&path).unwrap_or(&self.fallback)
    }

    /// Recommendation for a raw (category, subcategory) pair.
    ///
    /// Pairs that do not name a known path get the default life insurance
    /// record; the last screen always has something to show.
    pub fn resolve(&self, category: &str, sub_category: &str) -> &Recommendation {
        match AssessmentPath::parse(category, sub_category) {
            Some(path) => self.get(path),
            None => {
                warn!(%category, %sub_category, "unknown assessment path, using default recommendation");
                &self.fallback
            }
        }
    }
}
