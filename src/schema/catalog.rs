/// Catalogs — template sets plus their vocabularies, stored as RON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::vocabulary::VocabularySet;

const TRAVEL_BUZZ_RON: &str = include_str!("../../catalog_data/travel_buzz.ron");
const BUZZ_RESPONSES_RON: &str = include_str!("../../catalog_data/buzz_responses.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// A set of raw template strings and the vocabulary their slots draw from.
///
/// Templates are kept unparsed here; the generator parses and validates them
/// when it is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub templates: Vec<String>,
    #[serde(default)]
    pub slots: VocabularySet,
}

impl Catalog {
    /// Multi-slot travel sentences over `action`, `destination` and `adjective`.
    pub fn travel_buzz() -> Result<Catalog, CatalogError> {
        Self::parse_ron(TRAVEL_BUZZ_RON)
    }

    /// Response templates wrapping a fixed pool of canned `message` sentences.
    pub fn buzz_responses() -> Result<Catalog, CatalogError> {
        Self::parse_ron(BUZZ_RESPONSES_RON)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_ron(&contents)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        Ok(ron::from_str(input)?)
    }

    /// Merge another catalog into this one. Templates are appended; slots in
    /// `other` override slots with the same name.
    ///
    /// This is for library callers building a catalog in code. The
    /// `BUZZ_CATALOG_PATH` override does not merge: it replaces the built-in
    /// catalog outright.
    pub fn merge(&mut self, other: Catalog) {
        self.templates.extend(other.templates);
        self.slots.merge(other.slots);
    }
}
