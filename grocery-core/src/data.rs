use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::SeedSource;

const DEFAULT_STORES_DATA: &str = include_str!("../assets/stores.json");

/// Item lists as they appear in seed data, before sorting or season validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeedItemSet {
    #[serde(default)]
    pub regular: Vec<String>,
    /// Keyed by case-sensitive season label.
    #[serde(default)]
    pub seasonal: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedVendor {
    pub name: String,
    #[serde(default)]
    pub emoji: String,
    pub budget_cents: u64,
    #[serde(default)]
    pub items: SeedItemSet,
}

/// A store as written in seed data. Exactly one of `items` or `vendors` must be present;
/// that is checked when the catalog is built, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedStore {
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub budget_cents: Option<u64>,
    #[serde(default)]
    pub items: Option<SeedItemSet>,
    #[serde(default)]
    pub vendors: Option<Vec<SeedVendor>>,
}

/// Container for all seed stores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SeedCatalog {
    pub stores: Vec<SeedStore>,
}

impl SeedCatalog {
    /// Load seed data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into the seed shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse the store list bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled asset is not valid seed JSON.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        Self::from_json(DEFAULT_STORES_DATA)
    }
}

/// Seed source backed by the bundled `assets/stores.json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSeed;

impl SeedSource for EmbeddedSeed {
    type Error = serde_json::Error;

    fn load_seed(&self) -> Result<SeedCatalog, Self::Error> {
        SeedCatalog::embedded()
    }
}

/// Seed source wrapping an already-built seed, for fixtures and embedders.
#[derive(Debug, Clone, Default)]
pub struct StaticSeed(pub SeedCatalog);

impl SeedSource for StaticSeed {
    type Error = Infallible;

    fn load_seed(&self) -> Result<SeedCatalog, Self::Error> {
        Ok(self.0.clone())
    }
}
