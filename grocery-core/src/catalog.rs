//! Stores, vendors and the validated catalog snapshot.
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::data::{SeedCatalog, SeedItemSet, SeedStore, SeedVendor};
use crate::items::{ItemSet, items_match};
use crate::season::Season;

/// A seller inside a composite store. Owned by its store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub name: String,
    /// Display glyph only.
    pub emoji: String,
    pub budget_cents: u64,
    pub items: ItemSet,
}

impl Vendor {
    #[must_use]
    pub fn with_items(&self, items: ItemSet) -> Self {
        Self {
            name: self.name.clone(),
            emoji: self.emoji.clone(),
            budget_cents: self.budget_cents,
            items,
        }
    }
}

/// The two store shapes. A store either keeps its own list and budget, or is made of
/// vendors and derives its budget from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Flat { budget_cents: u64, items: ItemSet },
    Composite { vendors: Vec<Arc<Vendor>> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    pub name: String,
    pub logo: Option<String>,
    pub kind: StoreKind,
}

impl Store {
    /// Literal budget for flat stores; for composite stores the sum of vendor budgets,
    /// computed on every call.
    #[must_use]
    pub fn budget_cents(&self) -> u64 {
        match &self.kind {
            StoreKind::Flat { budget_cents, .. } => *budget_cents,
            StoreKind::Composite { vendors } => vendor_budget_total(vendors),
        }
    }

    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self.kind, StoreKind::Composite { .. })
    }

    /// Vendors of a composite store; empty for a flat store.
    #[must_use]
    pub fn vendors(&self) -> &[Arc<Vendor>] {
        match &self.kind {
            StoreKind::Flat { .. } => &[],
            StoreKind::Composite { vendors } => vendors,
        }
    }

    #[must_use]
    pub fn find_vendor(&self, name: &str) -> Option<&Vendor> {
        self.vendors()
            .iter()
            .find(|vendor| vendor.name == name)
            .map(AsRef::as_ref)
    }

    /// The item set that default adds and duplicate checks operate on: the store's own set,
    /// or the first vendor's set for a composite store.
    #[must_use]
    pub fn primary_items(&self) -> Option<&ItemSet> {
        match &self.kind {
            StoreKind::Flat { items, .. } => Some(items),
            StoreKind::Composite { vendors } => vendors.first().map(|vendor| &vendor.items),
        }
    }
}

pub(crate) fn vendor_budget_total(vendors: &[Arc<Vendor>]) -> u64 {
    vendors
        .iter()
        .fold(0u64, |total, vendor| total.saturating_add(vendor.budget_cents))
}

/// What is wrong with one seed store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedDefect {
    #[error("store name is blank")]
    BlankName,
    #[error("has both `items` and `vendors`")]
    BothItemsAndVendors,
    #[error("has neither `items` nor `vendors`")]
    NeitherItemsNorVendors,
    #[error("flat store has no `budget_cents`")]
    MissingBudget,
    #[error("composite store carries a literal budget; its budget is derived from vendors")]
    StoredCompositeBudget,
    #[error("composite store has no vendors")]
    NoVendors,
    #[error("vendor `{0}` appears more than once")]
    DuplicateVendor(String),
    #[error("unknown season key `{0}`")]
    UnknownSeason(String),
    #[error("contains a blank item")]
    BlankItem,
    #[error("item `{0}` appears twice in one list")]
    DuplicateItem(String),
}

/// Errors raised while turning seed data into a catalog. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("seed data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("malformed seed store `{store}`: {defect}")]
    MalformedSeed { store: String, defect: SeedDefect },
    #[error("store name `{0}` is used more than once")]
    DuplicateStore(String),
}

/// Ordered, name-unique list of stores. Cloning shares every store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    stores: Vec<Arc<Store>>,
}

impl Catalog {
    /// Validate seed data and sort every item list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when any store violates the seed contract or two stores
    /// share a name.
    pub fn from_seed(seed: SeedCatalog) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        let mut stores = Vec::with_capacity(seed.stores.len());
        for raw in seed.stores {
            if !seen.insert(raw.name.clone()) {
                return Err(CatalogError::DuplicateStore(raw.name));
            }
            let name = raw.name.clone();
            let store = build_store(raw).map_err(|defect| CatalogError::MalformedSeed {
                store: name,
                defect,
            })?;
            stores.push(Arc::new(store));
        }
        log::debug!("catalog built with {} stores", stores.len());
        Ok(Self { stores })
    }

    /// Build the catalog from the bundled seed data.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the bundled seed fails to parse or validate.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_seed(SeedCatalog::embedded()?)
    }

    #[must_use]
    pub fn stores(&self) -> &[Arc<Store>] {
        &self.stores
    }

    /// Exact, case-sensitive lookup.
    #[must_use]
    pub fn find_store(&self, name: &str) -> Option<&Store> {
        self.position(name).map(|idx| self.stores[idx].as_ref())
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.stores.iter().position(|store| store.name == name)
    }

    pub fn store_names(&self) -> impl Iterator<Item = &str> {
        self.stores.iter().map(|store| store.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    /// Sum of every store's budget. Informational only.
    #[must_use]
    pub fn total_budget_cents(&self) -> u64 {
        self.stores
            .iter()
            .fold(0u64, |total, store| total.saturating_add(store.budget_cents()))
    }

    /// A new snapshot with the store at `idx` swapped out; every other store is shared.
    pub(crate) fn replace_store(&self, idx: usize, store: Store) -> Self {
        let mut stores = self.stores.clone();
        stores[idx] = Arc::new(store);
        Self { stores }
    }
}

fn build_store(raw: SeedStore) -> Result<Store, SeedDefect> {
    if raw.name.trim().is_empty() {
        return Err(SeedDefect::BlankName);
    }
    let kind = match (raw.items, raw.vendors) {
        (Some(_), Some(_)) => return Err(SeedDefect::BothItemsAndVendors),
        (None, None) => return Err(SeedDefect::NeitherItemsNorVendors),
        (Some(items), None) => StoreKind::Flat {
            budget_cents: raw.budget_cents.ok_or(SeedDefect::MissingBudget)?,
            items: build_item_set(items)?,
        },
        (None, Some(vendors)) => {
            if raw.budget_cents.is_some() {
                return Err(SeedDefect::StoredCompositeBudget);
            }
            if vendors.is_empty() {
                return Err(SeedDefect::NoVendors);
            }
            StoreKind::Composite {
                vendors: build_vendors(vendors)?,
            }
        }
    };
    Ok(Store {
        name: raw.name,
        logo: raw.logo,
        kind,
    })
}

fn build_vendors(raw: Vec<SeedVendor>) -> Result<Vec<Arc<Vendor>>, SeedDefect> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|vendor| {
            if vendor.name.trim().is_empty() {
                return Err(SeedDefect::BlankName);
            }
            if !seen.insert(vendor.name.clone()) {
                return Err(SeedDefect::DuplicateVendor(vendor.name));
            }
            Ok(Arc::new(Vendor {
                name: vendor.name,
                emoji: vendor.emoji,
                budget_cents: vendor.budget_cents,
                items: build_item_set(vendor.items)?,
            }))
        })
        .collect()
}

fn build_item_set(raw: SeedItemSet) -> Result<ItemSet, SeedDefect> {
    check_list(&raw.regular)?;
    let mut seasonal = BTreeMap::new();
    for (label, items) in raw.seasonal {
        let season = Season::from_label(&label).ok_or(SeedDefect::UnknownSeason(label))?;
        check_list(&items)?;
        seasonal.insert(season, items);
    }
    Ok(ItemSet::new(raw.regular, seasonal))
}

fn check_list(items: &[String]) -> Result<(), SeedDefect> {
    for (idx, item) in items.iter().enumerate() {
        if item.trim().is_empty() {
            return Err(SeedDefect::BlankItem);
        }
        if items[..idx].iter().any(|earlier| items_match(earlier, item)) {
            return Err(SeedDefect::DuplicateItem(item.clone()));
        }
    }
    Ok(())
}
