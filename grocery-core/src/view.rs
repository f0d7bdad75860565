//! Display-ready projections of a store for one season.
//!
//! Projections borrow from the catalog and never modify it, so they can be rebuilt as often
//! as the presentation layer likes.
use serde::Serialize;

use crate::catalog::{Catalog, Store, StoreKind, Vendor, vendor_budget_total};
use crate::season::Season;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VendorView<'a> {
    pub name: &'a str,
    pub emoji: &'a str,
    pub budget_cents: u64,
    pub regular_items: &'a [String],
    pub seasonal_items: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewBody<'a> {
    Flat {
        regular_items: &'a [String],
        seasonal_items: &'a [String],
    },
    Composite {
        vendors: Vec<VendorView<'a>>,
    },
}

/// Everything needed to render one store for one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreView<'a> {
    pub name: &'a str,
    pub logo: Option<&'a str>,
    pub season: Season,
    pub total_budget_cents: u64,
    #[serde(flatten)]
    pub body: ViewBody<'a>,
}

impl StoreView<'_> {
    /// Number of items shown in this view across all lists.
    #[must_use]
    pub fn item_count(&self) -> usize {
        match &self.body {
            ViewBody::Flat {
                regular_items,
                seasonal_items,
            } => regular_items.len() + seasonal_items.len(),
            ViewBody::Composite { vendors } => vendors
                .iter()
                .map(|vendor| vendor.regular_items.len() + vendor.seasonal_items.len())
                .sum(),
        }
    }
}

#[must_use]
pub fn project_view(store: &Store, season: Season) -> StoreView<'_> {
    let (total_budget_cents, body) = match &store.kind {
        StoreKind::Flat {
            budget_cents,
            items,
        } => (
            *budget_cents,
            ViewBody::Flat {
                regular_items: items.regular(),
                seasonal_items: items.seasonal(season),
            },
        ),
        StoreKind::Composite { vendors } => (
            vendor_budget_total(vendors),
            ViewBody::Composite {
                vendors: vendors
                    .iter()
                    .map(|vendor| project_vendor(vendor, season))
                    .collect(),
            },
        ),
    };
    StoreView {
        name: &store.name,
        logo: store.logo.as_deref(),
        season,
        total_budget_cents,
        body,
    }
}

fn project_vendor(vendor: &Vendor, season: Season) -> VendorView<'_> {
    VendorView {
        name: &vendor.name,
        emoji: &vendor.emoji,
        budget_cents: vendor.budget_cents,
        regular_items: vendor.items.regular(),
        seasonal_items: vendor.items.seasonal(season),
    }
}

/// The printable all-store projection: [`project_view`] over every store, catalog order.
#[must_use]
pub fn project_catalog(catalog: &Catalog, season: Season) -> Vec<StoreView<'_>> {
    catalog
        .stores()
        .iter()
        .map(|store| project_view(store, season))
        .collect()
}
