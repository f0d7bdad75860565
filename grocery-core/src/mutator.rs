//! Adding items to a catalog snapshot.
//!
//! Every call returns a fresh [`Catalog`]; the input snapshot is never touched. Only the
//! store (and, for composite stores, the vendor) that received the item is rebuilt; every
//! other store and vendor is shared with the previous snapshot.
use std::sync::Arc;

use serde::Serialize;

use crate::catalog::{Catalog, Store, StoreKind};
use crate::duplicates::{is_duplicate, is_duplicate_in_vendor};

/// Result of an add request. Nothing here is an error; the caller decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AddOutcome {
    Added { store: String, item: String },
    DuplicateRejected { store: String, item: String },
    NotFound { store: String },
    VendorNotFound { store: String, vendor: String },
    /// Blank input. Silently ignored.
    EmptyInput,
}

impl AddOutcome {
    /// True only when the returned catalog differs from the input.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// Which list of a store receives the item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddTarget<'a> {
    /// Flat store: its regular list. Composite store: the first vendor's regular list.
    #[default]
    Default,
    /// A named vendor of a composite store.
    Vendor(&'a str),
}

/// Add `raw_item` to the default list of `store_name`.
///
/// The item is trimmed first. Blank input, an unknown store and a case-insensitive
/// duplicate all leave the catalog unchanged and are reported through the outcome.
#[must_use]
pub fn add_item(catalog: &Catalog, store_name: &str, raw_item: &str) -> (Catalog, AddOutcome) {
    add_item_to(catalog, store_name, AddTarget::Default, raw_item)
}

/// Add `raw_item` to the list selected by `target`.
#[must_use]
pub fn add_item_to(
    catalog: &Catalog,
    store_name: &str,
    target: AddTarget<'_>,
    raw_item: &str,
) -> (Catalog, AddOutcome) {
    let item = raw_item.trim();
    if item.is_empty() {
        return (catalog.clone(), AddOutcome::EmptyInput);
    }

    let Some(idx) = catalog.position(store_name) else {
        log::warn!("add to unknown store `{store_name}` ignored");
        return (
            catalog.clone(),
            AddOutcome::NotFound {
                store: store_name.to_string(),
            },
        );
    };
    let store = &catalog.stores()[idx];

    let (duplicate, vendor_idx) = match target {
        AddTarget::Default => (is_duplicate(catalog, store_name, item), 0),
        AddTarget::Vendor(vendor) => {
            let Some(vendor_idx) = store.vendors().iter().position(|v| v.name == vendor) else {
                log::warn!("store `{store_name}` has no vendor `{vendor}`");
                return (
                    catalog.clone(),
                    AddOutcome::VendorNotFound {
                        store: store_name.to_string(),
                        vendor: vendor.to_string(),
                    },
                );
            };
            (
                is_duplicate_in_vendor(catalog, store_name, vendor, item),
                vendor_idx,
            )
        }
    };
    if duplicate {
        log::info!("`{item}` is already listed for `{store_name}`");
        return (
            catalog.clone(),
            AddOutcome::DuplicateRejected {
                store: store_name.to_string(),
                item: item.to_string(),
            },
        );
    }

    let updated = with_item(store, vendor_idx, item);
    log::debug!("added `{item}` to `{store_name}`");
    (
        catalog.replace_store(idx, updated),
        AddOutcome::Added {
            store: store_name.to_string(),
            item: item.to_string(),
        },
    )
}

/// Copy of `store` with `item` appended to the targeted regular list. `vendor_idx` is a
/// resolved vendor position and is ignored for flat stores.
fn with_item(store: &Store, vendor_idx: usize, item: &str) -> Store {
    let kind = match &store.kind {
        StoreKind::Flat {
            budget_cents,
            items,
        } => StoreKind::Flat {
            budget_cents: *budget_cents,
            items: items.with_regular(item),
        },
        StoreKind::Composite { vendors } => {
            let mut vendors = vendors.clone();
            if let Some(slot) = vendors.get_mut(vendor_idx) {
                let grown = slot.with_items(slot.items.with_regular(item));
                *slot = Arc::new(grown);
            }
            StoreKind::Composite { vendors }
        }
    };
    Store {
        name: store.name.clone(),
        logo: store.logo.clone(),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SeedCatalog;
    use crate::season::Season;

    const MARKET: &str = "Marietta Square Farmer's Market";

    fn seed_catalog() -> Catalog {
        Catalog::load_default().unwrap()
    }

    fn eggs_catalog() -> Catalog {
        let seed = SeedCatalog::from_json(
            r#"{ "stores": [
                { "name": "Alan Jorgensen", "budget_cents": 2000,
                  "items": { "regular": ["Fresh Eggs"] } },
                { "name": "Walmart", "budget_cents": 4000,
                  "items": { "regular": ["Rice", "Beans"],
                             "seasonal": { "Winter": ["Cocoa"] } } }
            ] }"#,
        )
        .unwrap();
        Catalog::from_seed(seed).unwrap()
    }

    fn regular<'a>(catalog: &'a Catalog, store: &str) -> &'a [String] {
        catalog
            .find_store(store)
            .and_then(Store::primary_items)
            .unwrap()
            .regular()
    }

    #[test]
    fn adding_shorter_item_sorts_it_first() {
        let catalog = eggs_catalog();
        let (next, outcome) = add_item(&catalog, "Alan Jorgensen", "Eggs");
        assert_eq!(
            outcome,
            AddOutcome::Added {
                store: "Alan Jorgensen".into(),
                item: "Eggs".into()
            }
        );
        assert_eq!(regular(&next, "Alan Jorgensen"), ["Eggs", "Fresh Eggs"]);
        assert_eq!(regular(&catalog, "Alan Jorgensen"), ["Fresh Eggs"]);
    }

    #[test]
    fn case_insensitive_duplicate_is_rejected() {
        let catalog = eggs_catalog();
        let (next, outcome) = add_item(&catalog, "Alan Jorgensen", "fresh eggs");
        assert_eq!(
            outcome,
            AddOutcome::DuplicateRejected {
                store: "Alan Jorgensen".into(),
                item: "fresh eggs".into()
            }
        );
        assert_eq!(next, catalog);
    }

    #[test]
    fn seasonal_duplicate_is_rejected() {
        let catalog = eggs_catalog();
        let (next, outcome) = add_item(&catalog, "Walmart", "COCOA");
        assert!(matches!(outcome, AddOutcome::DuplicateRejected { .. }));
        assert_eq!(next, catalog);
    }

    #[test]
    fn unknown_store_reports_not_found() {
        let catalog = eggs_catalog();
        let (next, outcome) = add_item(&catalog, "Nonexistent Store", "Milk");
        assert_eq!(
            outcome,
            AddOutcome::NotFound {
                store: "Nonexistent Store".into()
            }
        );
        assert_eq!(next, catalog);
    }

    #[test]
    fn blank_input_is_a_no_op() {
        let catalog = eggs_catalog();
        for raw in ["", "   ", "\t\n"] {
            let (next, outcome) = add_item(&catalog, "Walmart", raw);
            assert_eq!(outcome, AddOutcome::EmptyInput);
            assert_eq!(next, catalog);
        }
        let (_, outcome) = add_item(&catalog, "Nonexistent Store", " ");
        assert_eq!(outcome, AddOutcome::EmptyInput);
    }

    #[test]
    fn input_is_trimmed_before_checks() {
        let catalog = eggs_catalog();
        let (_, outcome) = add_item(&catalog, "Walmart", "  rice ");
        assert!(matches!(outcome, AddOutcome::DuplicateRejected { item, .. } if item == "rice"));
        let (next, outcome) = add_item(&catalog, "Walmart", "  Oats ");
        assert!(outcome.is_change());
        assert_eq!(regular(&next, "Walmart"), ["Oats", "Rice", "Beans"]);
    }

    #[test]
    fn untouched_stores_are_shared() {
        let catalog = seed_catalog();
        let (next, _) = add_item(&catalog, "Walmart", "Oats");
        for (before, after) in catalog.stores().iter().zip(next.stores()) {
            if before.name == "Walmart" {
                assert!(!Arc::ptr_eq(before, after));
            } else {
                assert!(Arc::ptr_eq(before, after), "{} was copied", before.name);
            }
        }
    }

    #[test]
    fn composite_add_lands_on_first_vendor_regular_list() {
        let catalog = seed_catalog();
        let (next, outcome) = add_item(&catalog, MARKET, "Beets");
        assert!(outcome.is_change());
        let market = next.find_store(MARKET).unwrap();
        let first = &market.vendors()[0];
        assert_eq!(first.name, "Mama J's Produce");
        assert!(first.items.regular().iter().any(|item| item == "Beets"));
        assert!(first.items.seasonal(Season::Spring).is_empty());

        let before = catalog.find_store(MARKET).unwrap();
        for (old, new) in before.vendors().iter().zip(market.vendors()).skip(1) {
            assert!(Arc::ptr_eq(old, new));
        }
        assert_eq!(market.budget_cents(), before.budget_cents());
    }

    #[test]
    fn composite_duplicate_only_checks_first_vendor() {
        let catalog = seed_catalog();
        // Fresh Eggs belongs to a later vendor, so the default add accepts it.
        let (next, outcome) = add_item(&catalog, MARKET, "Fresh Eggs");
        assert!(outcome.is_change());
        let (_, again) = add_item(&next, MARKET, "fresh eggs");
        assert!(matches!(again, AddOutcome::DuplicateRejected { .. }));
    }

    #[test]
    fn vendor_target_adds_to_named_vendor() {
        let catalog = seed_catalog();
        let (next, outcome) =
            add_item_to(&catalog, MARKET, AddTarget::Vendor("Alan Jorgensen"), "Duck Eggs");
        assert!(outcome.is_change());
        let vendor = next
            .find_store(MARKET)
            .and_then(|store| store.find_vendor("Alan Jorgensen"))
            .unwrap();
        assert_eq!(vendor.items.regular(), ["Duck Eggs", "Fresh Eggs"]);

        let (unchanged, outcome) =
            add_item_to(&next, MARKET, AddTarget::Vendor("Alan Jorgensen"), "FRESH EGGS");
        assert!(matches!(outcome, AddOutcome::DuplicateRejected { .. }));
        assert_eq!(unchanged, next);
    }

    #[test]
    fn vendor_target_leaves_other_vendors_shared() {
        let catalog = seed_catalog();
        let (next, outcome) =
            add_item_to(&catalog, MARKET, AddTarget::Vendor("Chicken Lady"), "Duck Eggs");
        assert!(outcome.is_change());
        let before = catalog.find_store(MARKET).unwrap();
        let after = next.find_store(MARKET).unwrap();
        for (old, new) in before.vendors().iter().zip(after.vendors()) {
            if old.name == "Chicken Lady" {
                assert!(!Arc::ptr_eq(old, new));
                assert!(new.items.regular().iter().any(|item| item == "Duck Eggs"));
            } else {
                assert!(Arc::ptr_eq(old, new), "{} was copied", old.name);
            }
        }
        let first = &after.vendors()[0];
        assert!(!first.items.contains("Duck Eggs"));
    }

    #[test]
    fn missing_vendor_reports_vendor_not_found() {
        let catalog = seed_catalog();
        let (next, outcome) = add_item_to(&catalog, MARKET, AddTarget::Vendor("Nobody"), "Figs");
        assert_eq!(
            outcome,
            AddOutcome::VendorNotFound {
                store: MARKET.into(),
                vendor: "Nobody".into()
            }
        );
        assert_eq!(next, catalog);

        let (_, outcome) = add_item_to(&catalog, "Walmart", AddTarget::Vendor("Nobody"), "Figs");
        assert!(matches!(outcome, AddOutcome::VendorNotFound { .. }));
    }
}
