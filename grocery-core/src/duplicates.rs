//! Duplicate detection over a store's combined item lists.
use crate::catalog::Catalog;

/// Whether `candidate` already appears, ignoring case, in the store's regular list or in
/// any season's list. Every season is checked, not only the selected one.
///
/// For a composite store only the first vendor's lists are consulted, matching where
/// [`crate::mutator::add_item`] puts new items. An unknown store never reports a duplicate.
#[must_use]
pub fn is_duplicate(catalog: &Catalog, store_name: &str, candidate: &str) -> bool {
    catalog
        .find_store(store_name)
        .and_then(|store| store.primary_items())
        .is_some_and(|items| items.contains(candidate))
}

/// Duplicate check scoped to one named vendor of a composite store. Unknown stores and
/// vendors never report a duplicate.
#[must_use]
pub fn is_duplicate_in_vendor(
    catalog: &Catalog,
    store_name: &str,
    vendor_name: &str,
    candidate: &str,
) -> bool {
    catalog
        .find_store(store_name)
        .and_then(|store| store.find_vendor(vendor_name))
        .is_some_and(|vendor| vendor.items.contains(candidate))
}
