//! Grocery planner core
//!
//! Platform-agnostic shopping-list model: a fixed catalog of stores (flat stores and
//! multi-vendor markets), seasonal item lists, duplicate-aware item additions and the
//! per-season views a presentation layer renders. Nothing here touches a UI, a disk or a
//! network; a [`Session`] lives for one run and is then dropped.

pub mod catalog;
pub mod config;
pub mod constants;
pub mod data;
pub mod duplicates;
pub mod items;
pub mod money;
pub mod mutator;
pub mod notify;
pub mod season;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use catalog::{Catalog, CatalogError, SeedDefect, Store, StoreKind, Vendor};
pub use config::{ConfigError, SessionConfig};
pub use data::{EmbeddedSeed, SeedCatalog, SeedItemSet, SeedStore, SeedVendor, StaticSeed};
pub use duplicates::{is_duplicate, is_duplicate_in_vendor};
pub use items::{ItemSet, compare_items, items_match, sort_items};
pub use money::{dollars_to_cents, fmt_currency};
pub use mutator::{AddOutcome, AddTarget, add_item, add_item_to};
pub use notify::{Notification, NotificationLevel, NotificationSink, NullSink};
pub use season::{Season, SeasonParseError, list_seasons};
pub use session::Session;
pub use view::{StoreView, VendorView, ViewBody, project_catalog, project_view};

/// Trait for abstracting where seed data comes from.
/// Platform-specific implementations should provide this
pub trait SeedSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the raw, unvalidated store list.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed data cannot be read or parsed.
    fn load_seed(&self) -> Result<SeedCatalog, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fmt;

    #[derive(Debug)]
    struct Unavailable;

    impl fmt::Display for Unavailable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("seed backend unavailable")
        }
    }

    impl std::error::Error for Unavailable {}

    #[derive(Default)]
    struct CountingSource {
        loads: Cell<u32>,
    }

    impl SeedSource for CountingSource {
        type Error = Unavailable;

        fn load_seed(&self) -> Result<SeedCatalog, Self::Error> {
            self.loads.set(self.loads.get() + 1);
            Err(Unavailable)
        }
    }

    #[test]
    fn seed_source_errors_surface_from_session_load() {
        let source = CountingSource::default();
        let err = Session::load(&source, SessionConfig::default(), NullSink)
            .err()
            .unwrap();
        assert_eq!(source.loads.get(), 1);
        assert!(format!("{err:#}").contains("seed backend unavailable"));
    }

    #[test]
    fn static_seed_feeds_session() {
        let seed = SeedCatalog::from_json(
            r#"{ "stores": [ { "name": "Corner Shop", "budget_cents": 900,
                 "items": { "regular": ["Milk", "Bread"] } } ] }"#,
        )
        .unwrap();
        let mut session = Session::load(&StaticSeed(seed), SessionConfig::default(), Vec::new())
            .unwrap();
        let (catalog, outcome) = session.add_item("Corner Shop", "Jam");
        assert!(outcome.is_change());
        let store = catalog.find_store("Corner Shop").unwrap();
        assert_eq!(
            store.primary_items().unwrap().regular(),
            ["Jam", "Milk", "Bread"]
        );
        assert_eq!(session.sink().len(), 1);
    }
}
