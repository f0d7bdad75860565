//! The single state container the presentation layer talks to.
use anyhow::Context;

use crate::SeedSource;
use crate::catalog::Catalog;
use crate::config::SessionConfig;
use crate::mutator::{AddOutcome, AddTarget, add_item_to};
use crate::notify::{Notification, NotificationSink};
use crate::season::{Season, list_seasons};
use crate::view::{StoreView, project_catalog, project_view};

/// Owns the current catalog snapshot and the selected season. All item additions go
/// through here, and each one replaces the snapshot as a whole.
pub struct Session<N: NotificationSink> {
    catalog: Catalog,
    season: Season,
    config: SessionConfig,
    sink: N,
}

impl<N: NotificationSink> Session<N> {
    #[must_use]
    pub fn new(catalog: Catalog, config: SessionConfig, sink: N) -> Self {
        Self {
            catalog,
            season: config.default_season,
            config,
            sink,
        }
    }

    /// Load seed data from `source`, validate it and start a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be loaded, the seed is malformed, or the
    /// configuration is invalid.
    pub fn load<S>(source: &S, config: SessionConfig, sink: N) -> anyhow::Result<Self>
    where
        S: SeedSource,
    {
        config.validate().context("invalid session configuration")?;
        let seed = source.load_seed().context("failed to load seed data")?;
        let catalog = Catalog::from_seed(seed).context("seed data failed validation")?;
        log::info!("session started with {} stores", catalog.len());
        Ok(Self::new(catalog, config, sink))
    }

    /// Current snapshot.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Owned copy of the current snapshot. Stores are shared, not copied.
    #[must_use]
    pub fn snapshot(&self) -> Catalog {
        self.catalog.clone()
    }

    #[must_use]
    pub const fn season(&self) -> Season {
        self.season
    }

    pub fn select_season(&mut self, season: Season) {
        log::debug!("season changed from {} to {season}", self.season);
        self.season = season;
    }

    #[must_use]
    pub const fn list_seasons(&self) -> &'static [Season] {
        list_seasons()
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Add to the store's default list and relay the outcome to the sink.
    pub fn add_item(&mut self, store_name: &str, raw_item: &str) -> (Catalog, AddOutcome) {
        self.add_item_to(store_name, AddTarget::Default, raw_item)
    }

    pub fn add_item_to(
        &mut self,
        store_name: &str,
        target: AddTarget<'_>,
        raw_item: &str,
    ) -> (Catalog, AddOutcome) {
        let (next, outcome) = add_item_to(&self.catalog, store_name, target, raw_item);
        self.catalog = next;
        if let Some(notification) = Notification::from_outcome(&outcome) {
            self.sink.notify(notification);
        }
        (self.catalog.clone(), outcome)
    }

    /// Projection of one store for the selected season.
    #[must_use]
    pub fn view(&self, store_name: &str) -> Option<StoreView<'_>> {
        self.catalog
            .find_store(store_name)
            .map(|store| project_view(store, self.season))
    }

    /// Printable projection of every store for the selected season.
    #[must_use]
    pub fn print_all(&self) -> Vec<StoreView<'_>> {
        project_catalog(&self.catalog, self.season)
    }

    #[must_use]
    pub const fn estimated_budget_cents(&self) -> u64 {
        self.config.estimated_budget_cents
    }

    /// Sum of every store budget in the current snapshot.
    #[must_use]
    pub fn planned_budget_cents(&self) -> u64 {
        self.catalog.total_budget_cents()
    }

    pub const fn sink(&self) -> &N {
        &self.sink
    }

    pub fn into_sink(self) -> N {
        self.sink
    }
}
