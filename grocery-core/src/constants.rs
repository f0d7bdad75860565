//! Shared defaults for the shopping-list core.

/// Estimated budget shown before the user picks one: $1,000.00.
pub const DEFAULT_ESTIMATED_BUDGET_CENTS: u64 = 100_000;

/// Placeholder printed for an empty item list.
pub const EMPTY_LIST_LABEL: &str = "No items to display";
