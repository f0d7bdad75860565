//! User-facing messages for add outcomes, and the sink they are delivered to.
use serde::Serialize;

use crate::mutator::AddOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    /// Message for an outcome. Blank input produces no message.
    #[must_use]
    pub fn from_outcome(outcome: &AddOutcome) -> Option<Self> {
        let (level, title, description) = match outcome {
            AddOutcome::Added { store, item } => (
                NotificationLevel::Success,
                "Item added",
                format!("{item} has been added to {store}"),
            ),
            AddOutcome::DuplicateRejected { store, item } => (
                NotificationLevel::Warning,
                "Duplicate item",
                format!("{item} is already in the list for {store}"),
            ),
            AddOutcome::NotFound { store } => (
                NotificationLevel::Error,
                "Store not found",
                format!("No store named {store}"),
            ),
            AddOutcome::VendorNotFound { store, vendor } => (
                NotificationLevel::Error,
                "Vendor not found",
                format!("{store} has no vendor named {vendor}"),
            ),
            AddOutcome::EmptyInput => return None,
        };
        Some(Self {
            level,
            title: title.to_string(),
            description,
        })
    }
}

/// Receives notifications; presentation decides how to show them.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications in order.
impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Drops every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&mut self, _notification: Notification) {}
}
