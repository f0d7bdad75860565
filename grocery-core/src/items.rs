//! Item lists and the canonical item order.
//!
//! Items are plain text labels. Lists are kept sorted by length first, then by locale
//! collation, so the printable list reads short-to-long.
use crate::season::Season;
use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Canonical item order: length ascending, then collation ascending.
///
/// Length is the UTF-16 code unit count, so an astral character such as an emoji counts
/// as two.
#[must_use]
pub fn compare_items(a: &str, b: &str) -> Ordering {
    utf16_len(a)
        .cmp(&utf16_len(b))
        .then_with(|| collate(a, b))
}

fn utf16_len(item: &str) -> usize {
    item.encode_utf16().count()
}

/// Root-locale collator at tertiary strength, built once.
fn collator() -> Option<&'static CollatorBorrowed<'static>> {
    static COLLATOR: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    COLLATOR
        .get_or_init(|| {
            let mut options = CollatorOptions::default();
            options.strength = Some(Strength::Tertiary);
            match Collator::try_new(Default::default(), options) {
                Ok(collator) => Some(collator),
                Err(err) => {
                    log::warn!("collator unavailable, using case-folded order: {err}");
                    None
                }
            }
        })
        .as_ref()
}

/// Locale collation, with code-point order breaking ties between strings the collator
/// treats as equal.
fn collate(a: &str, b: &str) -> Ordering {
    let ordering = match collator() {
        Some(collator) => collator.compare(a, b),
        None => fold_collate(a, b),
    };
    ordering.then_with(|| a.cmp(b))
}

/// Case-folded comparison, lowercase first on a case-only difference.
fn fold_collate(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
}

/// Stable in-place sort by [`compare_items`].
pub fn sort_items(items: &mut [String]) {
    items.sort_by(|a, b| compare_items(a, b));
}

/// Case-insensitive exact match. No trimming.
#[must_use]
pub fn items_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

#[must_use]
pub fn is_canonically_sorted(items: &[String]) -> bool {
    items.is_sorted_by(|a, b| compare_items(a, b) != Ordering::Greater)
}

/// Regular items plus one list per season, every list kept in canonical order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSet {
    regular: Vec<String>,
    seasonal: BTreeMap<Season, Vec<String>>,
}

impl ItemSet {
    /// Build a set from raw lists. Every list is sorted and every season gets an entry.
    #[must_use]
    pub fn new(regular: Vec<String>, seasonal: BTreeMap<Season, Vec<String>>) -> Self {
        let mut set = Self { regular, seasonal };
        for season in Season::ALL {
            set.seasonal.entry(season).or_default();
        }
        sort_items(&mut set.regular);
        for list in set.seasonal.values_mut() {
            sort_items(list);
        }
        set
    }

    #[must_use]
    pub fn from_regular(regular: Vec<String>) -> Self {
        Self::new(regular, BTreeMap::new())
    }

    #[must_use]
    pub fn regular(&self) -> &[String] {
        &self.regular
    }

    /// Items for one season. A missing entry reads as an empty list.
    #[must_use]
    pub fn seasonal(&self, season: Season) -> &[String] {
        self.seasonal
            .get(&season)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Regular items followed by every season's items, in season order.
    pub fn iter_all(&self) -> impl Iterator<Item = &String> {
        self.regular
            .iter()
            .chain(self.seasonal.values().flat_map(|list| list.iter()))
    }

    /// Whether any list in the set holds `candidate`, ignoring case.
    #[must_use]
    pub fn contains(&self, candidate: &str) -> bool {
        self.iter_all().any(|item| items_match(item, candidate))
    }

    /// Total number of entries across all lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regular.len() + self.seasonal.values().map(Vec::len).sum::<usize>()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of this set with `item` appended to the regular list and that list re-sorted.
    #[must_use]
    pub fn with_regular(&self, item: &str) -> Self {
        let mut regular = self.regular.clone();
        regular.push(item.to_string());
        sort_items(&mut regular);
        Self {
            regular,
            seasonal: self.seasonal.clone(),
        }
    }
}

impl Default for ItemSet {
    fn default() -> Self {
        Self::new(Vec::new(), BTreeMap::new())
    }
}
