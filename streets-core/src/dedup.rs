//! Duplicate suppression keyed on street name and area.
//!
//! A name alone is not unique: "High Street" exists in many districts. Two
//! records collide only when their case-folded names match and they were
//! assigned to the same area, or both to no area.

use std::collections::HashSet;

use crate::street::CleanedStreet;

/// Remembers which (name, area) pairs have been admitted.
///
/// # Examples
/// ```
/// use streets_core::{AcceptedStreet, CleanedStreet, StreetDeduplicator};
///
/// let street = |area: &str| CleanedStreet {
///     area_code: Some(area.into()),
///     ..CleanedStreet::unassigned(AcceptedStreet {
///         name: "High Street".into(),
///         highway_type: "primary".into(),
///         location: None,
///         osm_id: None,
///     })
/// };
///
/// let mut dedup = StreetDeduplicator::new();
/// assert!(dedup.admit(&street("SE1")));
/// assert!(!dedup.admit(&street("SE1")));
/// assert!(dedup.admit(&street("SE5")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StreetDeduplicator {
    seen: HashSet<(String, Option<String>)>,
}

/// Survivors and discard count from [`StreetDeduplicator::retain_unique`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DedupOutcome {
    /// First occurrences, in input order.
    pub unique: Vec<CleanedStreet>,
    /// Number of records dropped as repeats.
    pub duplicates: usize,
}

impl StreetDeduplicator {
    /// Start with nothing seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the street and report whether it was new.
    pub fn admit(&mut self, street: &CleanedStreet) -> bool {
        self.seen.insert(Self::key(street))
    }

    /// Number of distinct keys admitted so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether nothing has been admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Keep the first occurrence of each key, preserving order.
    pub fn retain_unique<I>(&mut self, streets: I) -> DedupOutcome
    where
        I: IntoIterator<Item = CleanedStreet>,
    {
        let mut outcome = DedupOutcome::default();
        for street in streets {
            if self.admit(&street) {
                outcome.unique.push(street);
            } else {
                outcome.duplicates += 1;
            }
        }
        outcome
    }

    fn key(street: &CleanedStreet) -> (String, Option<String>) {
        (street.street.name.to_lowercase(), street.area_code.clone())
    }
}
