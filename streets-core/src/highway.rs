//! Canonical highway category labels.

use crate::tables::{DEFAULT_HIGHWAY_TYPE, HIGHWAY_TYPE_LABELS};

/// Lookup table mapping raw highway categories onto canonical labels.
///
/// The mapping is total: unknown, empty and missing inputs all resolve to the
/// table's default label.
///
/// # Examples
/// ```
/// use streets_core::HighwayTypeTable;
///
/// let table = HighwayTypeTable::default();
/// assert_eq!(table.canonical(Some("Primary")), "primary");
/// assert_eq!(table.canonical(Some("motorway")), "unclassified");
/// assert_eq!(table.canonical(None), "unclassified");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighwayTypeTable {
    labels: &'static [&'static str],
    default: &'static str,
}

impl HighwayTypeTable {
    /// Build a table from known labels and a fallback.
    ///
    /// Labels are matched case-insensitively against trimmed input.
    #[must_use]
    pub const fn new(labels: &'static [&'static str], default: &'static str) -> Self {
        Self { labels, default }
    }

    /// Resolve a raw category to its canonical label.
    #[must_use]
    pub fn canonical(&self, raw: Option<&str>) -> &'static str {
        raw.map(str::trim)
            .and_then(|value| {
                self.labels
                    .iter()
                    .find(|label| label.eq_ignore_ascii_case(value))
            })
            .copied()
            .unwrap_or(self.default)
    }

    /// Label returned for unrecognised input.
    #[must_use]
    pub const fn default_label(&self) -> &'static str {
        self.default
    }
}

impl Default for HighwayTypeTable {
    fn default() -> Self {
        Self::new(HIGHWAY_TYPE_LABELS, DEFAULT_HIGHWAY_TYPE)
    }
}
