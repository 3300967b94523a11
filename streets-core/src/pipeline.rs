//! Normalize, assign and deduplicate a batch of street candidates.

use std::collections::BTreeMap;

use log::{debug, info};

use crate::area::{AreaAssigner, AreaBoundingBox};
use crate::dedup::StreetDeduplicator;
use crate::normalizer::{RejectionReason, StreetNormalizer, Verdict};
use crate::street::{AcceptedStreet, CleanedStreet, StreetRecord};

/// Counts describing one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CleaningSummary {
    /// Candidates examined.
    pub candidates: usize,
    /// Candidates the normalizer accepted.
    pub accepted: usize,
    /// Rejections grouped by reason.
    pub rejected: BTreeMap<RejectionReason, usize>,
    /// Accepted streets that fell in no area.
    pub unassigned: usize,
    /// Accepted streets dropped as repeats.
    pub duplicates: usize,
    /// Streets in the final output.
    pub retained: usize,
}

impl CleaningSummary {
    /// Total rejections across all reasons.
    #[must_use]
    pub fn rejected_total(&self) -> usize {
        self.rejected.values().sum()
    }

    /// Rejections for one reason.
    #[must_use]
    pub fn rejected_for(&self, reason: RejectionReason) -> usize {
        self.rejected.get(&reason).copied().unwrap_or_default()
    }
}

/// Output of [`CleaningPipeline::run`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CleaningReport {
    /// Run counters.
    pub summary: CleaningSummary,
    /// Surviving streets, in input order.
    pub streets: Vec<CleanedStreet>,
}

/// Chains the normalizer, area assigner and deduplicator.
///
/// A street is placed by its coordinates. Without coordinates it falls back
/// to the district its source reported, when the area table knows that code.
/// Streets placed neither way count as unassigned and are dropped unless
/// [`CleaningPipeline::keep_unassigned`] is enabled.
///
/// # Examples
/// ```
/// use streets_core::{AreaAssigner, CleaningPipeline, StreetNormalizer, StreetRecord};
///
/// let pipeline = CleaningPipeline::new(StreetNormalizer::default(), AreaAssigner::se_london());
/// let report = pipeline.run(vec![
///     StreetRecord::new("Bankside").with_coordinates(51.495, -0.10),
///     StreetRecord::new("Unnamed Road").with_coordinates(51.495, -0.10),
/// ]);
/// assert_eq!(report.summary.retained, 1);
/// assert_eq!(report.streets[0].area_code.as_deref(), Some("SE1"));
/// ```
#[derive(Debug, Clone)]
pub struct CleaningPipeline {
    normalizer: StreetNormalizer,
    assigner: AreaAssigner,
    keep_unassigned: bool,
}

impl CleaningPipeline {
    /// Build a pipeline that drops unassigned streets.
    #[must_use]
    pub const fn new(normalizer: StreetNormalizer, assigner: AreaAssigner) -> Self {
        Self {
            normalizer,
            assigner,
            keep_unassigned: false,
        }
    }

    /// Keep accepted streets that fall outside every area.
    #[must_use]
    pub const fn keep_unassigned(mut self, keep: bool) -> Self {
        self.keep_unassigned = keep;
        self
    }

    /// Area table in use.
    #[must_use]
    pub const fn assigner(&self) -> &AreaAssigner {
        &self.assigner
    }

    /// Clean a batch of candidates.
    pub fn run<I>(&self, records: I) -> CleaningReport
    where
        I: IntoIterator<Item = StreetRecord>,
    {
        let mut summary = CleaningSummary::default();
        let mut placed = Vec::new();
        for record in records {
            summary.candidates += 1;
            let street = match self.normalizer.normalize(&record) {
                Verdict::Accepted(street) => street,
                Verdict::Rejected(reason) => {
                    debug!("Rejected {:?}: {reason}", record.name);
                    *summary.rejected.entry(reason).or_default() += 1;
                    continue;
                }
            };
            summary.accepted += 1;
            let cleaned = match self.locate(&street, record.district.as_deref()) {
                Some(area) => CleanedStreet::in_area(street, area),
                None => {
                    summary.unassigned += 1;
                    if !self.keep_unassigned {
                        continue;
                    }
                    CleanedStreet::unassigned(street)
                }
            };
            placed.push(cleaned);
        }
        let outcome = StreetDeduplicator::new().retain_unique(placed);
        summary.duplicates = outcome.duplicates;
        summary.retained = outcome.unique.len();
        info!(
            "Cleaned {} candidates: {} accepted, {} rejected, {} unassigned, {} duplicates",
            summary.candidates,
            summary.accepted,
            summary.rejected_total(),
            summary.unassigned,
            summary.duplicates
        );
        CleaningReport {
            summary,
            streets: outcome.unique,
        }
    }

    fn locate(&self, street: &AcceptedStreet, district: Option<&str>) -> Option<&AreaBoundingBox> {
        street.location.map_or_else(
            || district.and_then(|code| self.assigner.get(code.trim())),
            |coord| self.assigner.assign_area(coord.y, coord.x),
        )
    }
}
