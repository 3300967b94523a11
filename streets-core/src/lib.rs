//! Core street cleaning rules for the street etymology dataset.
//!
//! The crate decides whether a harvested name looks like a real street,
//! canonicalizes its highway category, places it in a named area and drops
//! repeats. Everything here is pure and synchronous; extraction and
//! persistence live in `streets-data`.
//!
//! # Examples
//! ```
//! use streets_core::{AreaAssigner, StreetNormalizer, StreetRecord};
//!
//! let normalizer = StreetNormalizer::default();
//! let street = normalizer
//!     .normalize(&StreetRecord::new("Rye Lane").with_coordinates(51.47, -0.069))
//!     .accepted()
//!     .expect("Rye Lane is a real street");
//! let coord = street.location.expect("coordinates were supplied");
//! assert_eq!(AreaAssigner::se_london().assign(coord.y, coord.x), Some("SE15"));
//! ```

#![forbid(unsafe_code)]

pub mod area;
pub mod dedup;
pub mod highway;
pub mod normalizer;
pub mod pipeline;
pub mod street;
pub mod tables;

#[cfg(feature = "serde")]
pub use area::AreaTableError;
pub use area::{AreaAssigner, AreaBoundingBox, AreaBoundsError};
pub use dedup::{DedupOutcome, StreetDeduplicator};
pub use highway::HighwayTypeTable;
pub use normalizer::{NormalizerConfig, RejectionReason, StreetNormalizer, Verdict};
pub use pipeline::{CleaningPipeline, CleaningReport, CleaningSummary};
pub use street::{AcceptedStreet, CleanedStreet, StreetRecord};
