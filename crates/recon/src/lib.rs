//! `bucketlens-recon`: versioned object reconciliation and distribution analysis.
//!
//! Pure engine crate: receives fully materialized listings, returns classified
//! outcomes and statistics. The only IO lives in [`listing`], which loads
//! exported listings before the engine runs.

pub mod classify;
pub mod distribution;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod group;
pub mod listing;
pub mod model;

pub use distribution::{analyze, findings};
pub use engine::{reconcile, run};
pub use error::ListingError;
pub use listing::{FileListing, ListingFormat, ListingProvider};
pub use model::{
    CompareMode, CompareReport, ComparisonOutcome, ComparisonSummary, DifferenceReason,
    DistributionSummary, Finding, OutcomeStatus, VersionState, VersionedRecord,
};
