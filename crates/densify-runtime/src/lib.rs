//! Densify Runtime: the iteration loop and its diagnostics.
//!
//! `IterationController` owns the evolving summary and steps it through
//! `GapAnalyzer` and `Densifier` once per pass, recording an
//! `IterationRecord` each time. `DensityMetric` turns those records into
//! diagnostics.

pub mod controller;
pub mod densifier;
pub mod gap;
pub mod metric;
pub mod timeout;
pub mod types;

pub use controller::{DensificationRun, IterationController};
pub use densifier::{Densifier, DensifyOutcome, Replacement};
pub use gap::{EntityCounter, GapAnalyzer};
pub use metric::{DensityMetric, DensityValue};
pub use timeout::{TimeoutExtractor, TimeoutScorer};
pub use types::*;
