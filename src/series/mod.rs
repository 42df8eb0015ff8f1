//! series: validated price series and the transforms every analysis reuses.
//!
//! Purpose
//! -------
//! Own the data model shared by all analysis paths (price points, series,
//! stocks, symbol sets) and the leaf utilities built on it: differencing,
//! min-max normalization, lagged-feature construction, and date alignment.
//!
//! Key behaviors
//! -------------
//! - [`Series`] validates ordering and finiteness once at construction.
//! - [`transforms`] provides each transform together with its inverse
//!   ([`Differenced::integrate`], [`denormalize`]) so forecasts return to the
//!   real price level.
//! - [`build_lagged_dataset`] turns a scalar series into the supervised
//!   `(features, targets)` pair consumed by the lag regressors.
//! - [`align`] / [`align_many`] inner-join series on their dates for pairwise
//!   and multivariate methods.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing in this subtree mutates a borrowed series; every transform
//!   returns fresh buffers.
//! - Length requirements are reported as `AnalysisError::InsufficientData`
//!   with the required and actual counts.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its edge cases (constant series,
//!   `order >= len`, `len <= lag`, disjoint dates).

pub mod align;
pub mod lagged;
pub mod transforms;
pub mod types;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::align::{Aligned, align, align_many};
pub use self::lagged::{LaggedDataset, build_lagged_dataset};
pub use self::transforms::{
    Differenced, NORMALIZATION_EPSILON, Normalization, denormalize, difference, integrate,
    log_returns, normalize, normalize_flagged, scale_by_last,
};
pub use self::types::{PricePoint, Series, Stock, StockSet};
