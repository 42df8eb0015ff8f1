//! indicators: technical indicators and custom indicator ingestion.
//!
//! Purpose
//! -------
//! Compute single-series technical indicators (RSI, EMA, MACD) as dated
//! result rows, and decode user-supplied `date,value` files into points that
//! can be analysed like any other series.
//!
//! Key behaviors
//! -------------
//! - [`compute_rsi`] applies Wilder smoothing with an epsilon guard on zero
//!   average loss.
//! - [`compute_macd`] returns the MACD line, signal line and histogram on a
//!   shared set of dates.
//! - [`parse_custom_indicator_csv`] is lenient on values (non-numeric rows are
//!   dropped) and strict on structure (bad dates fail).
//!
//! Invariants & assumptions
//! ------------------------
//! - Indicator rows carry `value` only; none of these routines forecasts.

pub mod custom;
pub mod macd;
pub mod rsi;

pub use self::custom::{DATE_FORMATS, parse_custom_indicator_csv};
pub use self::macd::{MacdOutput, MacdParams, compute_macd, ema};
pub use self::rsi::{RS_EPSILON, RsiParams, compute_rsi, rsi_values};
