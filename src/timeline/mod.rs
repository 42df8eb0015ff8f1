//! timeline: result rows and future trading dates.
//!
//! Purpose
//! -------
//! Turn history plus forecast values into the ordered `ResultRow` sequence
//! the host charts, placing forecast rows on dates that follow the input's
//! own trading pattern.
//!
//! Key behaviors
//! -------------
//! - [`future_trading_dates`] infers weekdays and the modal gap from the
//!   last 20 history dates.
//! - [`Timeline::merge`] and [`Timeline::merge_anchored`] concatenate history
//!   and forecast rows.

pub mod calendar;
pub mod rows;

pub use self::calendar::{CALENDAR_TAIL, TradingPattern, future_trading_dates};
pub use self::rows::{ResultRow, Timeline};
