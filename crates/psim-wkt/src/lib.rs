//! `psim-wkt` — the WKT geometry interchange boundary.
//!
//! The routing backend ships route geometry as Well-Known Text:
//!
//! ```text
//! POINT(11.502 3.848)
//! LINESTRING(11.502 3.848, 11.510 3.850, 11.516 3.866)
//! ```
//!
//! The wire format orders **longitude before latitude**; everything inside
//! the simulation uses `(lat, lon)`.  Parsing reverses the field order,
//! emission restores it.
//!
//! # Failure model
//!
//! A single malformed or non-finite token fails the whole parse — callers
//! get an explicit [`WktError`], never partial data and never a default
//! zero point.  Failures are additionally logged at `warn` level so a bad
//! backend payload is visible without the caller having to plumb the error
//! to a log sink itself.
//!
//! | Module  | Contents                                |
//! |---------|------------------------------------------|
//! | [`parse`] | `parse_point`, `parse_line_string`     |
//! | [`emit`]  | `to_point`, `to_line_string`           |
//! | [`error`] | `WktError`, `WktResult<T>`             |

pub mod emit;
pub mod error;
pub mod parse;

#[cfg(test)]
mod tests;

pub use emit::{to_line_string, to_point};
pub use error::{WktError, WktResult};
pub use parse::{parse_line_string, parse_point};
