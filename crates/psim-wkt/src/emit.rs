//! [`Position`] → WKT text emission.
//!
//! `f64`'s `Display` prints the shortest decimal string that parses back to
//! the same bits, so `parse_line_string(to_line_string(p)) == p` exactly
//! for finite inputs.

use psim_core::Position;

/// Format a point sequence as a WKT `LINESTRING`, longitude first.
pub fn to_line_string(path: &[Position]) -> String {
    let coords: Vec<String> = path.iter().map(|p| format!("{} {}", p.lon, p.lat)).collect();
    format!("LINESTRING({})", coords.join(", "))
}

/// Format a single position as a WKT `POINT`, longitude first.
pub fn to_point(p: Position) -> String {
    format!("POINT({} {})", p.lon, p.lat)
}
