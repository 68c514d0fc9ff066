//! WKT text → [`Position`] parsing.

use log::warn;

use psim_core::Position;

use crate::{WktError, WktResult};

/// Parse a WKT `LINESTRING` into an ordered point sequence.
///
/// Accepts the keyword case-insensitively and tolerates whitespace between
/// the keyword and the opening parenthesis.  Any token that does not parse
/// as two finite numbers fails the whole linestring.
///
/// ```
/// use psim_core::Position;
/// use psim_wkt::parse_line_string;
///
/// let path = parse_line_string("LINESTRING(11.502 3.848, 11.510 3.850)").unwrap();
/// assert_eq!(path[0], Position::new(3.848, 11.502));
/// ```
pub fn parse_line_string(text: &str) -> WktResult<Vec<Position>> {
    line_string(text).inspect_err(|e| warn!("discarding malformed LINESTRING: {e}"))
}

/// Parse a WKT `POINT` into a single [`Position`].
///
/// Returns an error — never a default point — on malformed input, so
/// callers can distinguish "no data" from the real (0°, 0°) coordinate.
pub fn parse_point(text: &str) -> WktResult<Position> {
    point(text).inspect_err(|e| warn!("discarding malformed POINT: {e}"))
}

// ── Internals ─────────────────────────────────────────────────────────────────

fn line_string(text: &str) -> WktResult<Vec<Position>> {
    let body = geometry_body(text, "LINESTRING")?;
    body.split(',').map(coordinate_pair).collect()
}

fn point(text: &str) -> WktResult<Position> {
    coordinate_pair(geometry_body(text, "POINT")?)
}

/// Strip `KEYWORD ( … )` and return the inner coordinate text.
fn geometry_body<'a>(text: &'a str, keyword: &'static str) -> WktResult<&'a str> {
    let trimmed = text.trim();

    // `get` instead of slicing: a multibyte character straddling the
    // keyword boundary must parse-fail, not panic.
    let head = trimmed.get(..keyword.len());
    if head.is_none_or(|h| !h.eq_ignore_ascii_case(keyword)) {
        return Err(WktError::UnexpectedKeyword { expected: keyword, input: clip(trimmed) });
    }

    let rest = trimmed[keyword.len()..].trim_start();
    let body = rest
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| WktError::Unbalanced(clip(trimmed)))?
        .trim();

    if body.is_empty() {
        return Err(WktError::Empty(keyword));
    }
    Ok(body)
}

/// Parse one `<lon> <lat>` token into an internal `(lat, lon)` position.
fn coordinate_pair(token: &str) -> WktResult<Position> {
    let mut fields = token.split_whitespace();
    let (Some(lon), Some(lat), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(WktError::BadCoordinate(clip(token)));
    };

    // str::parse accepts "NaN" and "inf" — reject them explicitly.
    let lon: f64 = lon.parse().map_err(|_| WktError::BadCoordinate(clip(token)))?;
    let lat: f64 = lat.parse().map_err(|_| WktError::BadCoordinate(clip(token)))?;
    if !lon.is_finite() || !lat.is_finite() {
        return Err(WktError::BadCoordinate(clip(token)));
    }

    Ok(Position::new(lat, lon))
}

/// Bound quoted input in error messages.
fn clip(s: &str) -> String {
    const MAX: usize = 64;
    if s.len() <= MAX {
        s.to_owned()
    } else {
        let cut = (0..=MAX).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
        format!("{}…", &s[..cut])
    }
}
