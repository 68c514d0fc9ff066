//! Polyline utilities: length, point-to-segment distance, interpolation.
//!
//! Segment projection and within-segment interpolation treat latitude and
//! longitude as a flat plane.  At city scale the curvature error is
//! negligible; segments spanning hundreds of kilometres would drift off the
//! great circle.  All distances still come from the haversine formula in
//! [`Position::distance_km`], only the *projection* is planar.

use crate::Position;

/// Total length of a polyline in kilometres.
///
/// Paths with fewer than two points have length 0.
pub fn path_length_km(path: &[Position]) -> f64 {
    path.windows(2).map(|w| w[0].distance_km(w[1])).sum()
}

/// Cumulative distance from the path head to each point, in kilometres.
///
/// Always the same length as `path` (empty for an empty path), starting at
/// 0.0.  The last entry equals [`path_length_km`].
pub fn cumulative_distances_km(path: &[Position]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(path.len());
    if path.is_empty() {
        return cumulative;
    }
    cumulative.push(0.0);
    for w in path.windows(2) {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + w[0].distance_km(w[1]));
    }
    cumulative
}

/// Minimum distance in kilometres from `p` to the segment `[seg_start, seg_end]`.
///
/// Projects `p` onto the segment in planar lat/lon space, clamps the
/// projection parameter to `[0, 1]`, and measures the haversine distance to
/// the clamped point.  A degenerate segment (`seg_start == seg_end`) reduces
/// to the plain point distance.
pub fn point_to_segment_distance_km(p: Position, seg_start: Position, seg_end: Position) -> f64 {
    let seg_lat = seg_end.lat - seg_start.lat;
    let seg_lon = seg_end.lon - seg_start.lon;

    let len_sq = seg_lat * seg_lat + seg_lon * seg_lon;
    if len_sq == 0.0 {
        return p.distance_km(seg_start);
    }

    let p_lat = p.lat - seg_start.lat;
    let p_lon = p.lon - seg_start.lon;

    let t = ((p_lat * seg_lat + p_lon * seg_lon) / len_sq).clamp(0.0, 1.0);

    let closest = Position::new(seg_start.lat + t * seg_lat, seg_start.lon + t * seg_lon);
    p.distance_km(closest)
}

/// `true` if `p` lies within `buffer_km` of the segment `[seg_start, seg_end]`.
#[inline]
pub fn is_within_line_buffer(
    p:         Position,
    seg_start: Position,
    seg_end:   Position,
    buffer_km: f64,
) -> bool {
    point_to_segment_distance_km(p, seg_start, seg_end) <= buffer_km
}

// ── Interpolation ─────────────────────────────────────────────────────────────

/// A point on a polyline plus the index of the segment it falls on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathPoint {
    pub position:      Position,
    pub segment_index: usize,
}

/// Map a fractional distance along `path` to a concrete point.
///
/// `progress` is the fraction of the *total* polyline length, not of the
/// point count.  Interpolation within the located segment is a planar
/// per-axis lerp (see module docs).
///
/// Edge cases:
/// - empty path → [`Position::ORIGIN`] with index 0 (defensive default; the
///   caller must not rely on this being meaningful)
/// - single-point path → that point, index 0
/// - `progress <= 0` → first point, index 0
/// - `progress >= 1` → last point, index `len - 2`
///
/// When a boundary distance is shared by adjacent segments the first match
/// wins.
pub fn interpolate_along_path(path: &[Position], progress: f64) -> PathPoint {
    let cumulative = cumulative_distances_km(path);
    interpolate_cached(path, &cumulative, progress, 0)
}

/// [`interpolate_along_path`] over a precomputed cumulative-distance table,
/// scanning from `hint` instead of the path head.
///
/// `cumulative` must be the table produced by [`cumulative_distances_km`]
/// for `path`.  `hint` is a segment index from a previous call; because
/// progress only moves forward during simulation, scanning from the last
/// known segment skips the already-travelled prefix on most calls.  An
/// out-of-range or too-far hint falls back to a full scan.
pub fn interpolate_cached(
    path:       &[Position],
    cumulative: &[f64],
    progress:   f64,
    hint:       usize,
) -> PathPoint {
    if path.is_empty() {
        return PathPoint { position: Position::ORIGIN, segment_index: 0 };
    }
    if path.len() == 1 || progress <= 0.0 {
        return PathPoint { position: path[0], segment_index: 0 };
    }
    if progress >= 1.0 {
        return PathPoint {
            position:      path[path.len() - 1],
            segment_index: path.len() - 2,
        };
    }

    let total = cumulative[cumulative.len() - 1];
    let target = total * progress;

    let start = if hint < path.len() - 1 && cumulative[hint] <= target { hint } else { 0 };

    let mut segment_index = start;
    for i in start..cumulative.len() - 1 {
        if target >= cumulative[i] && target <= cumulative[i + 1] {
            segment_index = i;
            break;
        }
    }

    // Planar lerp within the located segment.
    let seg_start = cumulative[segment_index];
    let seg_len = cumulative[segment_index + 1] - seg_start;
    // Zero-length segment: both endpoints coincide, any fraction works.
    let frac = if seg_len > 0.0 { (target - seg_start) / seg_len } else { 0.0 };

    let a = path[segment_index];
    let b = path[segment_index + 1];
    PathPoint {
        position: Position::new(
            a.lat + (b.lat - a.lat) * frac,
            a.lon + (b.lon - a.lon) * frac,
        ),
        segment_index,
    }
}
