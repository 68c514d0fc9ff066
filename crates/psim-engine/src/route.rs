//! Route metadata and the decoded route polyline.

use psim_core::{PathPoint, Position, RouteId, cumulative_distances_km, interpolate_cached};
use psim_wkt::{WktResult, parse_line_string};

use crate::backend::{RouteRecord, RoutingAlgorithm};

// ── Route ─────────────────────────────────────────────────────────────────────

/// Metadata of one routing-service result.
///
/// Produced once per calculation and replaced wholesale on recalculation —
/// never mutated in place.
#[derive(Clone, Debug, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Route {
    pub id: RouteId,
    pub total_distance_km: f64,
    pub estimated_duration_min: f64,
    pub algorithm: Option<RoutingAlgorithm>,
    pub traffic_factor: Option<f64>,
    pub is_active: bool,
}

impl Route {
    /// Extract route metadata from a wire record (geometry excluded — that
    /// becomes a [`RoutePath`] via [`decode_route`]).
    pub fn from_record(record: &RouteRecord) -> Self {
        Self {
            id: record.id.clone(),
            total_distance_km: record.total_distance_km,
            estimated_duration_min: record.estimated_duration_min,
            algorithm: record.routing_service,
            traffic_factor: record.traffic_factor,
            is_active: record.is_active.unwrap_or(true),
        }
    }

    /// Estimated travel duration.
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds((self.estimated_duration_min * 60_000.0) as i64)
    }
}

// ── RoutePath ─────────────────────────────────────────────────────────────────

/// The decoded point sequence backing a route's geometry.
///
/// Geometry arrives as WKT text and is parsed exactly once; the cumulative
/// per-segment distances are computed at construction so every subsequent
/// interpolation is a short scan from the parcel's cached segment index
/// instead of a rescan of the whole polyline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoutePath {
    points: Vec<Position>,
    cumulative_km: Vec<f64>,
}

impl RoutePath {
    /// An empty path — what a routeless parcel carries.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Position>) -> Self {
        let cumulative_km = cumulative_distances_km(&points);
        Self { points, cumulative_km }
    }

    #[inline]
    pub fn points(&self) -> &[Position] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<Position> {
        self.points.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<Position> {
        self.points.last().copied()
    }

    /// Geometric length of the polyline in kilometres.
    ///
    /// May differ slightly from the route's reported `total_distance_km`
    /// (the routing service measures along the road network).
    pub fn length_km(&self) -> f64 {
        self.cumulative_km.last().copied().unwrap_or(0.0)
    }

    /// Interpolate a point at `progress ∈ [0, 1]` of the path length.
    ///
    /// `hint` is the segment index from the previous tick; see
    /// [`interpolate_cached`] for the fallback rules.
    pub fn interpolate(&self, progress: f64, hint: usize) -> PathPoint {
        interpolate_cached(&self.points, &self.cumulative_km, progress, hint)
    }
}

/// Decode a wire record into route metadata plus its parsed polyline.
///
/// Fails (whole, never partially) if the geometry text is malformed.
pub fn decode_route(record: &RouteRecord) -> WktResult<(Route, RoutePath)> {
    let points = parse_line_string(&record.route_geometry)?;
    Ok((Route::from_record(record), RoutePath::from_points(points)))
}
