//! Operator-declared incidents and collision detection.

use chrono::{DateTime, Utc};

use psim_core::{IncidentId, Position, RouteId, is_within_line_buffer};

use crate::parcel::SimulatedParcel;
use crate::route::RoutePath;

// ── IncidentType ──────────────────────────────────────────────────────────────

/// Kind of obstruction — the closed set the dashboard offers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IncidentType {
    RoadClosure,
    Traffic,
    VehicleBreakdown,
    Weather,
}

impl std::fmt::Display for IncidentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            IncidentType::RoadClosure => "road closure",
            IncidentType::Traffic => "traffic",
            IncidentType::VehicleBreakdown => "vehicle breakdown",
            IncidentType::Weather => "weather",
        };
        f.write_str(name)
    }
}

// ── Incident ──────────────────────────────────────────────────────────────────

/// A linear obstruction with a buffer zone on both sides.
///
/// Geometry (line + width) is immutable after creation.  Incidents are
/// never deleted, only marked resolved — the dashboard keeps them for its
/// history legend, and resolving one does not re-normalize parcels already
/// stopped on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Incident {
    pub id: IncidentId,
    pub kind: IncidentType,
    /// Start of the affected stretch of road.
    pub start: Position,
    /// End of the affected stretch of road.
    pub end: Position,
    /// Zone-of-effect width in metres, on each side of the line.
    pub width_m: f64,
    /// Routes known to cross the zone, captured at creation time.
    pub affected_routes: Vec<RouteId>,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub resolved: bool,
}

impl Incident {
    pub fn new(
        id:          IncidentId,
        kind:        IncidentType,
        start:       Position,
        end:         Position,
        width_m:     f64,
        description: impl Into<String>,
        now:         DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            start,
            end,
            width_m,
            affected_routes: Vec::new(),
            created_at: now,
            description: description.into(),
            resolved: false,
        }
    }

    /// Buffer width converted to the kilometres the geometry layer speaks.
    #[inline]
    pub fn buffer_km(&self) -> f64 {
        self.width_m / 1_000.0
    }

    /// `true` if `p` is inside the zone of effect.
    pub fn affects_position(&self, p: Position) -> bool {
        is_within_line_buffer(p, self.start, self.end, self.buffer_km())
    }

    /// `true` if any vertex of `path` is inside the zone of effect.
    ///
    /// Vertex-sampling only: a segment that cuts through the zone between
    /// two outside vertices is not detected.  Good enough for the dense
    /// road-following polylines the routing service emits.
    pub fn affects_path(&self, path: &RoutePath) -> bool {
        path.points().iter().any(|&p| self.affects_position(p))
    }
}

// ── Collision detection ───────────────────────────────────────────────────────

/// First unresolved, not-yet-attributed incident whose zone contains the
/// parcel's current position.
///
/// Only the end-of-tick position is tested, not the segment swept since
/// the previous tick — a fast parcel can step over a thin buffer between
/// ticks.  Known limitation, kept as-is.
///
/// Iteration order over `incidents` is whatever the backing store yields;
/// when several incidents qualify in the same tick, which one is returned
/// is unspecified.
pub fn first_collision<'a, I>(parcel: &SimulatedParcel, incidents: I) -> Option<&'a Incident>
where
    I: IntoIterator<Item = &'a Incident>,
{
    incidents.into_iter().find(|incident| {
        !incident.resolved
            && !parcel.is_attributed(&incident.id)
            && incident.affects_position(parcel.position)
    })
}
