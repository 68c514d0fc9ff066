//! Per-parcel simulation state and lifecycle transitions.
//!
//! # State machine
//!
//! ```text
//! PLANNED ──start──▶ TRANSIT ──progress ≥ threshold──▶ DELIVERED (terminal)
//!                      │  ▲
//!        collision ────┘  └──── apply_route (recalculation succeeded)
//!                      ▼
//!                   INCIDENT ──fail (external policy)──▶ FAILED (terminal)
//! ```
//!
//! Every transition is a pure function: it consumes `&self` plus explicit
//! inputs (including `now`) and returns a fresh parcel value.  Transitions
//! that do not apply in the current state return an unchanged copy rather
//! than an error — a routeless or already-delivered parcel is a valid,
//! displayable thing, not a failure.

use chrono::{DateTime, Utc};

use psim_core::{IncidentId, Position};

use crate::backend::ParcelRecord;
use crate::config::{BASE_SPEED_KMH, DELIVERY_THRESHOLD};
use crate::route::{Route, RoutePath};

// ── ParcelState ───────────────────────────────────────────────────────────────

/// Lifecycle state of a simulated parcel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParcelState {
    /// Created, movement not yet started.
    Planned,
    /// Moving along its route.
    Transit,
    /// Stopped on an incident, waiting for a recalculated route.
    Incident,
    /// Arrived.  Terminal.
    Delivered,
    /// Recalculation gave up.  Terminal.
    Failed,
}

impl ParcelState {
    /// Terminal states admit no further transitions.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ParcelState::Delivered | ParcelState::Failed)
    }
}

impl std::fmt::Display for ParcelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParcelState::Planned => "planned",
            ParcelState::Transit => "transit",
            ParcelState::Incident => "incident",
            ParcelState::Delivered => "delivered",
            ParcelState::Failed => "failed",
        };
        f.write_str(name)
    }
}

// ── SimulatedParcel ───────────────────────────────────────────────────────────

/// The moving entity of the simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulatedParcel {
    /// Backend parcel id (also the key in the simulation's parcel map).
    pub id: psim_core::ParcelId,
    /// Human-readable tracking code shown in the dashboard.
    pub tracking_code: String,
    /// Read-only backend payload (sender, recipient, workflow status, …).
    pub record: ParcelRecord,

    /// Current route metadata; `None` while the routing service has not
    /// produced (or could not produce) a route.
    pub route: Option<Route>,
    /// Decoded route geometry.  Empty whenever `route` is `None`.
    pub path: RoutePath,
    /// Current position.  Always on `path` while a route is attached.
    pub position: Position,

    /// Fraction of the route's total distance travelled, in `[0, 1]`.
    /// Exactly 1.0 iff the parcel is `Delivered`.
    pub progress: f64,
    /// Segment index of the last interpolation — scan hint for the next
    /// one, avoiding a rescan of the polyline prefix on every tick.
    pub path_index: usize,

    pub state: ParcelState,
    /// Set once, when movement begins.
    pub started_at: Option<DateTime<Utc>>,
    /// Arrival estimate from the route's duration; refreshed on reroute.
    pub estimated_arrival: Option<DateTime<Utc>>,
    /// Set exactly once, on delivery.
    pub delivered_at: Option<DateTime<Utc>>,

    /// Effective speed in km/h.  Constant in this design.
    pub speed_kmh: f64,

    /// Incidents already attributed to this parcel — re-checking them
    /// would retrigger a recalculation for an obstacle already handled.
    pub attributed_incidents: Vec<IncidentId>,
}

impl SimulatedParcel {
    /// Create a parcel with a computed route, `Planned`, at the path head.
    pub fn routed(
        record: ParcelRecord,
        route:  Route,
        path:   RoutePath,
        now:    DateTime<Utc>,
    ) -> Self {
        let estimated_arrival = Some(now + route.duration());
        let position = path.first().unwrap_or(Position::ORIGIN);
        Self {
            id: record.id.clone(),
            tracking_code: record.tracking_code.clone(),
            record,
            route: Some(route),
            path,
            position,
            progress: 0.0,
            path_index: 0,
            state: ParcelState::Planned,
            started_at: None,
            estimated_arrival,
            delivered_at: None,
            speed_kmh: BASE_SPEED_KMH,
            attributed_incidents: Vec::new(),
        }
    }

    /// Create a parcel without a route (routing failed or is pending).
    ///
    /// The parcel is valid and displayable at `position`; position updates
    /// are no-ops until a route is applied.
    pub fn unrouted(record: ParcelRecord, position: Position) -> Self {
        Self {
            id: record.id.clone(),
            tracking_code: record.tracking_code.clone(),
            record,
            route: None,
            path: RoutePath::empty(),
            position,
            progress: 0.0,
            path_index: 0,
            state: ParcelState::Planned,
            started_at: None,
            estimated_arrival: None,
            delivered_at: None,
            speed_kmh: BASE_SPEED_KMH,
            attributed_incidents: Vec::new(),
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Begin movement: `Planned → Transit`, stamping the start time.
    ///
    /// Any other state returns an unchanged copy — in particular a
    /// delivered parcel can never re-enter transit.
    pub fn start(&self, now: DateTime<Utc>) -> Self {
        if self.state != ParcelState::Planned {
            return self.clone();
        }
        Self {
            state: ParcelState::Transit,
            started_at: Some(now),
            ..self.clone()
        }
    }

    /// Advance along the route by `elapsed_ms` of wall time.
    ///
    /// No-op unless the parcel is in `Transit` with a route and a
    /// non-empty path.  Crossing [`DELIVERY_THRESHOLD`] delivers the
    /// parcel: progress snaps to exactly 1.0, the position to the final
    /// path point, and `delivered_at` is stamped (once — the `Transit`
    /// guard makes a second stamp unreachable).
    ///
    /// Zero elapsed time is an identity.  A route whose total distance is
    /// zero (pickup == delivery) is treated as immediately delivered
    /// rather than dividing by zero.
    pub fn advance_position(
        &self,
        elapsed_ms:       f64,
        speed_multiplier: f64,
        now:              DateTime<Utc>,
    ) -> Self {
        if self.state != ParcelState::Transit || self.path.is_empty() {
            return self.clone();
        }
        let Some(route) = &self.route else {
            return self.clone();
        };

        let total_km = route.total_distance_km;
        let new_progress = if total_km > 0.0 {
            let hours = elapsed_ms / 3_600_000.0;
            let travelled_km = self.speed_kmh * speed_multiplier * hours;
            (self.progress + travelled_km / total_km).min(1.0)
        } else {
            1.0
        };

        let delivered = new_progress >= DELIVERY_THRESHOLD;
        let final_progress = if delivered { 1.0 } else { new_progress };

        let point = self.path.interpolate(final_progress, self.path_index);

        Self {
            position: point.position,
            progress: final_progress,
            path_index: point.segment_index,
            state: if delivered { ParcelState::Delivered } else { self.state },
            delivered_at: if delivered { Some(now) } else { self.delivered_at },
            ..self.clone()
        }
    }

    /// Replace the route wholesale after a recalculation.
    ///
    /// Progress and the segment cache reset to the head of the new path;
    /// the routing service computed the new route from the parcel's
    /// current position, so its first point *is* that position — the
    /// engine trusts this and does not verify spatial continuity.  State
    /// is forced to `Transit`: a successful recalculation resumes motion.
    /// Terminal states return an unchanged copy.
    pub fn apply_route(&self, route: Route, path: RoutePath, now: DateTime<Utc>) -> Self {
        if self.state.is_terminal() {
            return self.clone();
        }
        let estimated_arrival = Some(now + route.duration());
        let position = path.first().unwrap_or(self.position);
        Self {
            route: Some(route),
            path,
            position,
            progress: 0.0,
            path_index: 0,
            state: ParcelState::Transit,
            estimated_arrival,
            ..self.clone()
        }
    }

    /// Attribute an incident: `→ Incident`, remembering the id so the same
    /// obstacle is never attributed twice.
    ///
    /// Position and progress are untouched — the parcel stops where it is,
    /// and the `Transit` guard in [`advance_position`] keeps it there.
    ///
    /// [`advance_position`]: Self::advance_position
    pub fn attribute_incident(&self, incident: &IncidentId) -> Self {
        if self.state.is_terminal() {
            return self.clone();
        }
        let mut attributed = self.attributed_incidents.clone();
        if !attributed.contains(incident) {
            attributed.push(incident.clone());
        }
        Self {
            state: ParcelState::Incident,
            attributed_incidents: attributed,
            ..self.clone()
        }
    }

    /// Terminal failure — applied by external policy when recalculation
    /// cannot produce any route.  The engine never decides this itself.
    pub fn fail(&self) -> Self {
        if self.state == ParcelState::Delivered {
            return self.clone();
        }
        Self { state: ParcelState::Failed, ..self.clone() }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if `incident` has already been attributed to this parcel.
    #[inline]
    pub fn is_attributed(&self, incident: &IncidentId) -> bool {
        self.attributed_incidents.contains(incident)
    }

    /// Route distance in km; 0 for a routeless parcel.
    #[inline]
    pub fn route_distance_km(&self) -> f64 {
        self.route.as_ref().map_or(0.0, |r| r.total_distance_km)
    }

    /// Live arrival estimate.
    ///
    /// For a parcel in transit this projects the remaining distance at the
    /// current speed from `now`; in any other state it falls back to the
    /// stored estimate.
    pub fn eta(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let Some(route) = &self.route else {
            return self.estimated_arrival;
        };
        if self.state != ParcelState::Transit || self.speed_kmh <= 0.0 {
            return self.estimated_arrival;
        }

        let remaining_km = route.total_distance_km * (1.0 - self.progress);
        let remaining_ms = remaining_km / self.speed_kmh * 3_600_000.0;
        Some(now + chrono::Duration::milliseconds(remaining_ms as i64))
    }
}
