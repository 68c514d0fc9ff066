//! The aggregate simulation state and its externally-driven tick.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use psim_core::{IncidentId, ParcelId, Position, RouteId};

use crate::backend::{HubRecord, ParcelRecord, RouteRecord};
use crate::config::SpeedMultiplier;
use crate::error::{SimError, SimResult};
use crate::incident::{Incident, IncidentType, first_collision};
use crate::parcel::{ParcelState, SimulatedParcel};
use crate::route::decode_route;
use crate::stats::SimulationStats;

// ── Tick outcome ──────────────────────────────────────────────────────────────

/// A parcel entering an incident's zone of effect during a tick.
///
/// The driver reacts by requesting a route recalculation from the routing
/// service and, on success, calling [`SimulationState::apply_route`].
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionEvent {
    pub parcel: ParcelId,
    pub incident: IncidentId,
}

/// Result of one [`SimulationState::advance`] call: the next state
/// snapshot plus the events the driver must act on.
#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: SimulationState,
    /// Newly attributed incidents, one entry per affected parcel.
    pub collisions: Vec<CollisionEvent>,
    /// Parcels that reached their destination this tick.
    pub delivered: Vec<ParcelId>,
}

// ── SimulationState ───────────────────────────────────────────────────────────

/// Everything the dashboard simulates, as one snapshot value.
///
/// Held for the lifetime of a browser session only — there is no
/// persistence.  The tick operation ([`advance`][Self::advance]) is a pure
/// snapshot-in/snapshot-out function; the command methods (`admit_parcel`,
/// `resolve_incident`, …) mutate in place because they correspond to
/// one-shot operator actions between ticks, never to concurrent access.
#[derive(Clone, Debug, Default)]
pub struct SimulationState {
    pub parcels: HashMap<ParcelId, SimulatedParcel>,
    pub incidents: HashMap<IncidentId, Incident>,
    /// Static reference points; read-only for the engine.
    pub hubs: Vec<HubRecord>,

    /// Whether the driver's animation timer is running.  Carried for the
    /// presentation layer; `advance` itself never consults it — a driver
    /// that is paused simply stops calling `advance`.
    pub playing: bool,
    /// Operator-selected simulation speed.
    pub speed: SpeedMultiplier,

    // Transient UI selection, irrelevant to simulation correctness.
    pub selected_parcel: Option<ParcelId>,
    pub placement_mode: Option<IncidentType>,
}

impl SimulationState {
    pub fn new(hubs: Vec<HubRecord>) -> Self {
        Self { hubs, ..Self::default() }
    }

    // ── Parcel commands ───────────────────────────────────────────────────

    /// Admit a backend parcel into the simulation, decoding its route
    /// geometry if one was computed.
    ///
    /// A missing route, or route geometry that fails to parse, degrades to
    /// a routeless parcel positioned at its pickup hub — "no path found"
    /// is a recoverable condition, never a reason to drop the parcel.
    pub fn admit_parcel(
        &mut self,
        record: ParcelRecord,
        route:  Option<&RouteRecord>,
        now:    DateTime<Utc>,
    ) -> ParcelId {
        let id = record.id.clone();

        let parcel = match route {
            Some(route_record) => match decode_route(route_record) {
                Ok((route, path)) => SimulatedParcel::routed(record, route, path, now),
                Err(e) => {
                    warn!("parcel {id}: dropping undecodable route {}: {e}", route_record.id);
                    let position = self.fallback_position(&record.pickup_location);
                    SimulatedParcel::unrouted(record, position)
                }
            },
            None => {
                let position = self.fallback_position(&record.pickup_location);
                SimulatedParcel::unrouted(record, position)
            }
        };

        self.parcels.insert(id.clone(), parcel);
        id
    }

    /// Begin movement for `parcel` (`Planned → Transit`).
    pub fn start_parcel(&mut self, parcel: &ParcelId, now: DateTime<Utc>) -> SimResult<()> {
        let p = self.parcel_mut(parcel)?;
        *p = p.start(now);
        Ok(())
    }

    /// Apply a recalculated route to `parcel` and resume motion.
    ///
    /// Unlike admission, a geometry decode failure here is an error — the
    /// caller asked to replace a working route and needs to know it did
    /// not happen (the parcel keeps its previous route and state).
    pub fn apply_route(
        &mut self,
        parcel: &ParcelId,
        route:  &RouteRecord,
        now:    DateTime<Utc>,
    ) -> SimResult<()> {
        let (route, path) = decode_route(route)?;
        let p = self.parcel_mut(parcel)?;
        *p = p.apply_route(route, path, now);
        Ok(())
    }

    /// Mark `parcel` failed — the external recalculation policy gave up.
    pub fn fail_parcel(&mut self, parcel: &ParcelId) -> SimResult<()> {
        let p = self.parcel_mut(parcel)?;
        *p = p.fail();
        Ok(())
    }

    // ── Incident commands ─────────────────────────────────────────────────

    /// Place a new incident and record which current routes cross its
    /// zone of effect.  Returns those route ids so the caller can warn the
    /// operator or pre-emptively request recalculations.
    #[allow(clippy::too_many_arguments)]
    pub fn place_incident(
        &mut self,
        id:          IncidentId,
        kind:        IncidentType,
        start:       Position,
        end:         Position,
        width_m:     f64,
        description: impl Into<String>,
        now:         DateTime<Utc>,
    ) -> Vec<RouteId> {
        let mut incident = Incident::new(id, kind, start, end, width_m, description, now);

        incident.affected_routes = self
            .parcels
            .values()
            .filter(|p| incident.affects_path(&p.path))
            .filter_map(|p| p.route.as_ref().map(|r| r.id.clone()))
            .collect();

        let affected = incident.affected_routes.clone();
        self.incidents.insert(incident.id.clone(), incident);
        affected
    }

    /// Resolve an incident.  Its geometry stays on the map for the legend;
    /// parcels already stopped on it are not re-normalized.
    pub fn resolve_incident(&mut self, incident: &IncidentId) -> SimResult<()> {
        let inc = self
            .incidents
            .get_mut(incident)
            .ok_or_else(|| SimError::IncidentNotFound(incident.clone()))?;
        inc.resolved = true;
        Ok(())
    }

    // ── Presentation-layer toggles ────────────────────────────────────────

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn set_speed(&mut self, speed: SpeedMultiplier) {
        self.speed = speed;
    }

    pub fn select_parcel(&mut self, parcel: Option<ParcelId>) {
        self.selected_parcel = parcel;
    }

    pub fn set_placement_mode(&mut self, mode: Option<IncidentType>) {
        self.placement_mode = mode;
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn parcel(&self, id: &ParcelId) -> Option<&SimulatedParcel> {
        self.parcels.get(id)
    }

    pub fn incident(&self, id: &IncidentId) -> Option<&Incident> {
        self.incidents.get(id)
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats::collect(self.parcels.values())
    }

    // ── The tick ──────────────────────────────────────────────────────────

    /// Advance the whole simulation by `elapsed_ms` of wall time.
    ///
    /// For every parcel in `Transit`: update its position, then test the
    /// new position against the unresolved incidents.  A colliding parcel
    /// is switched to `Incident` in the returned snapshot and reported in
    /// [`TickOutcome::collisions`] so the driver can kick off a
    /// recalculation; the engine itself never awaits one.
    ///
    /// Pure: `self` is read as an immutable snapshot (the incident set is
    /// shared across all parcel checks of the tick) and a new state is
    /// returned.  Parcels are independent of each other, so the map's
    /// iteration order does not affect the result.
    pub fn advance(
        &self,
        elapsed_ms: f64,
        speed:      SpeedMultiplier,
        now:        DateTime<Utc>,
    ) -> TickOutcome {
        let mut next = self.clone();
        let mut collisions = Vec::new();
        let mut delivered = Vec::new();

        for (id, parcel) in &self.parcels {
            if parcel.state != ParcelState::Transit {
                continue;
            }

            let mut advanced = parcel.advance_position(elapsed_ms, speed.factor(), now);

            match advanced.state {
                ParcelState::Delivered => {
                    debug!("parcel {id} delivered at {}", advanced.position);
                    delivered.push(id.clone());
                }
                ParcelState::Transit => {
                    if let Some(incident) = first_collision(&advanced, self.incidents.values()) {
                        debug!("parcel {id} hit {} incident {}", incident.kind, incident.id);
                        advanced = advanced.attribute_incident(&incident.id);
                        collisions.push(CollisionEvent {
                            parcel: id.clone(),
                            incident: incident.id.clone(),
                        });
                    }
                }
                _ => {}
            }

            next.parcels.insert(id.clone(), advanced);
        }

        TickOutcome { state: next, collisions, delivered }
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn parcel_mut(&mut self, id: &ParcelId) -> SimResult<&mut SimulatedParcel> {
        self.parcels
            .get_mut(id)
            .ok_or_else(|| SimError::ParcelNotFound(id.clone()))
    }

    /// Position for a parcel that has no route yet: its pickup hub if the
    /// location string names one we know, the defensive origin otherwise.
    fn fallback_position(&self, location: &str) -> Position {
        self.hubs
            .iter()
            .find(|h| h.id.as_str() == location)
            .map(HubRecord::position)
            .unwrap_or(Position::ORIGIN)
    }
}
