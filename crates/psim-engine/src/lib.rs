//! `psim-engine` — the geometric simulation core of the logistics demo.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`backend`]  | Wire records from the routing/parcel backend                    |
//! | [`route`]    | `Route` + `RoutePath` (decoded geometry with cached distances)  |
//! | [`parcel`]   | `SimulatedParcel`, `ParcelState`, per-parcel transitions        |
//! | [`incident`] | `Incident`, `IncidentType`, collision detection                 |
//! | [`stats`]    | `SimulationStats` aggregate fold                                |
//! | [`sim`]      | `SimulationState` + the externally-driven `advance` tick        |
//! | [`config`]   | Base speed, delivery threshold, speed multipliers               |
//! | [`error`]    | `SimError`, `SimResult<T>`                                      |
//!
//! # Movement model
//!
//! Parcels move at a constant base speed along a decoded route polyline.
//! An external driver (the presentation layer) calls
//! [`SimulationState::advance`] once per animation frame with the elapsed
//! wall time; the engine has no timer of its own and is cadence-agnostic.
//! Each tick converts elapsed time to distance, distance to a progress
//! fraction of the route's total length, and re-interpolates the parcel's
//! position on the polyline.  Crossing [`config::DELIVERY_THRESHOLD`]
//! delivers the parcel; entering an unresolved incident's buffered segment
//! flags it for route recalculation.
//!
//! Every operation is a pure transformation of explicit state snapshots:
//! inputs in, new state out, `now` passed as an argument.  Identical inputs
//! give identical outputs, which keeps replays and tests deterministic.

pub mod backend;
pub mod config;
pub mod error;
pub mod incident;
pub mod parcel;
pub mod route;
pub mod sim;
pub mod stats;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use backend::{HubRecord, ParcelRecord, RouteRecord, RoutingAlgorithm};
pub use config::{BASE_SPEED_KMH, DELIVERY_THRESHOLD, SpeedMultiplier};
pub use error::{SimError, SimResult};
pub use incident::{Incident, IncidentType, first_collision};
pub use parcel::{ParcelState, SimulatedParcel};
pub use route::{Route, RoutePath, decode_route};
pub use sim::{CollisionEvent, SimulationState, TickOutcome};
pub use stats::SimulationStats;
