//! `psim-core` — foundational types for the psim logistics simulation.
//!
//! This crate is a dependency of every other `psim-*` crate.  It has no
//! `psim-*` dependencies and no required external ones (only optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                                  |
//! |----------|-----------------------------------------------------------|
//! | [`geo`]  | `Position`, haversine distance, radius check              |
//! | [`path`] | polyline length, point-to-segment distance, interpolation |
//! | [`ids`]  | `ParcelId`, `RouteId`, `IncidentId`, `HubId`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod geo;
pub mod ids;
pub mod path;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::Position;
pub use ids::{HubId, IncidentId, ParcelId, RouteId};
pub use path::{
    PathPoint, cumulative_distances_km, interpolate_along_path, interpolate_cached,
    is_within_line_buffer, path_length_km, point_to_segment_distance_km,
};
