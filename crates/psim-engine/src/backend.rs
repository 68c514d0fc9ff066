//! Wire records consumed from the backend services.
//!
//! The delivery backend and routing service speak camelCase JSON.  These
//! records are deserialized once at the API boundary and then carried
//! read-only inside the simulation — the engine never mutates them and
//! never calls the network itself.

use serde::{Deserialize, Serialize};

use psim_core::{HubId, ParcelId, Position, RouteId};

// ── Routing algorithm ─────────────────────────────────────────────────────────

/// Routing algorithm tag — the closed set the routing service accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingAlgorithm {
    Basic,
    Dijkstra,
    #[serde(alias = "ASTAR")]
    AStar,
    Osrm,
}

impl std::fmt::Display for RoutingAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RoutingAlgorithm::Basic => "basic",
            RoutingAlgorithm::Dijkstra => "dijkstra",
            RoutingAlgorithm::AStar => "a-star",
            RoutingAlgorithm::Osrm => "osrm",
        };
        f.write_str(name)
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// A parcel as the delivery backend reports it.
///
/// `current_state` and `petri_net_id` identify the parcel's server-side
/// lifecycle in the Petri-net workflow service; the engine only carries
/// them for display correlation and never interprets them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParcelRecord {
    pub id: ParcelId,
    pub tracking_code: String,
    pub current_state: String,
    pub pickup_location: String,
    pub delivery_location: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub petri_net_id: Option<String>,
}

/// A computed route as the routing service returns it.
///
/// `route_geometry` is WKT `LINESTRING` text — decode it with
/// [`decode_route`][crate::route::decode_route] before simulating.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    pub id: RouteId,
    pub route_geometry: String,
    pub total_distance_km: f64,
    pub estimated_duration_min: f64,
    #[serde(default)]
    pub routing_service: Option<RoutingAlgorithm>,
    #[serde(default)]
    pub traffic_factor: Option<f64>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// A hub — a static origin/destination reference point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubRecord {
    pub id: HubId,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: String,
}

impl HubRecord {
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }
}
