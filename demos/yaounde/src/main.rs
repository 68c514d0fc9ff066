//! yaounde — scripted delivery run over a synthetic Yaoundé hub network.
//!
//! Plays the role of the dashboard driver: admits parcels with precomputed
//! routes, ticks the engine at the nominal 10 Hz cadence, drops a road
//! closure across one route mid-run, and answers the resulting collision
//! with a recalculated detour — exactly the loop the presentation layer
//! runs in the browser, minus the map.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;

use psim_core::{IncidentId, ParcelId, Position, RouteId};
use psim_engine::{
    HubRecord, IncidentType, ParcelRecord, RouteRecord, SimulationState, SpeedMultiplier,
    config::NOMINAL_TICK_MS,
};
use psim_wkt::{parse_line_string, to_line_string};

// ── Scenario constants ────────────────────────────────────────────────────────

const TICK_MS: f64 = NOMINAL_TICK_MS as f64;
const SPEED: SpeedMultiplier = SpeedMultiplier::X10;
const TOTAL_TICKS: u32 = 600; // one simulated minute of driver time

/// Tick at which the operator draws the road closure.
const INCIDENT_TICK: u32 = 100;
/// Ticks the pretend routing service needs for a recalculation.
const REROUTE_DELAY_TICKS: u32 = 30;

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn hubs() -> Vec<HubRecord> {
    let hub = |id: &str, address: &str, lat: f64, lon: f64| HubRecord {
        id: id.into(),
        address: address.to_owned(),
        latitude: lat,
        longitude: lon,
        kind: "HUB".to_owned(),
    };
    vec![
        hub("hub-poste", "Poste Centrale", 3.8480, 11.5021),
        hub("hub-bastos", "Bastos", 3.8860, 11.5140),
        hub("hub-mvan", "Mvan", 3.8230, 11.4950),
    ]
}

fn parcel(id: &str, code: &str, pickup: &str, delivery: &str) -> ParcelRecord {
    ParcelRecord {
        id: ParcelId::new(id),
        tracking_code: code.to_owned(),
        current_state: "CREATED".to_owned(),
        pickup_location: pickup.to_owned(),
        delivery_location: delivery.to_owned(),
        sender_name: Some("Demo sender".to_owned()),
        recipient_name: Some("Demo recipient".to_owned()),
        weight_kg: Some(2.5),
        petri_net_id: None,
    }
}

/// Build a route record from WKT the way the routing service would:
/// distance from the geometry, duration from the 40 km/h base speed.
fn route_record(id: &str, wkt: &str) -> Result<RouteRecord> {
    let points = parse_line_string(wkt).context("scenario geometry must be well-formed")?;
    let distance_km = psim_core::path_length_km(&points);
    Ok(RouteRecord {
        id: RouteId::new(id),
        route_geometry: wkt.to_owned(),
        total_distance_km: distance_km,
        estimated_duration_min: distance_km / 40.0 * 60.0,
        routing_service: Some(psim_engine::RoutingAlgorithm::Dijkstra),
        traffic_factor: Some(1.0),
        is_active: Some(true),
    })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== yaounde — psim delivery scenario ===");
    println!("Ticks: {TOTAL_TICKS} × {TICK_MS} ms at {SPEED}");
    println!();

    let mut now: DateTime<Utc> =
        DateTime::from_timestamp(1_700_000_000, 0).expect("fixed reference timestamp");

    let mut state = SimulationState::new(hubs());
    state.set_playing(true);
    state.set_speed(SPEED);

    // Routes as the routing service would deliver them (lon-first WKT).
    let to_bastos = route_record(
        "r-bastos",
        "LINESTRING(11.5021 3.848, 11.506 3.856, 11.5085 3.865, 11.51 3.876, 11.514 3.886)",
    )?;
    let to_mvan = route_record(
        "r-mvan",
        "LINESTRING(11.5021 3.848, 11.5 3.84, 11.4975 3.832, 11.495 3.823)",
    )?;

    let p1 = state.admit_parcel(parcel("p-1", "TRK-0001", "hub-poste", "hub-bastos"), Some(&to_bastos), now);
    let p2 = state.admit_parcel(parcel("p-2", "TRK-0002", "hub-poste", "hub-mvan"), Some(&to_mvan), now);
    // Routing found no path for this one — it stays routeless but visible.
    let p3 = state.admit_parcel(parcel("p-3", "TRK-0003", "hub-mvan", "hub-bastos"), None, now);

    state.start_parcel(&p1, now)?;
    state.start_parcel(&p2, now)?;
    println!("Admitted {} parcels ({} routeless)", state.parcels.len(), 1);

    // (parcel, tick at which the recalculated route arrives)
    let mut pending_reroutes: Vec<(ParcelId, u32)> = Vec::new();

    for tick in 0..TOTAL_TICKS {
        now += chrono::Duration::milliseconds(TICK_MS as i64);

        if tick == INCIDENT_TICK {
            let affected = state.place_incident(
                IncidentId::new("inc-1"),
                IncidentType::RoadClosure,
                Position::new(3.865, 11.5035),
                Position::new(3.865, 11.5135),
                80.0,
                "Boulevard closed for roadworks",
                now,
            );
            println!("[t{tick}] road closure placed, {} route(s) affected", affected.len());
        }

        let outcome = state.advance(TICK_MS, SPEED, now);
        state = outcome.state;

        for delivered in &outcome.delivered {
            let code = &state.parcels[delivered].tracking_code;
            println!("[t{tick}] {code} delivered");
        }
        for collision in &outcome.collisions {
            let code = &state.parcels[&collision.parcel].tracking_code;
            println!("[t{tick}] {code} blocked by incident {}", collision.incident);
            pending_reroutes.push((collision.parcel.clone(), tick + REROUTE_DELAY_TICKS));
        }

        // Deliver recalculated routes that are "back from the network".
        let due: Vec<ParcelId> = pending_reroutes
            .iter()
            .filter(|(_, at)| *at == tick)
            .map(|(id, _)| id.clone())
            .collect();
        for id in due {
            let detour = detour_for(&state, &id)?;
            state.apply_route(&id, &detour, now)?;
            let code = &state.parcels[&id].tracking_code;
            println!("[t{tick}] {code} rerouted via {}", detour.id);
        }
    }

    // ── Summary ───────────────────────────────────────────────────────────
    let stats = state.stats();
    println!();
    println!("{:<10} {:<10} {:>9} {:<24}", "Tracking", "State", "Progress", "Position");
    println!("{}", "-".repeat(56));
    for id in [&p1, &p2, &p3] {
        let p = &state.parcels[id];
        println!(
            "{:<10} {:<10} {:>8.1}% {:<24}",
            p.tracking_code,
            p.state.to_string(),
            p.progress * 100.0,
            p.position.to_string(),
        );
    }
    println!();
    println!(
        "Totals: {} parcels, {} in transit, {} delivered, {} with incidents",
        stats.total, stats.in_transit, stats.delivered, stats.with_incidents
    );
    println!(
        "Distance tracked: {:.2} km, mean speed {:.0} km/h",
        stats.total_distance_km, stats.average_speed_kmh
    );

    Ok(())
}

/// Stand-in for the routing service's recalculation: a detour from the
/// parcel's current position swinging east around the closure, back to its
/// destination.
fn detour_for(state: &SimulationState, id: &ParcelId) -> Result<RouteRecord> {
    let p = &state.parcels[id];
    info!("requesting recalculation for {}", p.tracking_code);
    let wkt = to_line_string(&[
        p.position,
        Position::new(3.8700, 11.5180),
        Position::new(3.8860, 11.5140),
    ]);
    route_record("r-detour-1", &wkt)
}
