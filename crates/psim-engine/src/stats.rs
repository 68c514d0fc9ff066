//! Aggregate display statistics.

use crate::parcel::{ParcelState, SimulatedParcel};

/// The numbers the dashboard's stats strip shows.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SimulationStats {
    pub total: usize,
    pub in_transit: usize,
    pub delivered: usize,
    pub with_incidents: usize,
    /// Sum of route distances; routeless parcels contribute 0.
    pub total_distance_km: f64,
    /// Arithmetic mean of parcel speeds; 0 when there are no parcels.
    pub average_speed_kmh: f64,
}

impl SimulationStats {
    /// Pure fold over a parcel collection.
    pub fn collect<'a, I>(parcels: I) -> Self
    where
        I: IntoIterator<Item = &'a SimulatedParcel>,
    {
        let mut stats = SimulationStats::default();
        let mut speed_sum = 0.0;

        for parcel in parcels {
            stats.total += 1;
            match parcel.state {
                ParcelState::Transit => stats.in_transit += 1,
                ParcelState::Delivered => stats.delivered += 1,
                ParcelState::Incident => stats.with_incidents += 1,
                ParcelState::Planned | ParcelState::Failed => {}
            }
            stats.total_distance_km += parcel.route_distance_km();
            speed_sum += parcel.speed_kmh;
        }

        if stats.total > 0 {
            stats.average_speed_kmh = speed_sum / stats.total as f64;
        }
        stats
    }
}
