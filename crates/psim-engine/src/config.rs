//! Engine constants and the speed-multiplier control.

use std::fmt;

/// Base travel speed in km/h — average urban driving speed.
///
/// Constant for every parcel; this demo has no acceleration or
/// traffic-aware speed model.
pub const BASE_SPEED_KMH: f64 = 40.0;

/// Progress fraction at which a parcel counts as delivered.
///
/// Slightly below 1.0 so accumulated floating-point error in the progress
/// sum cannot strand a parcel metres short of its destination.
pub const DELIVERY_THRESHOLD: f64 = 0.99;

/// Nominal tick cadence of the reference driver (10 Hz).  The engine never
/// reads this — it consumes whatever elapsed time each [`advance`] call
/// reports — but drivers and tests want a sensible default.
///
/// [`advance`]: crate::SimulationState::advance
pub const NOMINAL_TICK_MS: u64 = 100;

/// Simulation speed multiplier — the closed set offered by the dashboard.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum SpeedMultiplier {
    #[default]
    X1,
    X2,
    X5,
    X10,
}

impl SpeedMultiplier {
    pub const ALL: [SpeedMultiplier; 4] = [
        SpeedMultiplier::X1,
        SpeedMultiplier::X2,
        SpeedMultiplier::X5,
        SpeedMultiplier::X10,
    ];

    /// The scalar applied to parcel speed during a tick.
    #[inline]
    pub fn factor(self) -> f64 {
        match self {
            SpeedMultiplier::X1 => 1.0,
            SpeedMultiplier::X2 => 2.0,
            SpeedMultiplier::X5 => 5.0,
            SpeedMultiplier::X10 => 10.0,
        }
    }
}

impl fmt::Display for SpeedMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.factor() as u32)
    }
}
