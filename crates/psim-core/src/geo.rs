//! Geographic coordinate type and great-circle distance.
//!
//! `Position` uses `f64` latitude/longitude.  Coordinates cross the WKT
//! interchange boundary as decimal text and must survive the round trip
//! within 1e-9, which rules out single precision here.

/// A WGS-84 geographic coordinate in decimal degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
}

impl Position {
    /// The (0°, 0°) point — used as a defensive default where a caller
    /// supplies an empty path.  Never meaningful as a real location.
    pub const ORIGIN: Position = Position { lat: 0.0, lon: 0.0 };

    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in kilometres.
    ///
    /// Symmetric, and zero exactly when both coordinates are equal.
    /// Accurate to well under a metre at city scale.
    pub fn distance_km(self, other: Position) -> f64 {
        const R: f64 = 6_371.0; // mean Earth radius, km

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }

    /// `true` if `self` lies within `radius_km` of `center`.
    #[inline]
    pub fn within_radius_km(self, center: Position, radius_km: f64) -> bool {
        self.distance_km(center) <= radius_km
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
