//! Haversine distance provider (fallback when no routing service is configured).
//!
//! Uses great-circle distance in meters. Less accurate than a road network
//! (ignores streets entirely) but always available and deterministic.

use crate::error::DistanceError;
use crate::stop::Location;
use crate::traits::DistanceProvider;

/// Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Straight-line distance provider.
///
/// `detour_factor` scales the great-circle distance to roughly account for
/// streets not running in straight lines.
#[derive(Debug, Clone)]
pub struct HaversineDistance {
    pub detour_factor: f64,
}

impl Default for HaversineDistance {
    fn default() -> Self {
        Self { detour_factor: 1.0 }
    }
}

impl HaversineDistance {
    pub fn new(detour_factor: f64) -> Self {
        Self { detour_factor }
    }

    /// Great-circle distance between two points in meters.
    pub fn haversine_m(from: Location, to: Location) -> f64 {
        let lat1_rad = from.lat.to_radians();
        let lat2_rad = to.lat.to_radians();
        let delta_lat = (to.lat - from.lat).to_radians();
        let delta_lng = (to.lng - from.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_M * c
    }
}

impl DistanceProvider for HaversineDistance {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        Ok(Self::haversine_m(from, to) * self.detour_factor)
    }
}
