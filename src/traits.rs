//! Collaborator traits for the routing planner.
//!
//! The planner never talks to a mapping service directly. Concrete clients
//! implement these traits and are injected at construction time, so tests can
//! swap in deterministic fakes.

use std::sync::Arc;

use crate::error::DistanceError;
use crate::stop::Location;

/// Resolves free-text addresses to coordinates.
pub trait Geocoder {
    /// Returns `None` when the address cannot be resolved. Implementations
    /// must not panic or leak transport errors here; log and return `None`.
    fn geocode(&self, address: &str) -> Option<Location>;
}

/// Travel distance (or cost) between two locations.
///
/// Not assumed symmetric, nor to satisfy the triangle inequality. Values must
/// be comparable across all calls made for one request.
pub trait DistanceProvider {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError>;
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for &T {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        (**self).distance(from, to)
    }
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for Box<T> {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        (**self).distance(from, to)
    }
}

impl<T: DistanceProvider + ?Sized> DistanceProvider for Arc<T> {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        (**self).distance(from, to)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn geocode(&self, address: &str) -> Option<Location> {
        (**self).geocode(address)
    }
}

impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    fn geocode(&self, address: &str) -> Option<Location> {
        (**self).geocode(address)
    }
}

/// Adapts a closure into a [`DistanceProvider`].
pub struct FnDistance<F>(pub F);

impl<F> DistanceProvider for FnDistance<F>
where
    F: Fn(Location, Location) -> Result<f64, DistanceError>,
{
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        (self.0)(from, to)
    }
}

/// Travel mode requested from routing services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
        }
    }
}
