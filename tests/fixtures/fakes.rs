//! Deterministic stand-ins for the mapping service.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use rota_planner::error::DistanceError;
use rota_planner::stop::{Location, ResolvedStop, StopKey, Urgency};
use rota_planner::traits::{DistanceProvider, Geocoder};

/// Resolves only the addresses it was told about.
#[derive(Default)]
pub struct FakeGeocoder {
    known: HashMap<String, Location>,
    calls: AtomicUsize,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, address: &str, location: Location) -> Self {
        self.known.insert(address.to_string(), location);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, address: &str) -> Option<Location> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.known.get(address).copied()
    }
}

/// Planar distance on raw coordinates.
pub struct Euclidean;

impl DistanceProvider for Euclidean {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        Ok(((from.lat - to.lat).powi(2) + (from.lng - to.lng).powi(2)).sqrt())
    }
}

/// Explicit directed distances; unknown pairs are `fallback`.
pub struct TableDistance {
    table: HashMap<(u64, u64, u64, u64), f64>,
    fallback: f64,
}

fn bits(from: Location, to: Location) -> (u64, u64, u64, u64) {
    (
        from.lat.to_bits(),
        from.lng.to_bits(),
        to.lat.to_bits(),
        to.lng.to_bits(),
    )
}

impl TableDistance {
    pub fn new(fallback: f64) -> Self {
        Self {
            table: HashMap::new(),
            fallback,
        }
    }

    pub fn set(mut self, from: Location, to: Location, value: f64) -> Self {
        self.table.insert(bits(from, to), value);
        self
    }
}

impl DistanceProvider for TableDistance {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        Ok(self.table.get(&bits(from, to)).copied().unwrap_or(self.fallback))
    }
}

/// Records every lookup made through it.
pub struct Recording<P> {
    inner: P,
    calls: Mutex<Vec<(Location, Location)>>,
}

impl<P> Recording<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(Location, Location)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl<P: DistanceProvider> DistanceProvider for Recording<P> {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        self.calls.lock().unwrap().push((from, to));
        self.inner.distance(from, to)
    }
}

/// Succeeds for the first `ok_calls` lookups, then fails every time.
pub struct FailAfter<P> {
    inner: P,
    ok_calls: usize,
    calls: AtomicUsize,
}

impl<P> FailAfter<P> {
    pub fn new(inner: P, ok_calls: usize) -> Self {
        Self {
            inner,
            ok_calls,
            calls: AtomicUsize::new(0),
        }
    }
}

impl<P: DistanceProvider> DistanceProvider for FailAfter<P> {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.ok_calls {
            return Err(DistanceError::Service {
                status: "UNKNOWN_ERROR".to_string(),
                message: "simulated outage".to_string(),
            });
        }
        self.inner.distance(from, to)
    }
}

pub fn stop(key: usize, urgency: Urgency, lat: f64, lng: f64) -> ResolvedStop {
    ResolvedStop::new(StopKey(key), format!("Parada {key}"), urgency, Location::new(lat, lng))
}

pub fn normal(key: usize, lat: f64, lng: f64) -> ResolvedStop {
    stop(key, Urgency::Normal, lat, lng)
}

pub fn urgent(key: usize, lat: f64, lng: f64) -> ResolvedStop {
    stop(key, Urgency::Urgent, lat, lng)
}

pub fn keys(stops: &[ResolvedStop]) -> Vec<usize> {
    stops.iter().map(|stop| stop.key.0).collect()
}
