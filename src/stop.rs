//! Delivery stops and the locations they resolve to.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A resolved geographic point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Coordinates as a `(lat, lng)` tuple.
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Default depot ("Base de Entregas").
pub const DEPOT: Location = Location::new(-23.514397, -46.187431);

/// Wire value of the `tipo` field that marks a stop as urgent.
pub const URGENT_TAG: &str = "urgente";

/// Priority tier of a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Urgency {
    Urgent,
    #[default]
    Normal,
}

impl Urgency {
    /// Only the exact tag `urgente` is urgent; anything else, including no tag, is normal.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(URGENT_TAG) => Urgency::Urgent,
            _ => Urgency::Normal,
        }
    }

    pub fn is_urgent(self) -> bool {
        matches!(self, Urgency::Urgent)
    }
}

/// Unique key assigned to a stop at ingestion.
///
/// Two stops with the same label and coordinates still carry distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopKey(pub usize);

/// A delivery point as received, before or after geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub key: StopKey,
    pub address: String,
    pub urgency: Urgency,
    pub location: Option<Location>,
    /// Client fields other than the address (`tipo` included), echoed back untouched.
    pub extra: Map<String, Value>,
}

impl Stop {
    pub fn new(key: StopKey, address: impl Into<String>, urgency: Urgency) -> Self {
        Self {
            key,
            address: address.into(),
            urgency,
            location: None,
            extra: Map::new(),
        }
    }

    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Converts into a [`ResolvedStop`], or `None` when geocoding never succeeded.
    pub fn resolve(self) -> Option<ResolvedStop> {
        let location = self.location?;
        Some(ResolvedStop {
            key: self.key,
            address: self.address,
            urgency: self.urgency,
            location,
            extra: self.extra,
        })
    }
}

/// A stop with a known location; the only kind the sequencer accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStop {
    pub key: StopKey,
    pub address: String,
    pub urgency: Urgency,
    pub location: Location,
    pub extra: Map<String, Value>,
}

impl ResolvedStop {
    pub fn new(key: StopKey, address: impl Into<String>, urgency: Urgency, location: Location) -> Self {
        Self {
            key,
            address: address.into(),
            urgency,
            location,
            extra: Map::new(),
        }
    }
}
