//! End-to-end routing of one request: ingest, geocode, prune, classify, compose.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::boundary::AddressEntry;
use crate::classifier::classify;
use crate::error::PlanError;
use crate::memo::MemoizedDistance;
use crate::solver::{compose, Route, SequenceOptions};
use crate::stop::{DEPOT, Location, ResolvedStop, Stop, StopKey};
use crate::traits::{DistanceProvider, Geocoder};

pub type SharedGeocoder = Arc<dyn Geocoder + Send + Sync>;
pub type SharedDistance = Arc<dyn DistanceProvider + Send + Sync>;

#[derive(Debug, Clone)]
pub struct PlannerOptions {
    pub depot: Location,
    /// Cache distance lookups for the duration of one request.
    pub memoize: bool,
    pub sequence: SequenceOptions,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            depot: DEPOT,
            memoize: true,
            sequence: SequenceOptions::default(),
        }
    }
}

/// Holds the injected collaborators. Carries no per-request state, so one
/// planner can serve concurrent requests.
#[derive(Clone)]
pub struct Planner {
    geocoder: SharedGeocoder,
    distance: SharedDistance,
    options: PlannerOptions,
}

impl Planner {
    pub fn new(geocoder: SharedGeocoder, distance: SharedDistance, options: PlannerOptions) -> Self {
        Self {
            geocoder,
            distance,
            options,
        }
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn plan(&self, entries: Vec<AddressEntry>) -> Result<Route, PlanError> {
        if entries.is_empty() {
            return Err(PlanError::EmptyAddressList);
        }
        let received = entries.len();

        let stops = geocode_all(ingest(entries), &*self.geocoder);
        let resolved = prune(stops);
        if resolved.is_empty() {
            warn!(received, "no address could be geocoded");
            return Err(PlanError::NoValidAddress);
        }

        let tiers = classify(resolved);
        debug!(
            received,
            resolved = tiers.len(),
            urgent = tiers.urgent.len(),
            normal = tiers.normal.len(),
            "planning route"
        );

        let route = if self.options.memoize {
            let memo = MemoizedDistance::new(&*self.distance);
            let route = compose(self.options.depot, tiers.urgent, tiers.normal, &memo, &self.options.sequence);
            debug!(cached_pairs = memo.cached_pairs(), "distance cache released");
            route
        } else {
            compose(
                self.options.depot,
                tiers.urgent,
                tiers.normal,
                &*self.distance,
                &self.options.sequence,
            )
        };

        route.map_err(|err| {
            warn!("route sequencing failed: {}", err);
            PlanError::from(err)
        })
    }
}

/// Assigns each entry a unique key in input order.
pub fn ingest(entries: Vec<AddressEntry>) -> Vec<Stop> {
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| entry.into_stop(StopKey(index)))
        .collect()
}

/// Resolves every stop's location. Addresses are independent, so lookups run
/// on the rayon pool; input order is kept.
pub fn geocode_all<G>(stops: Vec<Stop>, geocoder: &G) -> Vec<Stop>
where
    G: Geocoder + Sync + ?Sized,
{
    stops
        .into_par_iter()
        .map(|mut stop| {
            stop.location = geocoder.geocode(&stop.address);
            if stop.location.is_none() {
                debug!(key = stop.key.0, address = %stop.address, "dropping unresolved address");
            }
            stop
        })
        .collect()
}

/// Drops stops that never resolved.
pub fn prune(stops: Vec<Stop>) -> Vec<ResolvedStop> {
    stops.into_iter().filter_map(Stop::resolve).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stop::Urgency;

    #[test]
    fn test_ingest_assigns_sequential_keys() {
        let stops = ingest(vec![
            AddressEntry::new("Rua A"),
            AddressEntry::new("Rua A"),
            AddressEntry::urgent("Rua B"),
        ]);
        let keys: Vec<usize> = stops.iter().map(|s| s.key.0).collect();
        assert_eq!(keys, vec![0, 1, 2]);
        assert_eq!(stops[2].urgency, Urgency::Urgent);
    }

    #[test]
    fn test_prune_drops_unresolved() {
        let stops = vec![
            Stop::new(StopKey(0), "a", Urgency::Normal).with_location(Location::new(1.0, 1.0)),
            Stop::new(StopKey(1), "b", Urgency::Normal),
            Stop::new(StopKey(2), "c", Urgency::Urgent).with_location(Location::new(2.0, 2.0)),
        ];
        let resolved = prune(stops);
        let keys: Vec<usize> = resolved.iter().map(|s| s.key.0).collect();
        assert_eq!(keys, vec![0, 2]);
    }
}
