//! Greedy nearest-neighbor sequencing and tiered route composition.
//!
//! The sequencer is deliberately a heuristic: from the current location it
//! always moves to the closest remaining stop, with no lookahead or repair.
//! O(n²) distance lookups for n stops, which is fine for tens of stops per
//! request when each lookup is a network round-trip anyway.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::DistanceError;
use crate::stop::{Location, ResolvedStop, StopKey};
use crate::traits::DistanceProvider;

/// How candidate distances are evaluated within one selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// One lookup at a time, in remaining order.
    #[default]
    Sequential,
    /// All lookups of a step issued concurrently on the rayon pool. Results
    /// are still combined in remaining order, so the route is identical.
    Parallel,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceOptions {
    pub scan: ScanMode,
}

/// An ordered route: urgent tier first, then normal tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Route {
    stops: Vec<ResolvedStop>,
    urgent_count: usize,
}

impl Route {
    pub fn stops(&self) -> &[ResolvedStop] {
        &self.stops
    }

    pub fn into_stops(self) -> Vec<ResolvedStop> {
        self.stops
    }

    /// The leading urgent segment.
    pub fn urgent(&self) -> &[ResolvedStop] {
        &self.stops[..self.urgent_count]
    }

    /// The trailing normal segment.
    pub fn normal(&self) -> &[ResolvedStop] {
        &self.stops[self.urgent_count..]
    }

    pub fn keys(&self) -> Vec<StopKey> {
        self.stops.iter().map(|stop| stop.key).collect()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Orders `stops` by repeatedly moving to the nearest remaining one.
///
/// Ties resolve to the stop that comes first in the remaining set, which keeps
/// the input order among equidistant stops. An empty input returns at once
/// without any distance lookups. The first failed lookup aborts the whole
/// sequence; no partial ordering is returned.
pub fn sequence<D>(
    start: Location,
    stops: Vec<ResolvedStop>,
    distance: &D,
    options: &SequenceOptions,
) -> Result<Vec<ResolvedStop>, DistanceError>
where
    D: DistanceProvider + Sync + ?Sized,
{
    let mut remaining = stops;
    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = start;

    while !remaining.is_empty() {
        let distances = candidate_distances(current, &remaining, distance, options.scan)?;
        let Some(next) = nearest(&distances) else {
            break;
        };

        // Remaining is indexed positionally, so duplicates with equal labels or
        // coordinates are still told apart.
        let stop = remaining.remove(next);
        trace!(key = stop.key.0, distance = distances[next], "selected nearest stop");
        current = stop.location;
        ordered.push(stop);
    }

    Ok(ordered)
}

/// Sequences the urgent tier from `depot`, then the normal tier from wherever
/// the urgent tier ended (or `depot` when there were no urgent stops).
pub fn compose<D>(
    depot: Location,
    urgent: Vec<ResolvedStop>,
    normal: Vec<ResolvedStop>,
    distance: &D,
    options: &SequenceOptions,
) -> Result<Route, DistanceError>
where
    D: DistanceProvider + Sync + ?Sized,
{
    let mut stops = sequence(depot, urgent, distance, options)?;
    let urgent_count = stops.len();

    let normal_start = stops.last().map_or(depot, |stop| stop.location);
    stops.extend(sequence(normal_start, normal, distance, options)?);

    debug!(
        urgent = urgent_count,
        normal = stops.len() - urgent_count,
        "composed route"
    );

    Ok(Route {
        stops,
        urgent_count,
    })
}

fn candidate_distances<D>(
    current: Location,
    remaining: &[ResolvedStop],
    distance: &D,
    scan: ScanMode,
) -> Result<Vec<f64>, DistanceError>
where
    D: DistanceProvider + Sync + ?Sized,
{
    let lookup = |stop: &ResolvedStop| {
        distance
            .distance(current, stop.location)
            .and_then(checked)
    };

    match scan {
        ScanMode::Sequential => remaining.iter().map(lookup).collect(),
        ScanMode::Parallel => {
            // Collect every outcome first so the reported error is the first
            // failing candidate in remaining order.
            let results: Vec<Result<f64, DistanceError>> =
                remaining.par_iter().map(lookup).collect();
            results.into_iter().collect()
        }
    }
}

fn checked(value: f64) -> Result<f64, DistanceError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DistanceError::InvalidValue(value))
    }
}

/// Index of the strict minimum; the earliest index wins ties.
fn nearest(distances: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in distances.iter().enumerate() {
        if best.is_none_or(|(_, best_value)| value < best_value) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}
