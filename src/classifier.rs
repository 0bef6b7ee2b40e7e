//! Splits stops into urgency tiers.

use crate::stop::ResolvedStop;

/// Stops partitioned by urgency, each tier in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tiers {
    pub urgent: Vec<ResolvedStop>,
    pub normal: Vec<ResolvedStop>,
}

impl Tiers {
    pub fn len(&self) -> usize {
        self.urgent.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.normal.is_empty()
    }
}

/// Partitions `stops` into urgent and normal tiers, preserving relative order.
pub fn classify(stops: Vec<ResolvedStop>) -> Tiers {
    let (urgent, normal) = stops
        .into_iter()
        .partition(|stop| stop.urgency.is_urgent());
    Tiers { urgent, normal }
}
