//! Request-scoped memoization of distance lookups.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::DistanceError;
use crate::stop::Location;
use crate::traits::DistanceProvider;

type PairKey = (u64, u64, u64, u64);

fn pair_key(from: Location, to: Location) -> PairKey {
    (
        from.lat.to_bits(),
        from.lng.to_bits(),
        to.lat.to_bits(),
        to.lng.to_bits(),
    )
}

/// Caches `distance(from, to)` for the lifetime of the wrapper.
///
/// Directional: `(a, b)` and `(b, a)` are separate entries. Failures are not
/// cached, so a later lookup of the same pair retries the provider.
#[derive(Debug)]
pub struct MemoizedDistance<P> {
    inner: P,
    cache: Mutex<HashMap<PairKey, f64>>,
}

impl<P> MemoizedDistance<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached pairs.
    pub fn cached_pairs(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or_default()
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: DistanceProvider> DistanceProvider for MemoizedDistance<P> {
    fn distance(&self, from: Location, to: Location) -> Result<f64, DistanceError> {
        let key = pair_key(from, to);
        if let Some(value) = self.cache.lock().ok().and_then(|cache| cache.get(&key).copied()) {
            return Ok(value);
        }

        // The lock is not held across the lookup so parallel scans don't serialize.
        let value = self.inner.distance(from, to)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, value);
        }
        Ok(value)
    }
}
