use std::sync::{Arc, Mutex};
use std::time::Duration;

use cached::{Cached, TimedSizedCache};

use super::{ForecastCalculator, ForecastQuery, ForecastResult};
use crate::catalog::CatalogIndex;
use crate::error::Result;

/// A cache key for the compute_forecast method.
///
/// The key is the full query: date range, hotel ids, view mode, and the
/// room-type selection. The catalog index is immutable for the lifetime of
/// a session and therefore not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForecastCacheKey {
    query: ForecastQuery,
}

impl ForecastCacheKey {
    fn new(query: &ForecastQuery) -> Self {
        Self {
            query: query.clone(),
        }
    }
}

/// A caching wrapper for ForecastCalculator implementations.
///
/// The wrapped calculator draws from a stochastic value source, so two
/// computations with the same query would otherwise disagree. Keying the
/// cache on the query parameters makes the user-visible behavior "the
/// forecast does not change until an input changes": identical queries
/// return the identical result, any changed parameter recomputes.
///
/// Features:
/// - Caches compute_forecast results with TTL
/// - Cache clearing functionality
/// - Thread-safe implementation using Arc<Mutex<>>
pub struct ForecastCacheCalculator<
    T: ForecastCalculator,
    C: Cached<ForecastCacheKey, ForecastResult> = TimedSizedCache<ForecastCacheKey, ForecastResult>,
> {
    /// The wrapped calculator
    inner: T,
    /// Cache for compute_forecast results
    forecast_cache: Arc<Mutex<C>>,
}

impl<T: ForecastCalculator, C: Cached<ForecastCacheKey, ForecastResult>>
    ForecastCacheCalculator<T, C>
{
    /// Creates a new cache calculator wrapping the provided calculator with
    /// a custom cache store.
    pub fn new_with_store(inner: T, cache_store: C) -> Self {
        Self {
            inner,
            forecast_cache: Arc::new(Mutex::new(cache_store)),
        }
    }

    /// Removes all cached entries, forcing fresh computation on the next
    /// calls.
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.forecast_cache.lock() {
            cache.cache_clear();
        }
    }

    /// Returns the current number of cached forecasts.
    pub fn cache_size(&self) -> usize {
        if let Ok(cache) = self.forecast_cache.lock() {
            cache.cache_size()
        } else {
            0
        }
    }
}

impl<T: ForecastCalculator> ForecastCacheCalculator<T, TimedSizedCache<ForecastCacheKey, ForecastResult>> {
    /// Creates a new cache calculator wrapping the provided calculator.
    ///
    /// # Arguments
    /// * `inner` - The calculator to wrap with caching
    /// * `cache_size` - Maximum number of entries in the cache
    /// * `ttl` - Time to live for cached entries
    pub fn new(inner: T, cache_size: usize, ttl: Duration) -> Self {
        Self {
            inner,
            forecast_cache: Arc::new(Mutex::new(TimedSizedCache::with_size_and_lifespan(
                cache_size,
                ttl.as_secs(),
            ))),
        }
    }

    /// Creates a new cache calculator with default settings.
    ///
    /// Default settings:
    /// - Cache size: 100 entries
    /// - TTL: 5 minutes
    pub fn with_defaults(inner: T) -> Self {
        Self::new(inner, 100, Duration::from_secs(300))
    }
}

impl<T: ForecastCalculator, C: Cached<ForecastCacheKey, ForecastResult> + Send + Sync>
    ForecastCalculator for ForecastCacheCalculator<T, C>
{
    fn compute_forecast(
        &self,
        catalog: &CatalogIndex,
        query: &ForecastQuery,
    ) -> Result<ForecastResult> {
        let cache_key = ForecastCacheKey::new(query);

        // Try to get from cache first
        if let Ok(mut cache) = self.forecast_cache.lock() {
            if let Some(cached_result) = cache.cache_get(&cache_key) {
                return Ok(cached_result.clone());
            }
        }

        // Not in cache, compute the result
        let result = self.inner.compute_forecast(catalog, query)?;

        // Store in cache
        if let Ok(mut cache) = self.forecast_cache.lock() {
            cache.cache_set(cache_key, result.clone());
        }

        Ok(result)
    }
}
