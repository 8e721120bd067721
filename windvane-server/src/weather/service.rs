use super::client::{WeatherClient, validate_zip_code};
use super::model::WindReading;
use crate::core::error::Result;
use crate::core::{Cache, CacheRegistry, CacheStats};
use std::sync::Arc;
use tracing::{debug, info};

/// Well-known name of the cache holding upstream wind results
pub const WIND_CACHE_NAME: &str = "WEATHER_WIND_API_CACHE";

/// Wind lookup with cache-aside reads against the upstream weather API
pub struct WindService {
    client: WeatherClient,
    cache: Arc<Cache<WindReading>>,
}

impl WindService {
    /// Wire the service to its cache, creating it in the registry on
    /// first use
    pub fn new(client: WeatherClient, registry: &CacheRegistry<WindReading>) -> Result<Self> {
        let cache = registry.get_or_create(WIND_CACHE_NAME)?;
        Ok(Self { client, cache })
    }

    /// Current wind for a zip code: cached result when fresh, upstream
    /// fetch (stored under the cache's default TTL) otherwise
    pub async fn wind_for(&self, zip_code: &str) -> Result<WindReading> {
        info!("Requesting current wind for {}", zip_code);
        validate_zip_code(zip_code)?;

        if let Some(reading) = self.cache.get(zip_code) {
            debug!("Serving wind for {} from cache", zip_code);
            return Ok(reading);
        }

        let reading = self.client.current_wind(zip_code).await?;
        self.cache.add(zip_code, reading.clone(), None);

        Ok(reading)
    }

    /// Drop every cached wind result
    pub fn clear_cache(&self) {
        self.cache.remove_all();
    }

    /// Statistics of the wind cache
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
