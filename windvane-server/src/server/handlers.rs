use crate::core::{CacheRegistry, WindvaneError};
use crate::weather::{WindReading, WindService};
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<WindService>,
    pub registry: Arc<CacheRegistry<WindReading>>,
}

#[derive(Debug, Serialize)]
pub struct ClearCacheResponse {
    pub cleared: bool,
}

#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub name: String,
    pub entries: usize,
    pub adds: u64,
    pub gets: u64,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub scavenge_runs: u64,
    pub scavenged: u64,
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "windvane",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Current wind for a zip code
pub async fn wind(
    State(state): State<AppState>,
    Path(zip_code): Path<String>,
) -> Result<Json<WindReading>, WindvaneError> {
    debug!("REST wind lookup zip={}", zip_code);

    let reading = state.service.wind_for(&zip_code).await?;
    Ok(Json(reading))
}

/// Drop all cached wind results
pub async fn clear_wind_cache(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    debug!("REST wind cache clear");

    state.service.clear_cache();
    Json(ClearCacheResponse { cleared: true })
}

/// Statistics for every cache in the registry
pub async fn cache_stats(
    State(state): State<AppState>,
) -> Result<Json<Vec<CacheStatsResponse>>, WindvaneError> {
    let mut responses = Vec::new();

    for name in state.registry.names() {
        let cache = state.registry.get_or_create(&name)?;
        let stats = cache.stats();
        responses.push(CacheStatsResponse {
            name,
            entries: stats.entries,
            adds: stats.adds,
            gets: stats.gets,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_rate(),
            scavenge_runs: stats.scavenge_runs,
            scavenged: stats.scavenged,
        });
    }

    Ok(Json(responses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CacheConfig;
    use crate::weather::{WIND_CACHE_NAME, WeatherClient};

    fn state() -> AppState {
        let registry = Arc::new(CacheRegistry::new(CacheConfig::default()));
        let client = WeatherClient::new("http://127.0.0.1:1/weather", "test-key");
        let service = Arc::new(WindService::new(client, &registry).unwrap());
        AppState { service, registry }
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let body = health_check().await.0;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "windvane");
    }

    #[tokio::test]
    async fn wind_rejects_invalid_zip() {
        let state = state();

        let err = wind(State(state), Path("not-a-zip".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, WindvaneError::InvalidZipCode(_)));
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wind_serves_cached_reading() {
        let state = state();
        let reading = WindReading { speed: 5.1, deg: 330.0 };
        state
            .registry
            .get_or_create(WIND_CACHE_NAME)
            .unwrap()
            .add("08831", reading.clone(), None);

        let body = wind(State(state), Path("08831".to_string()))
            .await
            .unwrap()
            .0;
        assert_eq!(body, reading);
    }

    #[tokio::test]
    async fn clear_endpoint_empties_cache() {
        let state = state();
        let cache = state.registry.get_or_create(WIND_CACHE_NAME).unwrap();
        cache.add("08831", WindReading { speed: 5.1, deg: 330.0 }, None);

        let body = clear_wind_cache(State(state)).await.0;
        assert!(body.cleared);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn stats_cover_registered_caches() {
        let state = state();
        let cache = state.registry.get_or_create(WIND_CACHE_NAME).unwrap();
        cache.add("08831", WindReading { speed: 5.1, deg: 330.0 }, None);
        cache.get("08831");

        let body = cache_stats(State(state)).await.unwrap().0;
        assert_eq!(body.len(), 1);
        assert_eq!(body[0].name, WIND_CACHE_NAME);
        assert_eq!(body[0].entries, 1);
        assert_eq!(body[0].hits, 1);
    }
}
