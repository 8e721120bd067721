pub mod config;
pub mod core;
pub mod server;
pub mod weather;

// Re-export commonly used types
pub use config::ServerConfig;
pub use core::{
    Cache, CacheConfig, CacheRegistry, CacheStats, MemoryPressureTrigger, ScavengeTrigger,
    WindvaneError,
};
pub use server::{AppState, create_router};
pub use weather::{WIND_CACHE_NAME, WeatherClient, WindReading, WindService};
