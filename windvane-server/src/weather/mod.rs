pub mod client;
pub mod model;
pub mod service;

pub use client::{DEFAULT_API_URL, WeatherClient, validate_zip_code};
pub use model::{WeatherEnvelope, WindReading};
pub use service::{WIND_CACHE_NAME, WindService};
