pub mod cache;
pub mod error;
pub mod registry;
pub mod scavenge;
pub mod types;

pub use cache::Cache;
pub use error::WindvaneError;
pub use registry::CacheRegistry;
pub use scavenge::{MemoryPressureTrigger, NeverTrigger, ScavengeTrigger};
pub use types::{CacheConfig, CacheEntry, CacheStats};
