// GamingMouse Transform Module
// Transformer chains, their cache, and per-event chain resolution

pub mod cache;
pub mod chain;
pub mod manager;
pub mod transformer;

pub use cache::{CacheKey, CacheStats, TransformerCache, DEFAULT_CACHE_CAPACITY};
pub use chain::TransformerChain;
pub use manager::EventTransformerManager;
pub use transformer::{AccelerationSpeed, Axis, EventTransformer, LinearScrolling, ReverseScrolling};
