// GamingMouse Core Library
// Device tracking, scheme resolution and scroll transformer pipeline

pub mod config;
pub mod context;
pub mod event;
pub mod input;
pub mod settings;
pub mod transform;

pub use config::{
    Bidirectional, ConfigError, ConfigWatcher, Configuration, ConfigurationState, DeviceMatcher,
    Distance, Field, If, Merge, Scheme, SchemeIndex, Scrolling,
};
pub use context::{ConditionContext, NullContext, Pid, ProcessContext, StaticContext};
pub use input::{
    classify, Category, Classification, Device, DeviceDescriptor, DeviceRegistry, InputEvent,
    InputEventKind, InputValue, RawDeviceId, ScrollEvent, Usage,
};
pub use settings::{Settings, SettingsError};
pub use transform::{
    CacheKey, CacheStats, EventTransformer, EventTransformerManager, TransformerCache,
    TransformerChain,
};

#[cfg(feature = "pure-rust")]
pub use event::{EventLoop, EventLoopError, EventLoopResult};
