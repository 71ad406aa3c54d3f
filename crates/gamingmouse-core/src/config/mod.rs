// GamingMouse Configuration
// Scheme model, merge rules, shared state and TOML decoding

pub mod configuration;
pub mod field;
pub mod matcher;
pub mod parser;
pub mod scheme;
pub mod scrolling;
pub mod state;
pub mod watch;

pub use configuration::{Configuration, SchemeIndex};
pub use field::{Bidirectional, Field, Merge};
pub use matcher::DeviceMatcher;
pub use parser::{ConditionsToml, ConfigError, ConfigToml, SchemeToml};
pub use scheme::{If, Scheme};
pub use scrolling::{Distance, DistanceParseError, Scrolling};
pub use state::ConfigurationState;
pub use watch::{is_config_change, ConfigWatcher, WatchError, DEFAULT_DEBOUNCE};
