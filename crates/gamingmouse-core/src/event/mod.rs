// GamingMouse Event Handling
// Linux input translation and the evdev pointer event loop

#[cfg(feature = "pure-rust")]
pub mod r#loop;
pub mod translate;

#[cfg(feature = "pure-rust")]
pub use r#loop::{DeviceInfo, EventLoop, EventLoopError, EventLoopResult, PollOutcome, PolledEvent};
pub use translate::{matches_device_filter, translate, PointerCapabilities, Translation};
