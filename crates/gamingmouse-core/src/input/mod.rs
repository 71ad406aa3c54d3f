// GamingMouse Input Layer
// Device identity, classification, raw input values and active-device tracking

pub mod classify;
mod device;
mod event;
mod registry;
pub mod usage;

pub use classify::{classify, is_mouse_exception, Category, Classification};
pub use device::{Device, DeviceDescriptor, RawDeviceId};
pub use event::{InputEvent, InputEventKind, InputValue, ScrollEvent, PIXELS_PER_LINE};
pub use registry::{ActivationReason, DeviceRegistry};
pub use usage::Usage;
