// GamingMouse Event Translation
// Maps Linux input events and device capabilities onto the pipeline's types

use crate::input::usage::{GD_WHEEL, GD_X, GD_Y, PAGE_BUTTON, PAGE_GENERIC_DESKTOP};
use crate::input::{
    DeviceDescriptor, InputEvent, InputEventKind, InputValue, RawDeviceId, ScrollEvent, Usage,
};

// linux/input-event-codes.h
pub const EV_KEY: u16 = 0x01;
pub const EV_REL: u16 = 0x02;
pub const REL_X: u16 = 0x00;
pub const REL_Y: u16 = 0x01;
pub const REL_HWHEEL: u16 = 0x06;
pub const REL_WHEEL: u16 = 0x08;
pub const BTN_MOUSE: u16 = 0x110;
pub const BTN_TASK: u16 = 0x117;
const KEY_MAX_KEYBOARD: u16 = 0x100;

/// What a raw input event means to the pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Translation {
    /// HID-style value for active-device tracking
    pub value: Option<InputValue>,
    /// Normalized event for chain resolution
    pub event: Option<InputEvent>,
}

/// Translate one evdev event from `source`
pub fn translate(source: RawDeviceId, event_type: u16, code: u16, value: i32) -> Translation {
    let value_i64 = i64::from(value);
    let v = f64::from(value);
    let source = Some(source);

    match (event_type, code) {
        (EV_REL, REL_X) => Translation {
            value: Some(InputValue::new(PAGE_GENERIC_DESKTOP, GD_X, value_i64)),
            event: Some(InputEvent::new(
                InputEventKind::Motion {
                    delta_x: v,
                    delta_y: 0.0,
                },
                source,
            )),
        },
        (EV_REL, REL_Y) => Translation {
            value: Some(InputValue::new(PAGE_GENERIC_DESKTOP, GD_Y, value_i64)),
            event: Some(InputEvent::new(
                InputEventKind::Motion {
                    delta_x: 0.0,
                    delta_y: v,
                },
                source,
            )),
        },
        (EV_REL, REL_WHEEL) => Translation {
            value: Some(InputValue::new(PAGE_GENERIC_DESKTOP, GD_WHEEL, value_i64)),
            event: Some(InputEvent::scroll(ScrollEvent::lines(0.0, v), source)),
        },
        (EV_REL, REL_HWHEEL) => Translation {
            value: None,
            event: Some(InputEvent::scroll(ScrollEvent::lines(v, 0.0), source)),
        },
        (EV_KEY, BTN_MOUSE..=BTN_TASK) => {
            let button = code - BTN_MOUSE;
            Translation {
                value: Some(InputValue::new(PAGE_BUTTON, button + 1, value_i64)),
                event: Some(InputEvent::new(
                    InputEventKind::Button {
                        button: button as u8,
                        pressed: value != 0,
                    },
                    source,
                )),
            }
        }
        (EV_KEY, code) if code < KEY_MAX_KEYBOARD => Translation {
            value: None,
            event: Some(InputEvent::new(
                InputEventKind::Key {
                    code,
                    pressed: value != 0,
                },
                source,
            )),
        },
        _ => Translation::default(),
    }
}

/// Capabilities of an evdev node relevant to classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerCapabilities {
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
    pub unique_name: Option<String>,
    /// Number of BTN_MOUSE..BTN_TASK buttons
    pub buttons: u32,
    /// REL_X and REL_Y reported
    pub relative_xy: bool,
    /// Multi-touch surface with finger tool
    pub touchpad: bool,
}

impl PointerCapabilities {
    /// Whether the node is worth tracking as a pointing device
    pub fn is_pointer(&self) -> bool {
        self.relative_xy || self.touchpad
    }

    /// Capability query surface for classification.
    ///
    /// Vendor and product 0 are reported by virtual devices and mean unknown.
    pub fn to_descriptor(&self) -> DeviceDescriptor {
        let mut descriptor = DeviceDescriptor::new(self.name.clone());
        if self.vendor_id != 0 {
            descriptor = descriptor.with_vendor_id(self.vendor_id);
        }
        if self.product_id != 0 {
            descriptor = descriptor.with_product_id(self.product_id);
        }
        if let Some(serial) = self.unique_name.as_deref().filter(|s| !s.is_empty()) {
            descriptor = descriptor.with_serial_number(serial);
        }
        if self.buttons > 0 {
            descriptor = descriptor.with_button_count(self.buttons);
        }
        if self.touchpad {
            descriptor = descriptor.with_usage(Usage::TOUCHPAD);
        } else if self.relative_xy {
            descriptor = descriptor.with_usage(Usage::MOUSE);
        }
        descriptor
    }
}

/// Whether a device should be opened.
///
/// With an explicit filter, the name or path must match; otherwise every
/// pointing device is used.
pub fn matches_device_filter(name: &str, path: &str, filter: &[String], is_pointer: bool) -> bool {
    if !filter.is_empty() {
        return filter.iter().any(|entry| entry == name || entry == path);
    }
    is_pointer
}
