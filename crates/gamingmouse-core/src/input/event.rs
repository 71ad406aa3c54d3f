// GamingMouse Input Layer - Events
// Raw input values and normalized pointer events flowing through the pipeline

use super::device::RawDeviceId;
use super::usage::Usage;

/// Number of pixels one scroll line corresponds to
pub const PIXELS_PER_LINE: f64 = 10.0;

/// A single value reported by a HID element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputValue {
    pub usage: Usage,
    pub integer_value: i64,
}

impl InputValue {
    pub fn new(usage_page: u16, usage: u16, integer_value: i64) -> Self {
        Self {
            usage: Usage::new(usage_page, usage),
            integer_value,
        }
    }

    /// Whether this value counts as user activity on its device.
    ///
    /// Non-zero X/Y/Z axis movement or any button-page value qualifies.
    pub fn is_activity(&self) -> bool {
        if self.usage.is_pointer_axis() {
            return self.integer_value != 0;
        }
        self.usage.is_button()
    }
}

/// Normalized scroll deltas.
///
/// Discrete events carry line deltas, continuous events carry pixel deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub continuous: bool,
}

impl ScrollEvent {
    /// Discrete (wheel notch) scroll in lines
    pub fn lines(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            continuous: false,
        }
    }

    /// Continuous scroll in pixels
    pub fn pixels(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            continuous: true,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.delta_x == 0.0 && self.delta_y == 0.0
    }
}

/// Kind of an incoming OS input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEventKind {
    /// Scroll wheel or scroll gesture
    Scroll(ScrollEvent),
    /// Relative pointer motion
    Motion { delta_x: f64, delta_y: f64 },
    /// Mouse button press/release (0-based button number)
    Button { button: u8, pressed: bool },
    /// Keyboard key press/release
    Key { code: u16, pressed: bool },
    /// Modifier flags changed
    FlagsChanged,
}

/// An OS input event, optionally attributed to the raw device that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub kind: InputEventKind,
    pub source: Option<RawDeviceId>,
}

impl InputEvent {
    pub fn new(kind: InputEventKind, source: Option<RawDeviceId>) -> Self {
        Self { kind, source }
    }

    pub fn scroll(scroll: ScrollEvent, source: Option<RawDeviceId>) -> Self {
        Self::new(InputEventKind::Scroll(scroll), source)
    }

    /// Keyboard and modifier events never identify a pointer device
    pub fn is_keyboard(&self) -> bool {
        matches!(
            self.kind,
            InputEventKind::Key { .. } | InputEventKind::FlagsChanged
        )
    }

    pub fn as_scroll(&self) -> Option<&ScrollEvent> {
        match &self.kind {
            InputEventKind::Scroll(scroll) => Some(scroll),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::usage::{GD_WHEEL, GD_X, GD_Y, PAGE_BUTTON, PAGE_DIGITIZER, PAGE_GENERIC_DESKTOP};

    #[test]
    fn test_axis_activity_requires_nonzero() {
        assert!(InputValue::new(PAGE_GENERIC_DESKTOP, GD_X, 3).is_activity());
        assert!(InputValue::new(PAGE_GENERIC_DESKTOP, GD_Y, -1).is_activity());
        assert!(!InputValue::new(PAGE_GENERIC_DESKTOP, GD_X, 0).is_activity());
    }

    #[test]
    fn test_button_activity_any_value() {
        assert!(InputValue::new(PAGE_BUTTON, 1, 1).is_activity());
        assert!(InputValue::new(PAGE_BUTTON, 2, 0).is_activity());
    }

    #[test]
    fn test_unrelated_usages_are_not_activity() {
        assert!(!InputValue::new(PAGE_GENERIC_DESKTOP, GD_WHEEL, 1).is_activity());
        assert!(!InputValue::new(PAGE_DIGITIZER, 0x42, 1).is_activity());
    }

    #[test]
    fn test_keyboard_events() {
        let key = InputEvent::new(InputEventKind::Key { code: 30, pressed: true }, None);
        let flags = InputEvent::new(InputEventKind::FlagsChanged, None);
        let scroll = InputEvent::scroll(ScrollEvent::lines(0.0, 1.0), None);

        assert!(key.is_keyboard());
        assert!(flags.is_keyboard());
        assert!(!scroll.is_keyboard());
        assert!(scroll.as_scroll().is_some());
        assert!(key.as_scroll().is_none());
    }
}
