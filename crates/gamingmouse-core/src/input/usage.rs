// GamingMouse Input Layer - HID Usages
// Usage page / usage constants consulted by classification and activity tracking

use std::fmt;

/// Generic Desktop usage page
pub const PAGE_GENERIC_DESKTOP: u16 = 0x01;
/// Button usage page
pub const PAGE_BUTTON: u16 = 0x09;
/// Digitizer usage page
pub const PAGE_DIGITIZER: u16 = 0x0D;

/// Generic Desktop: Mouse
pub const GD_MOUSE: u16 = 0x02;
/// Generic Desktop: X axis
pub const GD_X: u16 = 0x30;
/// Generic Desktop: Y axis
pub const GD_Y: u16 = 0x31;
/// Generic Desktop: Z axis
pub const GD_Z: u16 = 0x32;
/// Generic Desktop: Wheel
pub const GD_WHEEL: u16 = 0x38;

/// Digitizer: Touch Pad
pub const DIG_TOUCHPAD: u16 = 0x05;

/// A (usage page, usage) pair as advertised by a HID element or collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Usage {
    pub page: u16,
    pub usage: u16,
}

impl Usage {
    pub const fn new(page: u16, usage: u16) -> Self {
        Self { page, usage }
    }

    /// Generic desktop mouse collection
    pub const MOUSE: Usage = Usage::new(PAGE_GENERIC_DESKTOP, GD_MOUSE);

    /// Digitizer touch pad collection
    pub const TOUCHPAD: Usage = Usage::new(PAGE_DIGITIZER, DIG_TOUCHPAD);

    /// Button usage for a 1-based button number
    pub const fn button(number: u16) -> Self {
        Usage::new(PAGE_BUTTON, number)
    }

    /// Whether this is a generic desktop X, Y or Z axis
    pub fn is_pointer_axis(&self) -> bool {
        self.page == PAGE_GENERIC_DESKTOP && matches!(self.usage, GD_X | GD_Y | GD_Z)
    }

    /// Whether this usage lives on the button page
    pub fn is_button(&self) -> bool {
        self.page == PAGE_BUTTON
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "usagePage=0x{:02X}, usage=0x{:02X}", self.page, self.usage)
    }
}
