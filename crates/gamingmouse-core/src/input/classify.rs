// GamingMouse Input Layer - Device Classification
// Infers mouse/trackpad category and gaming-mouse class from identity and capabilities

use strum_macros::{AsRefStr, Display, EnumString};

use super::device::DeviceDescriptor;
use super::usage::{DIG_TOUCHPAD, PAGE_DIGITIZER};

/// Pointing device category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    Mouse,
    Trackpad,
}

/// Derived classification of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub category: Category,
    pub is_gaming_mouse: bool,
}

// Pointing devices that report a digitizer surface but behave as plain mice
// (Apple Magic Mouse over USB and Bluetooth vendor spaces).
const MOUSE_EXCEPTION_VENDORS: &[u16] = &[0x004C, 0x05AC];
const MOUSE_EXCEPTION_PRODUCTS: &[u16] = &[0x0269, 0x030D];

/// Whether a (vendor, product) pair is on the mouse exception list
pub fn is_mouse_exception(vendor_id: u16, product_id: u16) -> bool {
    MOUSE_EXCEPTION_VENDORS.contains(&vendor_id) && MOUSE_EXCEPTION_PRODUCTS.contains(&product_id)
}

/// Determine the category of a device.
///
/// Exception-listed products are always mice. Otherwise a device is a
/// trackpad iff it advertises the digitizer touch pad usage.
pub fn category(descriptor: &DeviceDescriptor) -> Category {
    if let Some((vid, pid)) = descriptor.product() {
        if is_mouse_exception(vid, pid) {
            return Category::Mouse;
        }
    }

    if descriptor.conforms_to(PAGE_DIGITIZER, DIG_TOUCHPAD) {
        return Category::Trackpad;
    }

    Category::Mouse
}

/// Determine whether a device belongs to the gaming-mouse class.
///
/// A device with unknown vendor/product identity is optimistically treated
/// as a full-featured mouse. A known device is a gaming mouse when it is a
/// mouse and not on the exception list.
pub fn is_gaming_mouse(descriptor: &DeviceDescriptor) -> bool {
    match descriptor.product() {
        Some((vid, pid)) => !is_mouse_exception(vid, pid) && category(descriptor) == Category::Mouse,
        None => true,
    }
}

/// Classify a device. Total and side-effect free.
pub fn classify(descriptor: &DeviceDescriptor) -> Classification {
    Classification {
        category: category(descriptor),
        is_gaming_mouse: is_gaming_mouse(descriptor),
    }
}
