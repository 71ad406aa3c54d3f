// GamingMouse Config Model - Device Matcher
// Partial predicate over derived device classification

use serde::Deserialize;

use crate::input::Device;

/// Partial predicate over a device. `None` fields mean "don't care".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceMatcher {
    pub is_gaming_mouse: Option<bool>,
}

impl DeviceMatcher {
    /// Matcher pinned to the classification of a device
    pub fn of(device: &Device) -> Self {
        Self {
            is_gaming_mouse: Some(device.is_gaming_mouse()),
        }
    }

    pub fn gaming_mouse(is_gaming_mouse: bool) -> Self {
        Self {
            is_gaming_mouse: Some(is_gaming_mouse),
        }
    }

    /// Conjunctive match over every present field
    pub fn matches(&self, device: &Device) -> bool {
        self.is_gaming_mouse
            .map_or(true, |expected| expected == device.is_gaming_mouse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{DeviceDescriptor, RawDeviceId, Usage};

    fn gaming() -> Device {
        Device::new(
            RawDeviceId(1),
            DeviceDescriptor::new("G502")
                .with_vendor_id(0x046d)
                .with_product_id(0xc08b)
                .with_usage(Usage::MOUSE),
        )
    }

    fn magic() -> Device {
        Device::new(
            RawDeviceId(2),
            DeviceDescriptor::new("Magic Mouse")
                .with_vendor_id(0x05ac)
                .with_product_id(0x030d),
        )
    }

    #[test]
    fn test_of_device() {
        assert_eq!(DeviceMatcher::of(&gaming()), DeviceMatcher::gaming_mouse(true));
        assert_eq!(DeviceMatcher::of(&magic()), DeviceMatcher::gaming_mouse(false));
    }

    #[test]
    fn test_matches() {
        assert!(DeviceMatcher::gaming_mouse(true).matches(&gaming()));
        assert!(!DeviceMatcher::gaming_mouse(true).matches(&magic()));
        assert!(DeviceMatcher::gaming_mouse(false).matches(&magic()));
    }

    #[test]
    fn test_empty_matcher_matches_everything() {
        let matcher = DeviceMatcher::default();
        assert!(matcher.matches(&gaming()));
        assert!(matcher.matches(&magic()));
    }
}
