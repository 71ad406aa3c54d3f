// GamingMouse Input Layer - Device Identity
// Wraps a raw pointer device handle with stable identity and derived classification

use std::fmt;
use std::hash::{Hash, Hasher};

use super::classify::{classify, Category, Classification};
use super::usage::Usage;

/// Opaque handle for one physical connection reported by the raw-device layer.
///
/// Two handles are equal iff they refer to the same connection. Reconnecting
/// the same hardware yields a new handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawDeviceId(pub u64);

impl fmt::Display for RawDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability query surface of a raw device
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Device name
    pub name: String,
    /// Vendor ID (USB VID)
    pub vendor_id: Option<u16>,
    /// Product ID (USB PID)
    pub product_id: Option<u16>,
    /// Serial number or unique name
    pub serial_number: Option<String>,
    /// Number of buttons, if the driver reports it
    pub button_count: Option<u32>,
    /// Usages the device advertises
    pub usages: Vec<Usage>,
}

impl DeviceDescriptor {
    /// Create new DeviceDescriptor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set vendor ID
    pub fn with_vendor_id(mut self, vid: u16) -> Self {
        self.vendor_id = Some(vid);
        self
    }

    /// Set product ID
    pub fn with_product_id(mut self, pid: u16) -> Self {
        self.product_id = Some(pid);
        self
    }

    /// Set serial number
    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    /// Set button count
    pub fn with_button_count(mut self, count: u32) -> Self {
        self.button_count = Some(count);
        self
    }

    /// Add an advertised usage
    pub fn with_usage(mut self, usage: Usage) -> Self {
        if !self.usages.contains(&usage) {
            self.usages.push(usage);
        }
        self
    }

    /// Whether the device conforms to the given usage page / usage
    pub fn conforms_to(&self, page: u16, usage: u16) -> bool {
        self.usages.contains(&Usage::new(page, usage))
    }

    /// Vendor and product ID, only when both are known
    pub fn product(&self) -> Option<(u16, u16)> {
        self.vendor_id.zip(self.product_id)
    }
}

/// A connected pointing device tracked by the registry.
///
/// Classification is computed once at connection time; the descriptor does
/// not change for the lifetime of the connection.
#[derive(Debug, Clone)]
pub struct Device {
    id: RawDeviceId,
    descriptor: DeviceDescriptor,
    classification: Classification,
    removed: bool,
}

impl Device {
    pub fn new(id: RawDeviceId, descriptor: DeviceDescriptor) -> Self {
        let classification = classify(&descriptor);
        Self {
            id,
            descriptor,
            classification,
            removed: false,
        }
    }

    pub fn id(&self) -> RawDeviceId {
        self.id
    }

    pub fn descriptor(&self) -> &DeviceDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn vendor_id(&self) -> Option<u16> {
        self.descriptor.vendor_id
    }

    pub fn product_id(&self) -> Option<u16> {
        self.descriptor.product_id
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.descriptor.serial_number.as_deref()
    }

    pub fn button_count(&self) -> Option<u32> {
        self.descriptor.button_count
    }

    pub fn category(&self) -> Category {
        self.classification.category
    }

    pub fn is_gaming_mouse(&self) -> bool {
        self.classification.is_gaming_mouse
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub(crate) fn mark_removed(&mut self) {
        self.removed = true;
    }
}

impl PartialEq for Device {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Device {}

impl Hash for Device {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.descriptor.name, self.id)?;
        if let Some((vid, pid)) = self.descriptor.product() {
            write!(f, ", {:04x}:{:04x}", vid, pid)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::usage::{DIG_TOUCHPAD, PAGE_DIGITIZER};

    #[test]
    fn test_descriptor_builder() {
        let descriptor = DeviceDescriptor::new("G Pro Wireless")
            .with_vendor_id(0x046d)
            .with_product_id(0xc088)
            .with_serial_number("ABC123")
            .with_button_count(5)
            .with_usage(Usage::MOUSE);

        assert_eq!(descriptor.name, "G Pro Wireless");
        assert_eq!(descriptor.product(), Some((0x046d, 0xc088)));
        assert_eq!(descriptor.serial_number.as_deref(), Some("ABC123"));
        assert_eq!(descriptor.button_count, Some(5));
        assert!(descriptor.conforms_to(0x01, 0x02));
        assert!(!descriptor.conforms_to(PAGE_DIGITIZER, DIG_TOUCHPAD));
    }

    #[test]
    fn test_product_requires_both_ids() {
        let descriptor = DeviceDescriptor::new("Half known").with_vendor_id(0x046d);
        assert_eq!(descriptor.product(), None);
    }

    #[test]
    fn test_with_usage_dedup() {
        let descriptor = DeviceDescriptor::new("Mouse")
            .with_usage(Usage::MOUSE)
            .with_usage(Usage::MOUSE);
        assert_eq!(descriptor.usages.len(), 1);
    }

    #[test]
    fn test_equality_by_connection() {
        let a = Device::new(RawDeviceId(1), DeviceDescriptor::new("Mouse"));
        let b = Device::new(RawDeviceId(1), DeviceDescriptor::new("Renamed"));
        let c = Device::new(RawDeviceId(2), DeviceDescriptor::new("Mouse"));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        let device = Device::new(
            RawDeviceId(7),
            DeviceDescriptor::new("Magic Mouse")
                .with_vendor_id(0x05ac)
                .with_product_id(0x030d),
        );
        assert_eq!(device.to_string(), "Magic Mouse (#7, 05ac:030d)");
    }
}
