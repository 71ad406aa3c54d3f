// GamingMouse Input Layer - Device Registry
// Owns connected devices and tracks the most recently used one

use indexmap::IndexMap;

use super::device::{Device, DeviceDescriptor, RawDeviceId};
use super::event::{InputEvent, InputValue};

/// Why a device became the active one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationReason {
    /// A qualifying raw input value arrived
    InputValue(InputValue),
    /// A non-zero scroll report arrived
    ScrollReport,
}

/// Set of connected pointing devices, in connection order.
///
/// The active device is stored as a key into the device table, never as a
/// separate owned value, and is cleared when that device is removed.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: IndexMap<RawDeviceId, Device>,
    last_active: Option<RawDeviceId>,
    verbose_input: bool,
}

impl DeviceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace every raw input value at `trace` level
    pub fn set_verbose_input(&mut self, verbose: bool) {
        self.verbose_input = verbose;
    }

    /// Register a newly connected device.
    ///
    /// Reporting the same connection twice keeps the original entry.
    pub fn add(&mut self, id: RawDeviceId, descriptor: DeviceDescriptor) -> &Device {
        let device = self.devices.entry(id).or_insert_with(|| {
            let device = Device::new(id, descriptor);
            log::info!(
                "Device added: {}, category={}, gaming={}",
                device,
                device.category(),
                device.is_gaming_mouse()
            );
            device
        });
        device
    }

    /// Unregister a disconnected device and return it marked as removed
    pub fn remove(&mut self, id: RawDeviceId) -> Option<Device> {
        let mut device = self.devices.shift_remove(&id)?;
        device.mark_removed();

        if self.last_active == Some(id) {
            self.last_active = None;
        }

        log::info!("Device removed: {}", device);
        Some(device)
    }

    /// Look up a tracked device
    pub fn get(&self, id: RawDeviceId) -> Option<&Device> {
        self.devices.get(&id)
    }

    /// Iterate over tracked devices in connection order
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// The most recently active device, if it is still connected
    pub fn last_active_device(&self) -> Option<&Device> {
        self.last_active.and_then(|id| self.devices.get(&id))
    }

    /// Feed one raw input value from a device.
    ///
    /// Returns true if the device was promoted to active.
    pub fn on_input_value(&mut self, id: RawDeviceId, value: InputValue) -> bool {
        if self.verbose_input {
            log::trace!(
                "Received input value from {}: {}, value={}",
                id,
                value.usage,
                value.integer_value
            );
        }

        if !value.is_activity() {
            return false;
        }

        self.promote(id, ActivationReason::InputValue(value))
    }

    /// Feed one scroll report from a device.
    ///
    /// Some trackpads never deliver per-value callbacks, so scroll reports
    /// are a second activity source. Returns true if the device was promoted.
    pub fn on_scroll_report(&mut self, id: RawDeviceId, delta_x: f64, delta_y: f64) -> bool {
        if delta_x == 0.0 && delta_y == 0.0 {
            return false;
        }

        self.promote(id, ActivationReason::ScrollReport)
    }

    /// Attribute an OS event to a tracked device.
    ///
    /// Keyboard/modifier events and events with no resolvable source fall
    /// back to the last active device.
    pub fn device_for_event(&self, event: &InputEvent) -> Option<&Device> {
        if event.is_keyboard() {
            return self.last_active_device();
        }

        match event.source.and_then(|id| self.devices.get(&id)) {
            Some(device) => Some(device),
            None => self.last_active_device(),
        }
    }

    fn promote(&mut self, id: RawDeviceId, reason: ActivationReason) -> bool {
        if self.last_active == Some(id) {
            return false;
        }

        let Some(device) = self.devices.get(&id) else {
            return false;
        };

        self.last_active = Some(id);

        match reason {
            ActivationReason::InputValue(value) => log::info!(
                "Last active device changed: {}, category={} (Reason: Received input value: {})",
                device,
                device.category(),
                value.usage
            ),
            ActivationReason::ScrollReport => log::info!(
                "Last active device changed: {}, category={} (Reason: Received scroll report)",
                device,
                device.category()
            ),
        }

        true
    }
}
