// GamingMouse Pure Rust Event Loop
// Reads pointer devices through evdev and reports them as raw devices

use std::os::unix::io::AsRawFd;

use evdev::{AbsoluteAxisType, Device, Key, RelativeAxisType};

use super::translate::{matches_device_filter, PointerCapabilities, BTN_MOUSE, BTN_TASK};
use crate::input::{DeviceDescriptor, RawDeviceId};

/// Result type for event loop operations
pub type EventLoopResult<T> = Result<T, EventLoopError>;

/// Errors that can occur in event loop
#[derive(Debug, thiserror::Error)]
pub enum EventLoopError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Device information for listing devices
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub path: Option<String>,
    pub capabilities: PointerCapabilities,
}

impl DeviceInfo {
    pub fn descriptor(&self) -> DeviceDescriptor {
        self.capabilities.to_descriptor()
    }
}

/// Raw event read from a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolledEvent {
    pub source: RawDeviceId,
    pub event_type: u16,
    pub code: u16,
    pub value: i32,
}

/// Result of one poll round
#[derive(Debug, Default)]
pub struct PollOutcome {
    pub events: Vec<PolledEvent>,
    /// Devices that went away during this round
    pub removed: Vec<RawDeviceId>,
}

struct OpenDevice {
    id: RawDeviceId,
    path: String,
    device: Device,
    descriptor: DeviceDescriptor,
}

/// Event loop over pointing devices.
///
/// Devices are never grabbed; events keep flowing to the rest of the system.
pub struct EventLoop {
    devices: Vec<OpenDevice>,
    poll_fds: Vec<libc::pollfd>,
    filter: Vec<String>,
    next_id: u64,
}

impl EventLoop {
    /// Open every pointing device
    pub fn new() -> EventLoopResult<Self> {
        Self::new_filtered(&[])
    }

    /// Open devices matching `filter` by name or path, or all pointing devices
    pub fn new_filtered(filter: &[String]) -> EventLoopResult<Self> {
        let mut event_loop = Self {
            devices: Vec::new(),
            poll_fds: Vec::new(),
            filter: filter.to_vec(),
            next_id: 1,
        };
        event_loop.rescan();

        if event_loop.devices.is_empty() {
            return Err(EventLoopError::DeviceNotFound(
                "No pointing devices found".to_string(),
            ));
        }
        Ok(event_loop)
    }

    /// Open matching devices that appeared since the last scan.
    ///
    /// Returns the newly opened devices. Ids are never reused.
    pub fn rescan(&mut self) -> Vec<(RawDeviceId, DeviceDescriptor)> {
        let mut added = Vec::new();
        for (path, device) in evdev::enumerate() {
            let path = path.to_string_lossy().into_owned();
            if self.devices.iter().any(|open| open.path == path) {
                continue;
            }
            let capabilities = capabilities_of(&device);
            if !matches_device_filter(&capabilities.name, &path, &self.filter, capabilities.is_pointer()) {
                continue;
            }

            let id = RawDeviceId(self.next_id);
            self.next_id += 1;
            log::debug!("Opened {} as {} ({})", path, id, capabilities.name);
            let descriptor = capabilities.to_descriptor();
            added.push((id, descriptor.clone()));
            self.devices.push(OpenDevice {
                id,
                path,
                device,
                descriptor,
            });
        }

        if !added.is_empty() {
            self.poll_fds = Self::create_poll_fds(&self.devices);
        }
        added
    }

    fn create_poll_fds(devices: &[OpenDevice]) -> Vec<libc::pollfd> {
        devices
            .iter()
            .map(|d| libc::pollfd {
                fd: d.device.as_raw_fd(),
                events: libc::POLLIN,
                revents: 0,
            })
            .collect()
    }

    /// List all pointing devices without opening them for reading
    pub fn list_devices() -> EventLoopResult<Vec<DeviceInfo>> {
        let devices: Vec<DeviceInfo> = evdev::enumerate()
            .map(|(path, device)| DeviceInfo {
                path: path.to_str().map(|s| s.to_string()),
                capabilities: capabilities_of(&device),
            })
            .filter(|info| info.capabilities.is_pointer())
            .collect();

        if devices.is_empty() {
            return Err(EventLoopError::DeviceNotFound(
                "No pointing devices found".to_string(),
            ));
        }
        Ok(devices)
    }

    /// Opened devices and their descriptors
    pub fn devices(&self) -> impl Iterator<Item = (RawDeviceId, &DeviceDescriptor)> {
        self.devices.iter().map(|d| (d.id, &d.descriptor))
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    /// Wait up to `timeout_ms` for events (-1 waits forever).
    ///
    /// An interrupted wait returns no events. Devices that fail with ENODEV
    /// are closed and reported in `removed`.
    pub fn poll_for_events(&mut self, timeout_ms: i32) -> EventLoopResult<PollOutcome> {
        let mut outcome = PollOutcome::default();
        if self.poll_fds.is_empty() {
            return Ok(outcome);
        }

        let poll_result = unsafe {
            libc::poll(
                self.poll_fds.as_mut_ptr(),
                self.poll_fds.len() as libc::nfds_t,
                timeout_ms,
            )
        };

        if poll_result < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(libc::EINTR) {
                return Ok(outcome);
            }
            return Err(EventLoopError::Io(err));
        }
        if poll_result == 0 {
            return Ok(outcome);
        }

        for (i, open) in self.devices.iter_mut().enumerate() {
            let revents = self.poll_fds[i].revents;
            if revents & (libc::POLLHUP | libc::POLLERR) != 0 {
                outcome.removed.push(open.id);
                continue;
            }
            if revents & libc::POLLIN == 0 {
                continue;
            }
            match open.device.fetch_events() {
                Ok(events) => outcome.events.extend(events.map(|event| PolledEvent {
                    source: open.id,
                    event_type: event.event_type().0,
                    code: event.code(),
                    value: event.value(),
                })),
                Err(err) if err.raw_os_error() == Some(libc::ENODEV) => {
                    outcome.removed.push(open.id)
                }
                Err(err) => log::warn!("Failed to read from {}: {}", open.id, err),
            }
        }

        if !outcome.removed.is_empty() {
            self.devices.retain(|d| !outcome.removed.contains(&d.id));
            self.poll_fds = Self::create_poll_fds(&self.devices);
        }

        Ok(outcome)
    }
}

fn capabilities_of(device: &Device) -> PointerCapabilities {
    let relative_xy = device.supported_relative_axes().map_or(false, |axes| {
        axes.contains(RelativeAxisType::REL_X) && axes.contains(RelativeAxisType::REL_Y)
    });
    let multitouch = device
        .supported_absolute_axes()
        .map_or(false, |axes| axes.contains(AbsoluteAxisType::ABS_MT_POSITION_X));
    let (buttons, finger) = device.supported_keys().map_or((0, false), |keys| {
        let buttons = (BTN_MOUSE..=BTN_TASK)
            .filter(|code| keys.contains(Key::new(*code)))
            .count() as u32;
        (buttons, keys.contains(Key::BTN_TOOL_FINGER))
    });
    let input_id = device.input_id();

    PointerCapabilities {
        name: device.name().unwrap_or("Unknown").to_string(),
        vendor_id: input_id.vendor(),
        product_id: input_id.product(),
        unique_name: device.unique_name().map(|s| s.to_string()),
        buttons,
        relative_xy,
        touchpad: multitouch && finger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_devices() {
        match EventLoop::list_devices() {
            Ok(devices) => {
                for device in &devices {
                    assert!(device.capabilities.is_pointer());
                    println!("  {:?}: {}", device.path, device.capabilities.name);
                }
            }
            Err(EventLoopError::DeviceNotFound(_)) => {
                println!("Skipping test: no pointing devices found");
            }
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    #[test]
    fn test_rescan_skips_open_devices() {
        match EventLoop::new() {
            Ok(mut event_loop) => {
                let count = event_loop.device_count();
                assert!(event_loop.rescan().is_empty());
                assert_eq!(event_loop.device_count(), count);
            }
            Err(EventLoopError::DeviceNotFound(_)) => {
                println!("Skipping test: no pointing devices found");
            }
            Err(e) => panic!("Unexpected error: {}", e),
        }
    }

    #[test]
    fn test_unmatched_filter() {
        let filter = vec!["no such device \u{1}".to_string()];
        assert!(matches!(
            EventLoop::new_filtered(&filter),
            Err(EventLoopError::DeviceNotFound(_))
        ));
    }
}
