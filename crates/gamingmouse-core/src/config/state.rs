// GamingMouse Config Model - Shared State
// Lock-protected configuration with a change generation

use std::sync::Arc;

use parking_lot::RwLock;

use super::configuration::{Configuration, SchemeIndex};
use super::scheme::Scheme;
use crate::context::NullContext;
use crate::input::Device;

#[derive(Debug, Default)]
struct Inner {
    configuration: Configuration,
    generation: u64,
}

/// Current configuration, shared between the event path and editors.
///
/// Readers always observe a whole configuration. The generation increases on
/// every replacement that changes the configuration, and stays put when an
/// equal configuration is written back.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationState {
    inner: Arc<RwLock<Inner>>,
}

impl ConfigurationState {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                configuration,
                generation: 0,
            })),
        }
    }

    /// Copy of the current configuration
    pub fn snapshot(&self) -> Configuration {
        self.inner.read().configuration.clone()
    }

    /// Run `f` against the current configuration under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Configuration) -> R) -> R {
        f(&self.inner.read().configuration)
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Replace the configuration. Returns whether it changed.
    pub fn replace(&self, configuration: Configuration) -> bool {
        let mut inner = self.inner.write();
        if inner.configuration == configuration {
            return false;
        }
        inner.configuration = configuration;
        inner.generation += 1;
        log::debug!("Configuration replaced (generation {})", inner.generation);
        true
    }

    /// Edit the configuration in place. Returns whether it changed.
    pub fn update(&self, f: impl FnOnce(&mut Configuration)) -> bool {
        let mut inner = self.inner.write();
        let mut configuration = inner.configuration.clone();
        f(&mut configuration);
        if inner.configuration == configuration {
            return false;
        }
        inner.configuration = configuration;
        inner.generation += 1;
        log::debug!("Configuration updated (generation {})", inner.generation);
        true
    }

    /// The scheme holding settings for exactly this device.
    ///
    /// Returns a fresh scheme pinned to the device when none exists yet.
    pub fn device_scheme(&self, device: &Device) -> Scheme {
        self.read(|configuration| match configuration.scheme_index(device) {
            SchemeIndex::At(index) => configuration.schemes[index].clone(),
            SchemeIndex::InsertAt(_) => Scheme::for_device(device),
        })
    }

    /// Store the device scheme, in place or at the insertion point
    pub fn set_device_scheme(&self, device: &Device, scheme: Scheme) -> bool {
        self.update(|configuration| {
            configuration.upsert_device_scheme(device, scheme);
        })
    }

    /// Effective scheme for a device, ignoring app and display conditions
    pub fn merged_scheme(&self, device: &Device) -> Scheme {
        self.read(|configuration| configuration.match_scheme(Some(device), None, &NullContext))
    }
}
