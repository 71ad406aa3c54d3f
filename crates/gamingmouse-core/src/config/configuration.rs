// GamingMouse Config Model - Configuration
// Ordered scheme list, effective scheme resolution and device-specific scheme placement

use super::field::Merge;
use super::scheme::Scheme;
use crate::context::{ConditionContext, Pid};
use crate::input::Device;

/// Where a device-specific scheme lives, or where it should be inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemeIndex {
    /// Existing scheme to replace in place
    At(usize),
    /// Position to insert a new scheme at
    InsertAt(usize),
}

/// Ordered list of schemes. Later schemes override earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Configuration {
    pub schemes: Vec<Scheme>,
}

impl Configuration {
    pub fn new(schemes: Vec<Scheme>) -> Self {
        Self { schemes }
    }

    /// Schemes active for the target device and process, in order
    pub fn active_schemes<'a>(
        &'a self,
        device: Option<&'a Device>,
        pid: Option<Pid>,
        context: &'a dyn ConditionContext,
    ) -> impl Iterator<Item = &'a Scheme> + 'a {
        self.schemes
            .iter()
            .filter(move |scheme| scheme.is_active(device, pid, context))
    }

    /// Merge every active scheme, in order, into one effective scheme.
    ///
    /// With no active scheme the result is empty, which builds an empty chain.
    pub fn match_scheme(
        &self,
        device: Option<&Device>,
        pid: Option<Pid>,
        context: &dyn ConditionContext,
    ) -> Scheme {
        let mut merged = Scheme::new();
        for scheme in self.active_schemes(device, pid, context) {
            scheme.merge_into(&mut merged);
        }
        merged
    }

    /// Device-specific schemes that apply to `device`, with their indices
    pub fn device_specific_schemes<'a>(
        &'a self,
        device: &'a Device,
    ) -> impl Iterator<Item = (usize, &'a Scheme)> + 'a {
        self.schemes
            .iter()
            .enumerate()
            .filter(move |(_, scheme)| scheme.is_device_specific_for(device))
    }

    /// Locate the scheme that holds settings for exactly this device.
    ///
    /// An existing scheme is edited in place (the first one if duplicates
    /// exist). Otherwise new device-specific schemes are kept together: the
    /// insertion point follows the last device-specific scheme of any device,
    /// or the end of the list if there is none.
    pub fn scheme_index(&self, device: &Device) -> SchemeIndex {
        if let Some((index, _)) = self.device_specific_schemes(device).next() {
            return SchemeIndex::At(index);
        }

        match self.schemes.iter().rposition(Scheme::is_device_specific) {
            Some(last) => SchemeIndex::InsertAt(last + 1),
            None => SchemeIndex::InsertAt(self.schemes.len()),
        }
    }

    /// Write a device scheme at its located position. Returns its index.
    pub fn upsert_device_scheme(&mut self, device: &Device, scheme: Scheme) -> usize {
        match self.scheme_index(device) {
            SchemeIndex::At(index) => {
                self.schemes[index] = scheme;
                index
            }
            SchemeIndex::InsertAt(index) => {
                self.schemes.insert(index, scheme);
                index
            }
        }
    }
}
