// GamingMouse Config Model - Schemes
// Conditional, mergeable bundles of settings

use serde::Deserialize;

use super::field::{Field, Merge};
use super::matcher::DeviceMatcher;
use super::scrolling::Scrolling;
use crate::context::{ConditionContext, NullContext, Pid};
use crate::input::{Device, DeviceRegistry};

/// Activation condition of a scheme.
///
/// Every present field must be satisfied. A condition with no fields is
/// always satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct If {
    /// Device classification to match
    pub device: Option<DeviceMatcher>,
    /// Foreground application identifier
    pub app: Option<String>,
    /// Parent application identifier of the foreground process
    pub parent_app: Option<String>,
    /// Process group leader application identifier
    pub group_app: Option<String>,
    /// Display identifier
    pub display: Option<String>,
}

impl If {
    /// Condition on device classification only
    pub fn device(matcher: DeviceMatcher) -> Self {
        Self {
            device: Some(matcher),
            ..Self::default()
        }
    }

    pub fn app(app: impl Into<String>) -> Self {
        Self {
            app: Some(app.into()),
            ..Self::default()
        }
    }

    pub fn display(display: impl Into<String>) -> Self {
        Self {
            display: Some(display.into()),
            ..Self::default()
        }
    }

    /// Whether this condition holds for the target device and process
    pub fn is_satisfied(
        &self,
        device: Option<&Device>,
        pid: Option<Pid>,
        context: &dyn ConditionContext,
    ) -> bool {
        if let Some(matcher) = &self.device {
            match device {
                Some(device) if matcher.matches(device) => {}
                _ => return false,
            }
        }

        if let Some(app) = &self.app {
            if !pid.map_or(false, |pid| context.matches_app(app, pid)) {
                return false;
            }
        }

        if let Some(app) = &self.parent_app {
            if !pid.map_or(false, |pid| context.matches_parent_app(app, pid)) {
                return false;
            }
        }

        if let Some(app) = &self.group_app {
            if !pid.map_or(false, |pid| context.matches_group_app(app, pid)) {
                return false;
            }
        }

        if let Some(display) = &self.display {
            if !context.matches_display(display) {
                return false;
            }
        }

        true
    }

    /// Only a device matcher is set
    pub fn is_device_only(&self) -> bool {
        self.device.is_some()
            && self.app.is_none()
            && self.parent_app.is_none()
            && self.group_app.is_none()
            && self.display.is_none()
    }
}

/// A set of settings with optional activation conditions.
///
/// A scheme without conditions is always active. With conditions, it is
/// active when any one of them is satisfied. Several schemes can be active at
/// once; later schemes are merged over earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheme {
    pub conditions: Option<Vec<If>>,
    pub scrolling: Field<Scrolling>,
}

impl Scheme {
    /// Create an empty, always-active scheme
    pub fn new() -> Self {
        Self::default()
    }

    /// Scheme pinned to a single device classification
    pub fn for_device(device: &Device) -> Self {
        Self::new().with_if(If::device(DeviceMatcher::of(device)))
    }

    /// Append an activation condition
    pub fn with_if(mut self, condition: If) -> Self {
        self.conditions.get_or_insert_with(Vec::new).push(condition);
        self
    }

    pub fn with_scrolling(mut self, scrolling: Scrolling) -> Self {
        self.scrolling = Field::Value(scrolling);
        self
    }

    /// Effective scrolling settings, defaulting when absent
    pub fn scrolling(&self) -> Scrolling {
        self.scrolling.resolved()
    }

    /// Whether the scheme applies to the target device and process
    pub fn is_active(
        &self,
        device: Option<&Device>,
        pid: Option<Pid>,
        context: &dyn ConditionContext,
    ) -> bool {
        match &self.conditions {
            None => true,
            Some(conditions) => conditions
                .iter()
                .any(|condition| condition.is_satisfied(device, pid, context)),
        }
    }

    /// Exactly one condition, and it only pins a device classification
    pub fn is_device_specific(&self) -> bool {
        matches!(self.conditions.as_deref(), Some([condition]) if condition.is_device_only())
    }

    /// Device-specific scheme whose matcher accepts `device`
    pub fn is_device_specific_for(&self, device: &Device) -> bool {
        match self.conditions.as_deref() {
            Some([condition]) if condition.is_device_only() => condition
                .device
                .as_ref()
                .map_or(false, |matcher| matcher.matches(device)),
            _ => false,
        }
    }

    /// Connected devices whose device conditions activate this scheme
    pub fn matched_devices<'a>(
        &'a self,
        registry: &'a DeviceRegistry,
    ) -> impl Iterator<Item = &'a Device> + 'a {
        registry
            .devices()
            .filter(move |device| self.is_active(Some(*device), None, &NullContext))
    }

    /// First connected device activating this scheme
    pub fn first_matched_device<'a>(&'a self, registry: &'a DeviceRegistry) -> Option<&'a Device> {
        self.matched_devices(registry).next()
    }
}

impl Merge for Scheme {
    /// Only settings merge; conditions of the target are left alone
    fn merge_into(&self, target: &mut Self) {
        self.scrolling.merge_into(&mut target.scrolling);
    }
}
