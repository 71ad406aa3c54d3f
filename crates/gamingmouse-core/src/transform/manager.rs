// GamingMouse Transform - Manager
// Resolves the transformer chain for each incoming event

use super::cache::{CacheKey, CacheStats, TransformerCache};
use super::chain::TransformerChain;
use crate::config::ConfigurationState;
use crate::context::{ConditionContext, NullContext, Pid};
use crate::input::{Device, DeviceRegistry, InputEvent};

/// Entry point for the event path.
///
/// Owns the device registry and the chain cache, and reads the shared
/// configuration. Must be driven from a single event-processing thread.
pub struct EventTransformerManager {
    registry: DeviceRegistry,
    configuration: ConfigurationState,
    context: Box<dyn ConditionContext + Send>,
    cache: TransformerCache,
}

impl EventTransformerManager {
    pub fn new(configuration: ConfigurationState) -> Self {
        Self::with_registry(DeviceRegistry::new(), configuration)
    }

    pub fn with_registry(registry: DeviceRegistry, configuration: ConfigurationState) -> Self {
        Self {
            registry,
            configuration,
            context: Box::new(NullContext),
            cache: TransformerCache::default(),
        }
    }

    /// Replace the chain cache with an empty one of the given capacity
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = TransformerCache::new(capacity);
        self
    }

    pub fn with_context(mut self, context: impl ConditionContext + Send + 'static) -> Self {
        self.context = Box::new(context);
        self
    }

    /// Transformer chain for an event.
    ///
    /// The target device is derived from the event, falling back to the last
    /// active device. The scheme is matched against `target_pid`. Never fails:
    /// without any matching scheme the chain is empty.
    pub fn resolve_chain(
        &mut self,
        event: &InputEvent,
        source_pid: Option<Pid>,
        target_pid: Option<Pid>,
    ) -> &mut TransformerChain {
        self.cache.sync_generation(self.configuration.generation());

        let device = self.registry.device_for_event(event);
        let key = CacheKey::for_device(device);
        let configuration = &self.configuration;
        let context = self.context.as_ref();

        self.cache.get_or_build(key, || {
            let scheme =
                configuration.read(|config| config.match_scheme(device, target_pid, context));
            let chain = TransformerChain::from_scheme(&scheme);
            log::info!(
                "Initialize transformer chain {} with scheme {:?} (device={}, pid={:?}, source_pid={:?})",
                chain,
                scheme,
                device.map_or_else(|| "none".to_string(), ToString::to_string),
                target_pid,
                source_pid
            );
            chain
        })
    }

    /// Resolve the chain for an event and run the event through it
    pub fn transform(
        &mut self,
        event: InputEvent,
        source_pid: Option<Pid>,
        target_pid: Option<Pid>,
    ) -> Option<InputEvent> {
        self.resolve_chain(&event, source_pid, target_pid)
            .transform(event)
    }

    /// Most recently interacted-with pointing device
    pub fn current_active_device(&self) -> Option<&Device> {
        self.registry.last_active_device()
    }

    pub fn devices(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn devices_mut(&mut self) -> &mut DeviceRegistry {
        &mut self.registry
    }

    pub fn configuration(&self) -> &ConfigurationState {
        &self.configuration
    }

    pub fn cache(&self) -> &TransformerCache {
        &self.cache
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
