// GamingMouse Integration Tests
//
// These tests exercise the pipeline through the public API:
// device registry -> scheme resolution -> transformer cache -> chain
//
// Run with: cargo test --test integration_test

use std::io::Write;

use gamingmouse_core::config::{SchemeIndex, DEFAULT_DEBOUNCE};
use gamingmouse_core::input::usage::{PAGE_DIGITIZER, DIG_TOUCHPAD};
use gamingmouse_core::transform::Axis;
use gamingmouse_core::{
    classify, Bidirectional, Category, Configuration, ConfigurationState, Device,
    DeviceDescriptor, DeviceMatcher, Distance, EventTransformer, EventTransformerManager, If,
    InputEvent, NullContext, RawDeviceId, Scheme, ScrollEvent, Scrolling, Settings, Usage,
};

// =========================================================================
// Helpers
// =========================================================================

fn gaming_descriptor() -> DeviceDescriptor {
    DeviceDescriptor::new("Logitech G502")
        .with_vendor_id(0x046d)
        .with_product_id(0xc08b)
        .with_usage(Usage::MOUSE)
}

fn magic_descriptor() -> DeviceDescriptor {
    DeviceDescriptor::new("Magic Mouse")
        .with_vendor_id(0x05ac)
        .with_product_id(0x030d)
}

fn reverse_vertical_for_gaming() -> Configuration {
    Configuration::new(vec![Scheme::new()
        .with_if(If::device(DeviceMatcher::gaming_mouse(true)))
        .with_scrolling(Scrolling::new().with_reverse(Bidirectional::vertical(true)))])
}

fn wheel(id: u64) -> InputEvent {
    InputEvent::scroll(ScrollEvent::lines(0.0, 1.0), Some(RawDeviceId(id)))
}

/// Manager with a gaming mouse (#1) and a Magic Mouse (#2)
fn manager(configuration: Configuration) -> EventTransformerManager {
    let mut manager = EventTransformerManager::new(ConfigurationState::new(configuration));
    manager.devices_mut().add(RawDeviceId(1), gaming_descriptor());
    manager.devices_mut().add(RawDeviceId(2), magic_descriptor());
    manager
}

// =========================================================================
// Classification
// =========================================================================

#[test]
fn test_unknown_identity_is_gaming_mouse() {
    let descriptors = [
        DeviceDescriptor::new("Mystery"),
        DeviceDescriptor::new("Vendor only").with_vendor_id(0x05ac),
        DeviceDescriptor::new("Product only").with_product_id(0x030d),
        DeviceDescriptor::new("Touchy").with_usage(Usage::TOUCHPAD),
    ];
    for descriptor in &descriptors {
        assert!(classify(descriptor).is_gaming_mouse, "{}", descriptor.name);
    }
}

#[test]
fn test_exception_list_is_mouse_not_gaming() {
    for vendor in [0x004c, 0x05ac] {
        for product in [0x0269, 0x030d] {
            let descriptor = DeviceDescriptor::new("Apple mouse")
                .with_vendor_id(vendor)
                .with_product_id(product)
                .with_usage(Usage::new(PAGE_DIGITIZER, DIG_TOUCHPAD));
            let classification = classify(&descriptor);
            assert_eq!(classification.category, Category::Mouse);
            assert!(!classification.is_gaming_mouse);
        }
    }
}

#[test]
fn test_known_trackpad_is_not_gaming() {
    let descriptor = DeviceDescriptor::new("Magic Trackpad")
        .with_vendor_id(0x05ac)
        .with_product_id(0x0265)
        .with_usage(Usage::TOUCHPAD);
    let classification = classify(&descriptor);
    assert_eq!(classification.category, Category::Trackpad);
    assert!(!classification.is_gaming_mouse);
}

// =========================================================================
// Scheme resolution
// =========================================================================

#[test]
fn test_later_scheme_wins_merge() {
    let configuration = Configuration::new(vec![
        Scheme::new().with_scrolling(
            Scrolling::new().with_distance(Bidirectional::horizontal(Distance::Line(1))),
        ),
        Scheme::new().with_scrolling(
            Scrolling::new().with_distance(Bidirectional::horizontal(Distance::Pixel(24.0))),
        ),
    ]);

    let scheme = configuration.match_scheme(None, None, &NullContext);
    assert_eq!(
        scheme.scrolling().distance.value().unwrap().horizontal,
        Some(Distance::Pixel(24.0))
    );
}

#[test]
fn test_locator_inserts_after_device_block() {
    let gaming = Device::new(RawDeviceId(1), gaming_descriptor());
    let mut configuration = Configuration::new(vec![
        Scheme::new().with_if(If::device(DeviceMatcher::gaming_mouse(false))),
        Scheme::new().with_if(If::device(DeviceMatcher::gaming_mouse(false))),
        Scheme::new().with_if(If::device(DeviceMatcher::gaming_mouse(false))),
        Scheme::new().with_if(If::app("firefox")),
    ]);

    assert_eq!(configuration.scheme_index(&gaming), SchemeIndex::InsertAt(3));
    configuration.upsert_device_scheme(&gaming, Scheme::for_device(&gaming));
    assert_eq!(configuration.scheme_index(&gaming), SchemeIndex::At(3));
}

// =========================================================================
// Chain resolution and cache
// =========================================================================

#[test]
fn test_end_to_end_reverse_for_gaming_mouse() {
    let mut manager = manager(reverse_vertical_for_gaming());

    let chain = manager.resolve_chain(&wheel(1), None, None);
    assert_eq!(chain.transformers(), &[EventTransformer::reverse(true, false)]);

    assert!(manager.resolve_chain(&wheel(2), None, None).is_empty());
}

#[test]
fn test_resolution_is_idempotent() {
    let mut manager = manager(reverse_vertical_for_gaming());

    let first = manager.resolve_chain(&wheel(1), None, None).clone();
    let stats = manager.cache_stats();
    let second = manager.resolve_chain(&wheel(1), None, None).clone();

    assert_eq!(first, second);
    let after = manager.cache_stats();
    assert_eq!(after.hits, stats.hits + 1);
    assert_eq!(after.deactivations, stats.deactivations);
    assert_eq!(after.reactivations, stats.reactivations);
}

#[test]
fn test_back_and_forth_switching() {
    let mut manager = manager(reverse_vertical_for_gaming());

    let n = 9;
    for i in 0..n {
        manager.resolve_chain(&wheel(1 + (i % 2)), None, None);
    }

    let stats = manager.cache_stats();
    assert_eq!(stats.deactivations, n - 1);
    assert_eq!(stats.reactivations, n - 1);
    assert_eq!(stats.misses, 2);
}

#[test]
fn test_configuration_change_forces_rebuild() {
    let mut manager = manager(reverse_vertical_for_gaming());
    manager.resolve_chain(&wheel(1), None, None);
    manager.resolve_chain(&wheel(1), None, None);
    assert_eq!(manager.cache_stats().misses, 1);

    let state = manager.configuration().clone();
    state.update(|configuration| {
        configuration.schemes.push(Scheme::new().with_scrolling(
            Scrolling::new().with_distance(Bidirectional::vertical(Distance::Line(3))),
        ));
    });

    let chain = manager.resolve_chain(&wheel(1), None, None);
    assert_eq!(
        chain.transformers(),
        &[
            EventTransformer::reverse(true, false),
            EventTransformer::linear(Axis::Vertical, Distance::Line(3)),
        ]
    );
    assert_eq!(manager.cache_stats().misses, 2);
}

#[test]
fn test_unchanged_configuration_keeps_cache() {
    let mut manager = manager(reverse_vertical_for_gaming());
    manager.resolve_chain(&wheel(1), None, None);

    manager.configuration().replace(reverse_vertical_for_gaming());
    manager.resolve_chain(&wheel(1), None, None);

    assert_eq!(manager.cache_stats().misses, 1);
    assert_eq!(manager.cache_stats().invalidations, 0);
}

#[test]
fn test_removed_device_falls_back() {
    let mut manager = manager(reverse_vertical_for_gaming());
    manager.devices_mut().on_scroll_report(RawDeviceId(1), 0.0, 1.0);
    manager.devices_mut().remove(RawDeviceId(1));

    assert!(manager.current_active_device().is_none());
    // Untracked source and no active device: no device conditions hold
    assert!(manager.resolve_chain(&wheel(1), None, None).is_empty());
}

// =========================================================================
// Files
// =========================================================================

#[test]
fn test_configuration_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[[schemes]]
if = {{ device = {{ is_gaming_mouse = true }} }}

[schemes.scrolling]
reverse = {{ vertical = true }}
"#
    )
    .unwrap();

    let configuration = Configuration::from_file(file.path()).unwrap();
    assert_eq!(configuration, reverse_vertical_for_gaming());
}

#[test]
fn test_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[pipeline]\ncache_capacity = 8").unwrap();

    let mut settings = Settings::from_file(file.path()).unwrap();
    assert_eq!(settings.cache_capacity(), 8);
    assert_eq!(settings.debounce(), DEFAULT_DEBOUNCE);
    assert_eq!(settings.source_path(), Some(file.path()));

    writeln!(file, "[watch]\ndebounce_ms = 20").unwrap();
    settings.reload().unwrap();
    assert_eq!(settings.debounce().as_millis(), 20);
}
