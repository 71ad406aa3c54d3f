// GamingMouse CLI
// Linux front-end: lists pointing devices, checks configs and monitors scroll transforms

#![cfg_attr(feature = "pure-rust", allow(dead_code))]

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[cfg(feature = "pure-rust")]
use anyhow::Context;
#[cfg(feature = "pure-rust")]
use clap::Parser;

#[cfg(feature = "pure-rust")]
use gamingmouse_core::event::{translate, EventLoop};
#[cfg(feature = "pure-rust")]
use gamingmouse_core::{
    ConfigWatcher, Configuration, ConfigurationState, Device, DeviceDescriptor,
    EventTransformerManager, NullContext, Pid, ProcessContext, RawDeviceId, Settings,
    TransformerChain,
};

/// Per-device scroll customization for gaming mice
#[cfg(feature = "pure-rust")]
#[derive(Parser, Debug)]
#[command(name = "gamingmouse")]
#[command(version)]
#[command(about = "Per-device scroll customization for gaming mice", long_about = None)]
struct Args {
    /// TOML configuration file (default: ~/.config/gamingmouse/config.toml)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Only use these devices, by name or path (can be used multiple times)
    #[arg(short, long, value_name = "DEVICE")]
    devices: Vec<String>,

    /// Reload the configuration when the file changes
    #[arg(short, long)]
    watch: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Match app conditions against this process
    #[arg(long, value_name = "PID")]
    target_pid: Option<Pid>,

    /// Name of the current display, for display conditions
    #[arg(long, value_name = "NAME")]
    display: Option<String>,

    /// Validate config, print the resulting chains and exit
    #[arg(long)]
    check_config: bool,

    /// List available pointing devices
    #[arg(long)]
    list_devices: bool,
}

#[cfg(feature = "pure-rust")]
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

/// Representative devices used to preview a configuration
#[cfg(feature = "pure-rust")]
fn sample_devices() -> Vec<(&'static str, Option<Device>)> {
    vec![
        (
            "gaming mouse",
            Some(Device::new(
                RawDeviceId(1),
                DeviceDescriptor::new("Gaming mouse")
                    .with_vendor_id(0x046d)
                    .with_product_id(0xc08b),
            )),
        ),
        (
            "Apple mouse",
            Some(Device::new(
                RawDeviceId(2),
                DeviceDescriptor::new("Magic Mouse")
                    .with_vendor_id(0x05ac)
                    .with_product_id(0x030d),
            )),
        ),
        ("no device", None),
    ]
}

/// Chain each sample device would get, ignoring app and display conditions
#[cfg(feature = "pure-rust")]
fn preview_chains(configuration: &Configuration) -> Vec<(&'static str, TransformerChain)> {
    sample_devices()
        .into_iter()
        .map(|(label, device)| {
            let scheme = configuration.match_scheme(device.as_ref(), None, &NullContext);
            (label, TransformerChain::from_scheme(&scheme))
        })
        .collect()
}

/// App and display context for the running session
#[cfg(feature = "pure-rust")]
fn condition_context(args: &Args) -> ProcessContext {
    let mut context = ProcessContext::new();
    context.set_display(args.display.clone());
    context
}

/// How often to look for newly connected devices
const RESCAN_INTERVAL: Duration = Duration::from_secs(2);

/// Main application state
#[cfg(feature = "pure-rust")]
struct Application {
    args: Args,
    config_path: PathBuf,
    settings: Settings,
    state: ConfigurationState,
    /// Flag to signal event loop to stop
    running: Arc<AtomicBool>,
}

#[cfg(feature = "pure-rust")]
impl Application {
    fn new(args: Args) -> anyhow::Result<Self> {
        let (config_path, configuration) = match args.config.clone() {
            Some(path) => {
                let configuration = Configuration::from_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                (path, configuration)
            }
            None => {
                let path = Configuration::default_path()
                    .context("Could not determine the default configuration path")?;
                let configuration = Configuration::load_default()
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                (path, configuration)
            }
        };
        log::info!(
            "Loaded {} schemes from {}",
            configuration.schemes.len(),
            config_path.display()
        );

        let settings = match Settings::load_default() {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Could not load settings, using defaults: {}", e);
                Settings::new()
            }
        };

        Ok(Self {
            args,
            config_path,
            settings,
            state: ConfigurationState::new(configuration),
            running: Arc::new(AtomicBool::new(true)),
        })
    }

    fn check_config(&self) {
        let configuration = self.state.snapshot();
        println!(
            "Configuration is valid ({} schemes)",
            configuration.schemes.len()
        );
        for (label, chain) in preview_chains(&configuration) {
            println!("  {}: {}", label, chain);
        }
    }

    fn list_devices() -> anyhow::Result<()> {
        let devices = EventLoop::list_devices()?;
        println!("Found {} pointing device(s):", devices.len());
        for device in &devices {
            let caps = &device.capabilities;
            let classification = gamingmouse_core::classify(&device.descriptor());
            println!(
                "  {} [{:04x}:{:04x}] {} gaming={} ({})",
                caps.name,
                caps.vendor_id,
                caps.product_id,
                classification.category,
                classification.is_gaming_mouse,
                device.path.as_deref().unwrap_or("?")
            );
        }
        Ok(())
    }

    fn install_signal_handler(&self) {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let running = self.running.clone();
        std::thread::spawn(move || {
            if let Ok(mut signals) = Signals::new([SIGINT, SIGTERM]) {
                if signals.forever().next().is_some() {
                    log::info!("Received signal, shutting down");
                    running.store(false, Ordering::SeqCst);
                }
            }
        });
    }

    fn reload(&self) {
        match Configuration::from_file(&self.config_path) {
            Ok(configuration) => {
                if self.state.replace(configuration) {
                    log::info!("Configuration reloaded from {}", self.config_path.display());
                } else {
                    log::debug!("Configuration file touched without changes");
                }
            }
            Err(e) => log::warn!("Keeping previous configuration: {}", e),
        }
    }

    fn run(&self) -> anyhow::Result<()> {
        let mut event_loop = EventLoop::new_filtered(&self.args.devices)?;

        let mut manager = EventTransformerManager::new(self.state.clone())
            .with_cache_capacity(self.settings.cache_capacity())
            .with_context(condition_context(&self.args));
        manager
            .devices_mut()
            .set_verbose_input(self.settings.verbose_input());
        for (id, descriptor) in event_loop.devices() {
            manager.devices_mut().add(id, descriptor.clone());
        }

        self.install_signal_handler();

        let watcher = if self.args.watch {
            match ConfigWatcher::new(&self.config_path, self.settings.debounce()) {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    log::warn!("Not watching {}: {}", self.config_path.display(), e);
                    None
                }
            }
        } else {
            None
        };
        let mut last_rescan = Instant::now();
        log::info!(
            "Monitoring {} device(s). Press Ctrl+C to exit.",
            event_loop.device_count()
        );

        while self.running.load(Ordering::SeqCst) {
            let outcome = event_loop.poll_for_events(100)?;

            for id in outcome.removed {
                manager.devices_mut().remove(id);
            }
            if last_rescan.elapsed() >= RESCAN_INTERVAL {
                last_rescan = Instant::now();
                for (id, descriptor) in event_loop.rescan() {
                    manager.devices_mut().add(id, descriptor);
                }
            }

            for polled in outcome.events {
                let translation = translate(polled.source, polled.event_type, polled.code, polled.value);
                if let Some(value) = translation.value {
                    manager.devices_mut().on_input_value(polled.source, value);
                }
                let Some(event) = translation.event else {
                    continue;
                };
                let Some(scroll) = event.as_scroll().copied() else {
                    continue;
                };

                manager
                    .devices_mut()
                    .on_scroll_report(polled.source, scroll.delta_x, scroll.delta_y);
                match manager.transform(event, None, self.args.target_pid) {
                    Some(out) => {
                        if let Some(result) = out.as_scroll() {
                            log::info!(
                                "Scroll ({}, {}) -> ({}, {})",
                                scroll.delta_x,
                                scroll.delta_y,
                                result.delta_x,
                                result.delta_y
                            );
                        }
                    }
                    None => log::debug!("Scroll ({}, {}) consumed", scroll.delta_x, scroll.delta_y),
                }
            }

            if watcher.as_ref().is_some_and(ConfigWatcher::poll) {
                self.reload();
            }
        }

        log::info!("Cache stats: {:?}", manager.cache_stats());
        Ok(())
    }
}

#[cfg(feature = "pure-rust")]
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Listing devices doesn't need a configuration
    if args.list_devices {
        return Application::list_devices();
    }

    let app = Application::new(args)?;
    if app.args.check_config {
        app.check_config();
        return Ok(());
    }

    app.run()
}

// Stub for when pure-rust feature is not enabled
#[cfg(not(feature = "pure-rust"))]
fn main() {
    eprintln!("Error: gamingmouse binary requires the 'pure-rust' feature to be enabled.");
    eprintln!("Please build with: cargo build --release --features pure-rust --bin gamingmouse");
    std::process::exit(1);
}
