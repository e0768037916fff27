mod cli;
mod sim;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tether_bridge::{Bridge, HostRuntime, InitOptions, SensorCache, ToastFacade};
use tether_common::{SensorKind, ToastDuration};
use tether_config::TetherConfig;
use tether_surface::{dispatch_inbound, SurfaceFacade};

use cli::Demo;

fn load_config(args: &cli::Args) -> TetherConfig {
    let loaded = match &args.config {
        Some(path) => tether_config::load_from_path(Path::new(path)),
        None => tether_config::load_config(),
    };
    loaded.unwrap_or_else(|e| {
        eprintln!("config error: {e}; using defaults");
        TetherConfig::default()
    })
}

fn main() {
    let args = cli::parse();
    let config = load_config(&args);

    let directive = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.directive.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "tether=info".parse().unwrap()),
            ),
        )
        .init();

    // Boot contract: init once, on this (the designated) thread, before
    // anything else touches the bridge.
    let bridge = Arc::new(Bridge::new());
    let host: Arc<dyn HostRuntime> = Arc::new(sim::SimHost::new());
    let options = InitOptions {
        queue_warn_depth: config.dispatch.queue_warn_depth,
    };
    let mut main_loop = bridge
        .init_with(host, options)
        .expect("bridge init failed")
        .expect("bridge already initialized");

    // The foreign side: a thread the host runtime never created, attached
    // through the gateway, issuing commands back into the runtime.
    let foreign_bridge = Arc::clone(&bridge);
    let demo = args.demo;
    let sensor_rate = config.sensors.rate;
    let foreign = std::thread::spawn(move || {
        let _attachment = foreign_bridge
            .attach_current_thread()
            .expect("gateway attach failed");

        if demo.includes(Demo::Toast) {
            info!("--- toast demo ---");
            let toasts = ToastFacade::new(Arc::clone(&foreign_bridge));
            toasts
                .show("Hello from the foreign side!", ToastDuration::Long)
                .expect("toast show failed");
        }

        if demo.includes(Demo::Sensor) {
            info!("--- sensor demo ---");
            let cache = SensorCache::new(&foreign_bridge, SensorKind::Accelerometer, sensor_rate)
                .expect("sensor cache failed");
            for _ in 0..5 {
                match cache.read() {
                    Some(sample) => info!(
                        x = sample.x(),
                        y = sample.y(),
                        z = sample.z(),
                        "accelerometer"
                    ),
                    None => info!("accelerometer: no reading yet"),
                }
                std::thread::sleep(Duration::from_millis(100));
            }
            cache.stop();
        }

        if demo.includes(Demo::Webview) {
            info!("--- webview demo ---");
            let surface = SurfaceFacade::new(Arc::clone(&foreign_bridge));
            surface.create().expect("surface create failed");
            surface
                .load_url("https://example.test/")
                .expect("load_url failed");
            surface
                .run_script("console.log('Hello from foreign-injected JavaScript!')")
                .expect("run_script failed");

            // Simulate rendered content calling back in.
            let callbacks = surface.callbacks();
            dispatch_inbound(
                callbacks.as_ref(),
                r#"{"kind":"notify","payload":"hello from content"}"#,
            );
            dispatch_inbound(
                callbacks.as_ref(),
                r#"{"kind":"log","payload":"content booted"}"#,
            );
        }

        // All demos issued; stop the main loop once the queue drains.
        let dispatcher = foreign_bridge.dispatcher().expect("dispatcher");
        dispatcher.post(|ctx| ctx.request_shutdown());
    });

    main_loop.run();
    foreign.join().expect("foreign thread panicked");
    info!("done");
}
