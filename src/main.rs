// src/main.rs
//! gnss-tracker: record NMEA GGA fixes and plot the trajectory in 3D

use std::path::Path;
use std::sync::atomic::Ordering;

use clap::Parser;
use env_logger::{Builder, Env, Target};
use log::{error, info};

use gnss_tracker::{
    config::SessionConfig,
    plot::{self, RenderResult},
    session::Session,
    source,
};

/// Collect GGA fixes from a serial GNSS receiver, or from the built-in
/// test sentences, and render the track as a 3D trajectory.
#[derive(Parser, Debug)]
#[command(name = "gnss-tracker", version, about)]
struct Cli {
    /// Read from a live serial device instead of the built-in test sentences
    #[arg(long)]
    live: bool,

    /// Serial device to read from
    #[arg(short, long)]
    port: Option<String>,

    /// Serial bit rate
    #[arg(short, long)]
    baud: Option<u32>,

    /// Stop collecting after this many fixes
    #[arg(long)]
    max_points: Option<usize>,

    /// Write the rendered trajectory to trajectory_3d.html
    #[arg(long)]
    save_image: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

impl Cli {
    fn into_config(self) -> SessionConfig {
        let mut config = SessionConfig::default();
        config.use_live_source = self.live;
        config.save_output_image = self.save_image;
        if let Some(port) = self.port {
            config.device_address = port;
        }
        if let Some(baud) = self.baud {
            config.bit_rate = baud;
        }
        if let Some(max_points) = self.max_points {
            config.max_points = max_points;
        }
        config
    }
}

#[tokio::main]
async fn main() -> gnss_tracker::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder
        .target(Target::Stdout)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let cli = Cli::parse();

    if cli.list_ports {
        return source::serial::list_ports();
    }

    let config = cli.into_config();
    info!(
        "starting gnss-tracker ({} source)",
        if config.use_live_source { "live" } else { "fixture" }
    );

    let session = Session::new(config.clone());

    // ctrl-c drops the stop flag; the read loop notices within its timeout
    let stop = session.stop_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted, stopping collection");
            stop.store(false, Ordering::Relaxed);
        }
    });

    let track = session.collect().await;

    for (n, fix) in track.snapshot().iter().enumerate() {
        info!(
            "{:03}: {} | {:.6}, {:.6} | {:.2} m",
            n + 1,
            fix.time,
            fix.latitude,
            fix.longitude,
            fix.altitude
        );
    }

    let output = config
        .save_output_image
        .then(|| Path::new(plot::OUTPUT_FILE));
    match plot::render_track(&track, output, true) {
        RenderResult::Completed {
            output: Some(path),
        } => info!("trajectory written to {}", path.display()),
        RenderResult::Completed { output: None } => {}
        RenderResult::NothingToRender => info!("no fixes collected, nothing to render"),
        RenderResult::Failed(reason) => error!("render failed: {}", reason),
    }

    Ok(())
}
