//! Bed Board - Hospital ward bed management dashboard
//!
//! Pulls the ward's published sheet as CSV and shows bed availability,
//! specialty counts, doctor caseload and the triage-coloured patient board.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use anyhow::Result;
use config::BoardConfig;
use eframe::egui;
use gui::BedBoardApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BoardConfig::load()?;
    tracing::info!(
        low = config.bed_range.low,
        high = config.bed_range.high,
        ttl_secs = config.cache_ttl_secs,
        "Starting Bed Board"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Pizarra Hospitalización"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Bed Board",
        options,
        Box::new(|cc| Ok(Box::new(BedBoardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
