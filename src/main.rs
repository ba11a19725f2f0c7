use anyhow::{anyhow, Context};
use eframe::egui;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod assistant;
mod config;
mod history;
mod resolver;
mod session;

use app::CoderApp;
use config::Config;

fn main() -> anyhow::Result<()> {
    // Respects RUST_LOG, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let config = Config::from_env().context("invalid configuration")?;

    // The UI owns the main thread; delayed answers run on this runtime.
    let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
    let _guard = runtime.enter();

    info!(
        delay_ms = config.delay.as_millis() as u64,
        font_size = config.font_size,
        "starting AI CLI Coder"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_title("AI CLI Coder")
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "AI CLI Coder",
        options,
        Box::new(move |cc| {
            let mut visuals = egui::Visuals::dark();
            visuals.window_fill = egui::Color32::from_rgb(10, 10, 10);
            visuals.panel_fill = egui::Color32::from_rgb(10, 10, 10);
            visuals.extreme_bg_color = egui::Color32::BLACK;
            cc.egui_ctx.set_visuals(visuals);

            Ok(Box::new(CoderApp::new(&config)))
        }),
    )
    .map_err(|err| anyhow!("terminal window failed: {err}"))
}
