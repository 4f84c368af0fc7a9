use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use eframe::egui_wgpu;
use tracing_subscriber::EnvFilter;

use printmon::app::PrintMonApp;
use printmon::config;

/// Live dashboard for a 3D printer publishing telemetry over Socket.IO.
#[derive(Debug, Parser)]
#[command(name = "printmon", version, about)]
struct Args {
    /// Path to printmon.toml (defaults to $XDG_CONFIG_HOME/printmon/printmon.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override transport.server_url from the config file.
    #[arg(long)]
    url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let path = args.config.unwrap_or_else(config::default_path);
    let mut config = config::load(&path)
        .with_context(|| format!("failed to load config from '{}'", path.display()))?;
    if let Some(url) = args.url {
        config.transport.server_url = url;
        config.validate().context("invalid --url")?;
    }
    tracing::info!(
        "Telemetry from {} (event '{}')",
        config.transport.server_url,
        config.transport.event
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("3D Printer Monitor")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 640.0]),
        wgpu_options: egui_wgpu::WgpuConfiguration {
            present_mode: eframe::wgpu::PresentMode::AutoVsync,
            wgpu_setup: egui_wgpu::WgpuSetup::CreateNew(egui_wgpu::WgpuSetupCreateNew {
                instance_descriptor: eframe::wgpu::InstanceDescriptor {
                    backends: eframe::wgpu::Backends::DX12
                        | eframe::wgpu::Backends::VULKAN
                        | eframe::wgpu::Backends::METAL
                        | eframe::wgpu::Backends::GL,
                    ..Default::default()
                },
                power_preference: eframe::wgpu::PowerPreference::LowPower,
                ..Default::default()
            }),
            ..Default::default()
        },
        ..Default::default()
    };

    eframe::run_native(
        "printmon",
        options,
        Box::new(move |cc| Ok(Box::new(PrintMonApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("window closed with error: {e}"))
}
