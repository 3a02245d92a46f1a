use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, ClientSettings};
use crossbeam_channel::{bounded, unbounded};
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use controller::events::{UiError, UiErrorContext, UiEvent};
use ui::DocumentListApp;

#[derive(Parser, Debug)]
struct Args {
    /// Settings file; defaults to ./doclist.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn resolve_settings(args: &Args) -> Result<ClientSettings, String> {
    let settings = load_settings(args.config.as_deref()).map_err(|err| format!("{err:#}"))?;
    settings
        .validate()
        .map_err(|err| format!("invalid settings: {err:#}"))?;
    Ok(settings)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    // Unbounded so analyze notifications are never dropped while the UI is busy.
    let (ui_tx, ui_rx) = unbounded::<UiEvent>();
    let shutdown_tx = cmd_tx.clone();

    let (settings, backend) = match resolve_settings(&args) {
        Ok(settings) => {
            let backend = backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.clone());
            (settings, Some(backend))
        }
        Err(message) => {
            tracing::error!("{message}");
            drop(cmd_rx);
            let _ = ui_tx.send(UiEvent::Error(UiError::new(UiErrorContext::Settings, message)));
            (ClientSettings::default(), None)
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Documents")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    let result = eframe::run_native(
        "Documents",
        options,
        Box::new(move |_cc| Ok(Box::new(DocumentListApp::new(cmd_tx, ui_rx, &settings)))),
    );

    if let Some(backend) = backend {
        let _ = shutdown_tx.send(BackendCommand::Unmount);
        if backend.join().is_err() {
            tracing::error!("backend worker panicked");
        }
    }
    result
}
