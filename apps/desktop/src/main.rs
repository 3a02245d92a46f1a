use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, ClientSettings, HttpDocumentClient, Notification, Notifier, PageView,
    StorageLinks, ViewStateController,
};
use shared::domain::DocumentId;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "doclist", about = "List documents and start analysis jobs")]
struct Args {
    /// Settings file; defaults to ./doclist.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[arg(long)]
    bucket_host: Option<String>,
    /// Raw Cookie header value sent with every request.
    #[arg(long)]
    session_cookie: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print the document list.
    List,
    /// Start analysis for one document.
    Analyze { id: i64 },
}

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, notification: Notification) {
        println!("{}", notification.text());
    }
}

fn apply_cli_overrides(settings: &mut ClientSettings, args: &Args) {
    if let Some(v) = &args.api_base_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = &args.bucket_host {
        settings.bucket_host = v.clone();
    }
    if let Some(v) = &args.session_cookie {
        settings.set_session_cookie(v.clone());
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    apply_cli_overrides(&mut settings, &args);
    settings.validate()?;
    tracing::debug!(api = %settings.api_base_url, bucket = %settings.bucket_host, "settings resolved");

    let api = HttpDocumentClient::from_settings(&settings)
        .context("failed to build document api client")?;
    let controller = ViewStateController::new(Arc::new(api), Arc::new(StdoutNotifier));

    match args.command {
        Command::List => {
            controller.mount().await;
            let state = controller.snapshot().await;
            let page = PageView::build(
                &state,
                &StorageLinks::new(&settings.bucket_host),
                &settings.upload_url,
            );
            print!("{}", page.render_text());
            if page.error_banner.is_some() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Analyze { id } => {
            let outcome = controller.analyze_document(DocumentId(id)).await;
            if !outcome.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_analyze_subcommand_with_overrides() {
        let args = Args::try_parse_from([
            "doclist",
            "--api-base-url",
            "https://api.example.com",
            "--session-cookie",
            "session=abc",
            "analyze",
            "12",
        ])
        .expect("parse");

        assert!(matches!(args.command, Command::Analyze { id: 12 }));

        let mut settings = ClientSettings::default();
        apply_cli_overrides(&mut settings, &args);
        assert_eq!(settings.api_base_url, "https://api.example.com");
        assert!(!settings.credentials().is_anonymous());
        settings.validate().expect("valid");
    }

    #[test]
    fn list_without_overrides_keeps_settings() {
        let args = Args::try_parse_from(["doclist", "list"]).expect("parse");
        let mut settings = ClientSettings::default();
        apply_cli_overrides(&mut settings, &args);
        assert_eq!(settings.api_base_url, ClientSettings::default().api_base_url);
        assert!(settings.session_cookie.is_none());
    }
}
