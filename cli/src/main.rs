//! CLI entrypoint for sidelens
//!
//! This is the main binary that wires together all layers using
//! dependency injection: settings store, Moonshot gateway, assistant,
//! page agent, and the coordinator task.

use anyhow::{Context, Result};
use clap::Parser;
use sidelens_application::{Assistant, Coordinator};
use sidelens_domain::{Reply, Request};
use sidelens_infrastructure::{FileSettingsStore, MoonshotGateway, PageAgent};
use sidelens_presentation::{render, Cli, Command, PanelController, PanelRepl};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("starting sidelens");

    // === Dependency Injection ===
    let store = Arc::new(match &cli.config {
        Some(path) => FileSettingsStore::new(path.clone()),
        None => FileSettingsStore::default_location()
            .context("no config directory available; pass --config")?,
    });

    let mut gateway = MoonshotGateway::new().context("failed to build HTTP client")?;
    if let Ok(base_url) = std::env::var("SIDELENS_BASE_URL") {
        gateway = gateway.with_base_url(base_url);
    }
    if let Ok(model) = std::env::var("SIDELENS_MODEL") {
        gateway = gateway.with_model(model);
    }

    let assistant = Arc::new(Assistant::new(Arc::new(gateway), store.clone()));
    let has_key = assistant
        .init()
        .await
        .context("failed to load settings")?;
    if !has_key && !cli.quiet {
        if !matches!(cli.command, Command::SetKey { .. }) {
            eprintln!("note: no API key configured (sidelens set-key <key>)");
        }
    }

    let agent = Arc::new(PageAgent::new());
    agent.install();

    let coordinator = Arc::new(Coordinator::new(assistant).with_page_host(agent.clone()));
    let events = coordinator.subscribe();
    let cancel = CancellationToken::new();
    let (handle, task) = coordinator.spawn(cancel.clone());

    let failed = match cli.command {
        Command::Translate { text, lang } => {
            let reply = handle
                .request(Request::Translate {
                    text: Some(text),
                    target_language: lang,
                })
                .await;
            println!("{}", render::render_reply("Translation", &reply));
            reply.is_error()
        }

        Command::Summarize { file, text } => {
            if let Some(path) = &file {
                agent
                    .load_page_file(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
            } else if let Some(text) = &text {
                agent.load_page(text);
            }
            let reply = handle.request(Request::Summarize).await;
            println!("{}", render::render_reply("Summary", &reply));
            reply.is_error()
        }

        Command::TestConnection => {
            let reply = handle.request(Request::TestConnection).await;
            println!("{}", render::render_reply("Connection", &reply));
            !matches!(reply, Reply::Connected { connected: true })
        }

        Command::SetKey { key } => {
            let reply = handle.request(Request::SetApiKey { api_key: key }).await;
            println!("{}", render::render_reply("API key", &reply));
            reply.is_error()
        }

        Command::Panel { page } => {
            if let Some(path) = &page {
                agent
                    .load_page_file(path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
            }
            let controller = PanelController::new(handle.clone(), store.clone());
            PanelRepl::new(controller, events)
                .with_quiet(cli.quiet)
                .run()
                .await?;
            false
        }
    };

    cancel.cancel();
    let _ = task.await;

    if failed {
        std::process::exit(1);
    }
    Ok(())
}
