//! Text Relay - push text over HTTP, watch it anywhere.

use clap::Parser;
use std::sync::{Arc, Mutex};
use text_relay::config::DEFAULT_LOG_FILTER;
use text_relay::server::{run_server, state::AppState};
use text_relay::viewer::{
    handoff_queue, spawn_command_reader, spawn_viewer, SharedDisplay, TextDisplay,
};
use text_relay::{RelayConfig, RelayResult, TextRelay};
use tokio::sync::watch;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayConfig::parse();

    // Initialize logging
    let filter = match &config.log_filter {
        Some(directive) => tracing_subscriber::EnvFilter::new(directive),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    config.validate()?;

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(run_application(config));
    // The stdin reader may still be parked on a blocking thread
    runtime.shutdown_background();
    Ok(result?)
}

async fn run_application(config: RelayConfig) -> RelayResult<()> {
    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║                      Text Relay                            ║");
    println!("╚════════════════════════════════════════════════════════════╝");
    println!();

    // Shutdown signal
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        println!("\n🛑 Shutdown signal received...");
        let _ = shutdown_tx.send(true);
    })?;

    let mut viewer_tasks = Vec::new();
    let relay = if config.viewer {
        println!("🔧 Starting terminal viewer...");
        let (tx, rx) = handoff_queue();
        let display: SharedDisplay = Arc::new(Mutex::new(TextDisplay::new()));
        viewer_tasks.push(spawn_viewer(
            rx,
            Arc::clone(&display),
            config.refresh_interval(),
            shutdown_rx.clone(),
        ));
        viewer_tasks.push(spawn_command_reader(display, shutdown_rx.clone()));
        println!("   ✓ Type 'copy' or 'clear' and press Enter");
        TextRelay::with_handoff(tx)
    } else {
        TextRelay::new()
    };

    let state = Arc::new(AppState::new(Arc::new(relay), config.keep_alive()));

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("🌐 Listening on http://{}", config.bind);
    println!("   • GET  /text   - Current text");
    println!("   • POST /text   - {{\"text\": \"...\", \"mode\": \"set|append\"}}");
    println!("   • GET  /events - Server-sent updates");
    println!("   • WS   /ws     - WebSocket updates");
    println!("   Press Ctrl+C to quit");
    println!("════════════════════════════════════════════════════════════════");
    println!();

    let result = run_server(config.bind, state, shutdown_rx).await;

    for task in viewer_tasks {
        task.abort();
    }

    result?;
    println!("\n👋 Text Relay has exited. Goodbye!");
    Ok(())
}
