//! parley binary - composition root.
//!
//! Ties the crates together into a terminal chat client:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the request gateway and the conversation manager
//! 4. Run the read-line loop: each input line becomes one submission
//!
//! The loop is the presentation layer: it only reads manager state and
//! forwards user intents; all conversation logic lives in the library
//! crates.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use parley_conversation::{ConversationManager, Notifier};
use parley_core::types::{Message, Sender};
use parley_core::ParleyConfig;
use parley_gateway::ChatGateway;

mod cli;

use cli::CliArgs;

/// Notifier that surfaces failure notices on stderr, out of band of the
/// transcript on stdout.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        eprintln!("! {}", message);
    }
}

/// Print every message not yet rendered, with day separators.
fn render_from(messages: &[Message], from: usize) {
    for msg in &messages[from..] {
        if msg.is_day_boundary {
            if let Some(ref label) = msg.day_label {
                println!("---- {} ----", label);
            }
        }
        let who = match msg.sender {
            Sender::User => "you",
            Sender::Assistant => "assistant",
        };
        println!("[{}] {}: {}", msg.display_time, who, msg.content);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first so its log level can seed the filter; RUST_LOG wins.
    let config_file = args.resolve_config_path();
    let config = ParleyConfig::load_or_default(&config_file);

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting parley v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let mut backend = config.backend.clone();
    if let Some(endpoint) = args.endpoint {
        backend.endpoint = endpoint;
    }
    tracing::info!(endpoint = %backend.endpoint, "Using chat backend");

    let gateway = ChatGateway::from_config(&backend);
    let mut manager = ConversationManager::new(gateway, TerminalNotifier);

    println!("parley — type a message and press Enter. /quit to exit.");

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut rendered = 0;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim() == "/quit" {
            break;
        }

        manager.set_input(line);
        if !manager.can_submit() {
            continue;
        }
        manager.submit().await;

        render_from(manager.messages(), rendered);
        rendered = manager.messages().len();
    }

    tracing::info!(
        session_id = %manager.session_id(),
        messages = manager.messages().len(),
        "Conversation ended"
    );
    Ok(())
}
