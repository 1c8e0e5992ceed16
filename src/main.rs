//! Lambda HTTP Bridge CLI
//!
//! Feeds a recorded trigger event through the bridge.
//!
//! ```text
//! event.json ──▶ classify ──▶ EventKind
//!            ──▶ request  ──▶ canonical request (JSON)
//!            ──▶ invoke   ──▶ echo app ──▶ trigger result (JSON)
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use serde_json::{json, Value};

use lambda_bridge::config::{load_config, BridgeConfig};
use lambda_bridge::http::HeaderCollection;
use lambda_bridge::observability::init_logging;
use lambda_bridge::{
    classify, echo_app, is_valid_http_method, to_web_request, HandlerOptions, LambdaHandler,
    TriggerEvent,
};

#[derive(Parser)]
#[command(name = "lambda-bridge")]
#[command(about = "Convert Lambda HTTP trigger events to and from HTTP messages", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which trigger produced an event
    Classify {
        /// Event JSON file, or "-" for stdin
        event: PathBuf,
    },
    /// Print the canonical request built from an event
    Request {
        /// Event JSON file, or "-" for stdin
        event: PathBuf,
    },
    /// Run an event through the echo app and print the trigger result
    Invoke {
        /// Event JSON file, or "-" for stdin
        event: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BridgeConfig::default(),
    };
    init_logging(&config.logging)?;

    match cli.command {
        Commands::Classify { event } => {
            let value = read_event(&event)?;
            println!("{}", classify(&value));
        }
        Commands::Request { event } => {
            let event = TriggerEvent::from_value(read_event(&event)?)?;
            if !is_valid_http_method(event.method()) {
                tracing::warn!(method = event.method(), "Non-standard HTTP method");
            }

            let request = to_web_request(&event)?;
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX).await?;

            let mut headers: IndexMap<String, Vec<String>> = IndexMap::new();
            for (name, value) in parts.headers.combined() {
                headers.entry(name).or_default().push(value);
            }

            let printed = json!({
                "kind": event.kind(),
                "method": parts.method.as_str(),
                "url": parts.uri.to_string(),
                "headers": headers,
                "body": String::from_utf8_lossy(&bytes),
            });
            println!("{}", serde_json::to_string_pretty(&printed)?);
        }
        Commands::Invoke { event } => {
            let value = read_event(&event)?;
            let handler = LambdaHandler::with_options(echo_app(), HandlerOptions::from(&config));
            let result = handler.handle_value(value).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

fn read_event(path: &Path) -> Result<Value, Box<dyn std::error::Error>> {
    let content = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&content)?)
}
