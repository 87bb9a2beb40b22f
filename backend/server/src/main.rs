use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tower_http::cors::CorsLayer;
use tracing::info;

use inkmath_analysis::Analyzer;
use inkmath_config::{redacted, Settings};
use inkmath_gateway::{build_router, start_server, AppState};
use inkmath_model::GeminiProvider;

#[derive(Parser)]
#[command(name = "inkmath")]
#[command(about = "inkmath — math-from-image analysis backend")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the inkmath HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show current server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::from_env();
    inkmath_logging::init_logger(
        &settings.log_level,
        settings.log_dir.as_deref().map(Path::new),
    );

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let settings = Settings {
                port: port.unwrap_or(settings.port),
                ..settings
            };
            run_server(settings).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", settings.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("inkmath is not running on port {}", settings.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(settings: Settings) -> Result<()> {
    settings.validate()?;
    info!(settings = ?redacted(&settings), "Starting inkmath");

    let provider = GeminiProvider::new(
        settings.gemini_api_key.clone(),
        settings.gemini_model.clone(),
    );
    let analyzer = Arc::new(Analyzer::new(Arc::new(provider)));

    let state = AppState {
        analyzer,
        auth_token: settings.auth_token.clone(),
        env: settings.env.clone(),
        model_name: settings.gemini_model.clone(),
    };

    // The frontend is served from another origin; mirror its permissive CORS.
    let app = build_router(state).layer(CorsLayer::permissive());

    let addr: SocketAddr = settings
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid bind address {}", settings.bind_addr()))?;
    start_server(addr, app).await
}
