//! Gauge MCP Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. Each line on stdin is one
//! request; each response is one line on stdout. Logs go to stderr.
//!
//! Environment:
//! - GAUGE_UNITS_PATH: JSON unit table replacing the reference table
//! - GAUGE_LOG_FORMAT: text (default) or json
//! - RUST_LOG: log filter (default: info)

mod config;
mod error;
mod server;

use std::fs;
use std::process::ExitCode;

use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use config::{LogFormat, ServerConfig};
use error::ServerError;
use gauge_units::UnitRegistry;
use server::{handle_request, McpRequest, McpResponse, PROTOCOL_VERSION, SERVER_VERSION};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.report() {
                Some(report) => {
                    tracing::error!(code = %report.code, error = %report.message, "unit table rejected");
                    eprintln!("gauge-mcp: {}", report);
                }
                None => {
                    tracing::error!(error = %e, "server stopped");
                    eprintln!("gauge-mcp: {}", e);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    init_logging(config.log_format)?;

    let registry = load_registry(&config)?;

    tracing::info!(
        version = SERVER_VERSION,
        protocol = PROTOCOL_VERSION,
        domains = registry.domains().len(),
        "Gauge MCP server started"
    );

    tokio::select! {
        result = serve(&registry) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
            Ok(())
        }
    }
}

fn init_logging(format: LogFormat) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Text => builder.with_ansi(false).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| ServerError::Logging(e.to_string()))
}

fn load_registry(config: &ServerConfig) -> Result<UnitRegistry, ServerError> {
    match &config.units_path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| ServerError::UnitsFile {
                path: path.clone(),
                source,
            })?;
            let registry = UnitRegistry::from_json(&json)?;
            tracing::info!(path = %path.display(), "loaded unit table");
            Ok(registry)
        }
        None => Ok(UnitRegistry::standard()?),
    }
}

async fn serve(registry: &UnitRegistry) -> Result<(), ServerError> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    tracing::info!("waiting for requests");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<McpRequest>(line) {
            Ok(request) => {
                tracing::debug!(method = %request.method, "processing");
                let response = handle_request(registry, &request);
                // Notifications (no id) should NOT receive a response
                if request.id.is_none() {
                    tracing::debug!(method = %request.method, "notification processed");
                    continue;
                }
                response
            }
            Err(e) => {
                tracing::warn!(error = %e, "unparseable request");
                McpResponse::parse_error(e)
            }
        };

        let mut payload = serde_json::to_vec(&response)
            .map_err(|e| ServerError::Io(e.into()))?;
        payload.push(b'\n');
        stdout.write_all(&payload).await?;
        stdout.flush().await?;
    }

    tracing::info!("client disconnected (EOF)");
    Ok(())
}
