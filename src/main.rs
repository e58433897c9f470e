use telos_mcp::config::ServerConfig;
use telos_mcp::error::ServerError;
use telos_mcp::server::TelosServer;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("telos-mcp: {e}");
        std::process::exit(1);
    }

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "loaded configuration");

    let server = match TelosServer::new(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("startup error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` controls the filter (default `info`); `TELOS_LOG_FORMAT=json`
/// switches to JSON lines.
fn init_tracing() -> Result<(), ServerError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt().with_env_filter(env_filter);

    let json = std::env::var("TELOS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        subscriber
            .json()
            .try_init()
            .map_err(|e| ServerError::Logging(e.to_string()))
    } else {
        subscriber
            .try_init()
            .map_err(|e| ServerError::Logging(e.to_string()))
    }
}
