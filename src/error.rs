use crate::config::ConfigError;

/// Errors that stop the server from starting or serving.
///
/// Request-level failures never reach this type; they are answered with an
/// error envelope instead.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
    #[error("failed to initialise logging: {0}")]
    Logging(String),
}
