use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3001;

/// Default bind host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Placeholder repository used when `TELOS_REPO` is unset.
pub const DEFAULT_TELOS_REPO: &str = "your-username/personal-context";

/// Public GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Local fallback document.
pub const DEFAULT_LOCAL_CONTEXT_PATH: &str = "/app/context/telos.md";

/// Default timeout for the remote context fetch (10 seconds).
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid port number, got {value:?}")]
    InvalidPort { name: &'static str, value: String },
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
    #[error("{name} must be in owner/name form, got {value:?}")]
    InvalidRepo { name: &'static str, value: String },
}

/// Server configuration loaded from environment variables.
///
/// Read once at startup and never mutated; the server hands out shared
/// references to it for the lifetime of the process.
#[derive(Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub github_token: Option<String>,
    pub telos_repo: String,
    pub github_api_url: String,
    pub local_context_path: PathBuf,
    pub fetch_timeout: Duration,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// - `GITHUB_TOKEN` (optional) — credential for the remote repository
    /// - `TELOS_REPO` (optional) — `owner/name` of the repository holding `telos.md`
    /// - `GITHUB_API_URL` (optional, default `https://api.github.com`)
    /// - `TELOS_LOCAL_PATH` (optional, default `/app/context/telos.md`)
    /// - `TELOS_FETCH_TIMEOUT_SECS` (optional, default 10)
    /// - `MCP_HOST` (optional, default `0.0.0.0`)
    /// - `MCP_PORT` (optional, default 3001)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset, matching how container runtimes pass
        // through declared-but-blank variables.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("MCP_PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
                name: "MCP_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let fetch_timeout_secs = match var("TELOS_FETCH_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "TELOS_FETCH_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => DEFAULT_FETCH_TIMEOUT_SECS,
        };

        let telos_repo = var("TELOS_REPO").unwrap_or_else(|| DEFAULT_TELOS_REPO.to_string());
        if !is_owner_name(&telos_repo) {
            return Err(ConfigError::InvalidRepo {
                name: "TELOS_REPO",
                value: telos_repo,
            });
        }

        let github_api_url = var("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            host: var("MCP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            github_token: var("GITHUB_TOKEN"),
            telos_repo,
            github_api_url,
            local_context_path: var("TELOS_LOCAL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCAL_CONTEXT_PATH)),
            fetch_timeout: Duration::from_secs(fetch_timeout_secs),
        })
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            github_token: None,
            telos_repo: DEFAULT_TELOS_REPO.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            local_context_path: PathBuf::from(DEFAULT_LOCAL_CONTEXT_PATH),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("telos_repo", &self.telos_repo)
            .field("github_api_url", &self.github_api_url)
            .field("local_context_path", &self.local_context_path)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

fn is_owner_name(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}
