use serde::Serialize;

pub const SERVICE_NAME: &str = "telos-mcp";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

/// Liveness probe. Constant, no dependencies.
pub fn check() -> HealthStatus {
    HealthStatus {
        status: "healthy".into(),
        service: SERVICE_NAME.into(),
    }
}
