//! MCP server for personal TELOS context.
//!
//! Exposes `load_telos_context` and `apply_telos_filter` tools over a small
//! HTTP surface (`POST /mcp`, `GET /health`). The context document is pulled
//! from a GitHub repository when a token is configured, with a local file and
//! a constant placeholder as fallbacks.

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod server;
pub mod tools;

pub mod schema;
