//! Error types for Usher.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UsherError {
    #[error("Daemon not running. Start usherd or check the socket path.")]
    DaemonNotRunning,

    #[error("Socket error: {0}")]
    Socket(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl UsherError {
    pub fn code(&self) -> i32 {
        match self {
            UsherError::DaemonNotRunning => -32000,
            UsherError::Socket(_) => -32001,
            UsherError::Rpc(_) => -32600,
            UsherError::Store(_) => -32002,
            UsherError::Config(_) => -32003,
            UsherError::Io(_) => -32004,
            UsherError::Json(_) => -32700,
            UsherError::Internal(_) => -32603,
        }
    }
}
