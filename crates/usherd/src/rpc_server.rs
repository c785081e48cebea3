//! RPC server - Unix socket server for daemon-client communication.

use crate::engine::DisclosureEngine;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tracing::{error, info, warn};
use usher_common::rpc::{RecordParams, RpcMethod, RpcRequest, RpcResponse};
use usher_common::{UsherError, VERSION};

/// Upper bound on batched record calls in one request.
const MAX_RECORD_COUNT: u32 = 1000;

/// Daemon state shared across connections
pub struct ServerState {
    pub engine: Arc<DisclosureEngine>,
    pub start_time: Instant,
}

/// Start the RPC server
pub async fn start_server(state: Arc<ServerState>, socket_path: &Path) -> Result<()> {
    let socket_dir = socket_path.parent().context("socket path has no parent")?;
    tokio::fs::create_dir_all(socket_dir)
        .await
        .context("Failed to create socket directory")?;

    // Remove old socket if it exists
    let _ = tokio::fs::remove_file(socket_path).await;

    let listener = UnixListener::bind(socket_path).context("Failed to bind Unix socket")?;
    info!("RPC server listening on {}", socket_path.display());

    // Readable/writable by all local users
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(0o666))?;
    }

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, state).await {
                        error!("Connection handler error: {}", e);
                    }
                });
            }
            Err(e) => {
                error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Handle a single client connection
async fn handle_connection(stream: UnixStream, state: Arc<ServerState>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut reader = BufReader::new(reader);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .context("Failed to read from socket")?;

        if bytes_read == 0 {
            // Connection closed
            break;
        }

        let request: RpcRequest = match serde_json::from_str(&line) {
            Ok(req) => req,
            Err(e) => {
                warn!("Invalid request JSON: {}", e);
                continue;
            }
        };

        let response = handle_request(request, &state).await;

        let response_json = serde_json::to_string(&response)? + "\n";
        writer
            .write_all(response_json.as_bytes())
            .await
            .context("Failed to write response")?;
    }

    Ok(())
}

/// Handle a single request
async fn handle_request(request: RpcRequest, state: &ServerState) -> RpcResponse {
    let id = request.id;
    match request.method {
        RpcMethod::Status => {
            let status = state
                .engine
                .status(VERSION, state.start_time.elapsed().as_secs())
                .await;
            json_result(id, &status)
        }

        RpcMethod::Record => {
            let params = request
                .params
                .and_then(|p| serde_json::from_value::<RecordParams>(p).ok());
            let params = match params {
                Some(p) => p,
                None => {
                    let err = UsherError::Rpc("missing or invalid record params".to_string());
                    return RpcResponse::error(id, err.code(), err.to_string());
                }
            };

            let count = params.count.clamp(1, MAX_RECORD_COUNT);
            let mut result = state.engine.record_interaction(&params.kind).await;
            let mut tier_changed = result.tier_changed;
            for _ in 1..count {
                result = state.engine.record_interaction(&params.kind).await;
                tier_changed |= result.tier_changed;
            }
            result.tier_changed = tier_changed;
            json_result(id, &result)
        }

        RpcMethod::Progress => json_result(id, &state.engine.progress_report().await),

        RpcMethod::Features => json_result(id, &state.engine.feature_list().await),

        RpcMethod::Reset => {
            state.engine.reset().await;
            RpcResponse::success(id, serde_json::json!({ "reset": true }))
        }
    }
}

fn json_result<T: serde::Serialize>(id: String, value: &T) -> RpcResponse {
    match serde_json::to_value(value) {
        Ok(v) => RpcResponse::success(id, v),
        Err(e) => {
            let err = UsherError::Json(e);
            RpcResponse::error(id, err.code(), err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use usher_common::config::UsherConfig;
    use usher_common::rpc::RecordResult;

    fn test_state(dir: &Path) -> ServerState {
        let config = UsherConfig {
            state_dir: dir.to_path_buf(),
            ..UsherConfig::default()
        };
        ServerState {
            engine: Arc::new(DisclosureEngine::new(&config)),
            start_time: Instant::now(),
        }
    }

    #[tokio::test]
    async fn test_status_request() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let request = RpcRequest::new(RpcMethod::Status, None);
        let response = handle_request(request, &state).await;

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["version"], VERSION);
        assert_eq!(result["tier"], "beginner");
    }

    #[tokio::test]
    async fn test_record_request_batched() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let request = RpcRequest::new(
            RpcMethod::Record,
            Some(serde_json::json!({"kind": "purchase", "count": 20})),
        );
        let response = handle_request(request, &state).await;

        let result: RecordResult = serde_json::from_value(response.result.unwrap()).unwrap();
        assert_eq!(result.score, 1000);
        assert!(result.tier_changed);
    }

    #[tokio::test]
    async fn test_record_request_missing_params() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let request = RpcRequest::new(RpcMethod::Record, None);
        let response = handle_request(request, &state).await;

        let error = response.error.unwrap();
        assert_eq!(error.code, -32600);
    }

    #[tokio::test]
    async fn test_reset_request() {
        let dir = tempdir().unwrap();
        let state = test_state(dir.path());

        let record = RpcRequest::new(
            RpcMethod::Record,
            Some(serde_json::json!({"kind": "purchase", "count": 30})),
        );
        handle_request(record, &state).await;

        let reset = RpcRequest::new(RpcMethod::Reset, None);
        let response = handle_request(reset, &state).await;
        assert!(response.error.is_none());

        let progress = RpcRequest::new(RpcMethod::Progress, None);
        let response = handle_request(progress, &state).await;
        assert_eq!(response.result.unwrap()["score"], 0);
    }
}
