//! Unix socket client for communicating with usherd.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use usher_common::rpc::{RecordParams, RecordResult, RpcMethod, RpcRequest, RpcResponse};
use usher_common::status::{DaemonStatus, FeatureList, ProgressReport};
use usher_common::SOCKET_PATH;

/// Client for communicating with usherd
pub struct UsherdClient {
    stream: UnixStream,
}

impl UsherdClient {
    /// Connect to usherd
    pub async fn connect() -> Result<Self> {
        let socket_path = std::env::var("USHER_SOCKET")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(SOCKET_PATH));

        if !socket_path.exists() {
            return Err(anyhow!(
                "Usher daemon not running.\n\
                 The socket at {} does not exist.\n\n\
                 Start it with:\n\
                 sudo systemctl start usherd",
                socket_path.display()
            ));
        }

        let stream = UnixStream::connect(&socket_path).await.map_err(|e| {
            anyhow!(
                "Cannot connect to the Usher daemon: {}\n\n\
                 The daemon may have crashed. Try:\n\
                 sudo systemctl restart usherd",
                e
            )
        })?;

        Ok(Self { stream })
    }

    /// Send an RPC request and get the response
    pub async fn call(
        &mut self,
        method: RpcMethod,
        params: Option<serde_json::Value>,
    ) -> Result<RpcResponse> {
        let request = RpcRequest::new(method, params);
        let request_json = serde_json::to_string(&request)?;

        self.stream
            .write_all(format!("{}\n", request_json).as_bytes())
            .await?;

        let (reader, _) = self.stream.split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();
        reader.read_line(&mut line).await?;

        let response: RpcResponse = serde_json::from_str(&line)?;
        Ok(response)
    }

    fn unwrap_result(response: RpcResponse) -> Result<serde_json::Value> {
        if let Some(error) = response.error {
            return Err(anyhow!("{}", error.message));
        }
        response
            .result
            .ok_or_else(|| anyhow!("No result in response"))
    }

    /// Get daemon status
    pub async fn status(&mut self) -> Result<DaemonStatus> {
        let response = self.call(RpcMethod::Status, None).await?;
        Ok(serde_json::from_value(Self::unwrap_result(response)?)?)
    }

    /// Record one or more interactions
    pub async fn record(&mut self, kind: &str, count: u32) -> Result<RecordResult> {
        let params = serde_json::to_value(RecordParams {
            kind: kind.to_string(),
            count,
        })?;
        let response = self.call(RpcMethod::Record, Some(params)).await?;
        Ok(serde_json::from_value(Self::unwrap_result(response)?)?)
    }

    /// Get the progress report
    pub async fn progress(&mut self) -> Result<ProgressReport> {
        let response = self.call(RpcMethod::Progress, None).await?;
        Ok(serde_json::from_value(Self::unwrap_result(response)?)?)
    }

    /// Get the feature catalog with unlock state
    pub async fn features(&mut self) -> Result<FeatureList> {
        let response = self.call(RpcMethod::Features, None).await?;
        Ok(serde_json::from_value(Self::unwrap_result(response)?)?)
    }

    /// Reset progress to beginner
    pub async fn reset(&mut self) -> Result<()> {
        let response = self.call(RpcMethod::Reset, None).await?;
        Self::unwrap_result(response)?;
        Ok(())
    }
}
