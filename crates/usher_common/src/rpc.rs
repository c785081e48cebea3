//! JSON-RPC 2.0 types for usherd communication.

use crate::tier::ConfidenceTier;
use serde::{Deserialize, Serialize};

/// RPC methods supported by usherd
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum RpcMethod {
    Status,
    Record,
    Progress,
    Features,
    Reset,
}

/// JSON-RPC 2.0 request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: RpcMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    pub id: String,
}

impl RpcRequest {
    pub fn new(method: RpcMethod, params: Option<serde_json::Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            method,
            params,
            id: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// JSON-RPC 2.0 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: String,
}

impl RpcResponse {
    pub fn success(id: String, result: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    pub fn error(id: String, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(RpcError {
                code,
                message,
                data: None,
            }),
            id,
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Parameters for the record method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordParams {
    /// Interaction kind label (unknown labels score the minimum)
    pub kind: String,
    /// How many times to record it
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

/// Result payload for the record method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordResult {
    pub score: u64,
    pub tier: ConfidenceTier,
    pub points_added: u64,
    /// Whether this record call crossed a tier boundary
    pub tier_changed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_roundtrip() {
        let request = RpcRequest::new(
            RpcMethod::Record,
            Some(serde_json::json!({"kind": "purchase"})),
        );
        let json = serde_json::to_string(&request).unwrap();
        let parsed: RpcRequest = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.method, RpcMethod::Record);
        assert_eq!(parsed.id, request.id);
        assert_eq!(parsed.jsonrpc, "2.0");
    }

    #[test]
    fn test_method_snake_case() {
        let json = serde_json::to_string(&RpcMethod::Features).unwrap();
        assert_eq!(json, "\"features\"");
    }

    #[test]
    fn test_record_params_default_count() {
        let params: RecordParams = serde_json::from_str("{\"kind\":\"navigation\"}").unwrap();
        assert_eq!(params.count, 1);
    }

    #[test]
    fn test_error_response() {
        let response = RpcResponse::error("1".to_string(), -32600, "bad".to_string());
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, -32600);
    }
}
