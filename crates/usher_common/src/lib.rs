//! Shared types and utilities for Usher components.
//!
//! The daemon (usherd) and the control CLI (usherctl) both build on this
//! crate: the feature catalog, interaction scoring, tier evaluation,
//! persistence stores, and the RPC wire types live here.

pub mod config;
pub mod error;
pub mod feature;
pub mod history;
pub mod interaction;
pub mod rpc;
pub mod scoring;
pub mod state;
pub mod status;
pub mod store;
pub mod tier;
pub mod ui;

pub use config::UsherConfig;
pub use error::UsherError;
pub use feature::{Feature, FeatureId};
pub use history::{BehaviorProfile, EngagementStyle, RecentHistory};
pub use interaction::{InteractionKind, InteractionRecord};
pub use rpc::{RpcError, RpcMethod, RpcRequest, RpcResponse};
pub use scoring::{evaluate_tier, ThresholdMode, Thresholds};
pub use state::{ProgressSnapshot, ProgressState};
pub use status::{DaemonStatus, FeatureEntry, FeatureList, ProgressReport};
pub use tier::ConfidenceTier;

/// Socket path for usherd
pub const SOCKET_PATH: &str = "/run/usher/usher.sock";

/// State directory for Usher
pub const STATE_DIR: &str = "/var/lib/usher";

/// Config file path
pub const CONFIG_PATH: &str = "/etc/usher/config.toml";

/// Interaction log file name inside the state directory
pub const INTERACTION_LOG_FILE: &str = "interactions.jsonl";

/// Workspace version, shared by both binaries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
