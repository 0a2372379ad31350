//! Error types for configuration loading and camera rig wiring.

use bevy::prelude::Entity;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to load or validate an [`RtsConfig`](crate::config::RtsConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A camera rig that cannot reach its follow offset.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RigWiringError {
    #[error("camera rig {rig} has no follow camera")]
    MissingCamera { rig: Entity },

    #[error("follow camera {camera} of rig {rig} has no FollowOffset")]
    MissingFollowOffset { rig: Entity, camera: Entity },
}
