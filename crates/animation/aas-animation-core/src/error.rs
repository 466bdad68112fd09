//! Error types for the armor-stand animation core

use serde::{Deserialize, Serialize};

/// Error type for timeline, codec and playback operations
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// Animation name not present in an animations file
    #[error("Animation not found: {name}")]
    AnimationNotFound { name: String },

    /// Joint name outside the five armor-stand joints
    #[error("Unknown joint: {name}")]
    UnknownJoint { name: String },

    /// Axis name outside x/y/z
    #[error("Unknown axis: {name}")]
    UnknownAxis { name: String },

    /// A step of an animation could not be turned into a pose
    #[error("Invalid step {index} in animation {animation}: {reason}")]
    InvalidStep {
        animation: String,
        index: usize,
        reason: String,
    },

    /// Writing an animations file failed
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    /// Reading an animations file or a JSON payload failed
    #[error("Parse error: {reason}")]
    Parse { reason: String },

    /// IO error
    #[error("IO error: {reason}")]
    Io { reason: String },
}

impl AnimationError {
    /// Check if this is a recoverable error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AnimationNotFound { .. }
                | Self::UnknownJoint { .. }
                | Self::UnknownAxis { .. }
                | Self::Parse { .. }
                | Self::Io { .. }
        )
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::AnimationNotFound { .. } | Self::InvalidStep { .. } => "data",
            Self::UnknownJoint { .. } | Self::UnknownAxis { .. } => "validation",
            Self::Serialization { .. } => "serialization",
            Self::Parse { .. } => "parse",
            Self::Io { .. } => "io",
        }
    }
}

impl From<std::io::Error> for AnimationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            reason: err.to_string(),
        }
    }
}

impl From<std::fmt::Error> for AnimationError {
    fn from(err: std::fmt::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for AnimationError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}
