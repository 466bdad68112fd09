//! Editor configuration.

use serde::{Deserialize, Serialize};

use crate::clock::POLL_INTERVAL_MILLIS;
use crate::export::EXPORT_FILE_NAME;
use crate::time::TICK_MILLIS;
use crate::Result;

/// Session defaults and timing. Every field is optional in JSON; missing ones
/// take the values the web editor ships with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Name pre-filled for a new animation.
    pub default_name: String,
    /// Game ticks between steps for a new animation.
    pub default_interval_ticks: u32,
    /// Length of one game tick in milliseconds (0 is raised to 1).
    pub tick_millis: u64,
    /// Granularity of playback polling in milliseconds (0 is raised to 1).
    pub poll_interval_millis: u64,
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_name: "wave".to_string(),
            default_interval_ticks: 10,
            tick_millis: TICK_MILLIS,
            poll_interval_millis: POLL_INTERVAL_MILLIS,
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
