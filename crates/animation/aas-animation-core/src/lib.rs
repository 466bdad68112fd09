//! AdvancedArmorStands animation core
//!
//! Keyframe authoring for armor-stand animations: the pose model, the editable
//! timeline, a playback clock driven by the host's frame loop, and the codec for
//! the plugin's `animations.yml`. Rendering and UI live in the host; this crate
//! is engine-agnostic and has no I/O apart from [`ExportArtifact::write_to_dir`].

pub mod clock;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod ids;
pub mod joint;
pub mod pose;
pub mod release;
pub mod session;
pub mod time;
pub mod timeline;

// Re-exports for hosts
pub use clock::{ClockState, PlaybackClock, TickOutcome, POLL_INTERVAL_MILLIS};
pub use config::EditorConfig;
pub use document::{clamp_interval, parse_animations_yaml, AnimationDocument, AnimationFile};
pub use error::AnimationError;
pub use export::{export, to_yaml, ExportArtifact, EXPORT_FILE_NAME, EXPORT_MEDIA_TYPE};
pub use ids::KeyframeId;
pub use joint::{Axis, Joint};
pub use pose::{clamp_degrees, Pose, Rotation, ANGLE_MAX, ANGLE_MIN};
pub use release::{Release, ReleaseAsset, ReleaseFeed};
pub use session::EditorSession;
pub use time::{AnimationTime, TICK_MILLIS};
pub use timeline::{Keyframe, Timeline};

/// Result type for animation core operations
pub type Result<T> = core::result::Result<T, AnimationError>;
