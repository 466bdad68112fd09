//! The plugin's `animations.yml` model and its decoder.
//!
//! ```yaml
//! animations:
//!   "wave":
//!     interval: 10
//!     loop: true
//!     steps:
//!       - head:
//!           x: 0
//!           y: 0
//!           z: 0
//!         left_arm:
//!           ...
//! ```
//!
//! Decoding is lenient at the animation level (unknown keys ignored, `loop`
//! defaults to true, missing joints/axes default to 0) but strict at the pose
//! level: a joint or axis key outside the closed sets is an error.

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::pose::Pose;
use crate::timeline::Timeline;
use crate::Result;

/// Clamp a user-entered interval to whole ticks, at least 1.
pub fn clamp_interval(ticks: f64) -> u32 {
    if ticks.is_nan() {
        return 1;
    }
    ticks.floor().clamp(1.0, u32::MAX as f64) as u32
}

/// One named animation as the plugin reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDocument {
    pub name: String,
    /// Game ticks between steps, at least 1.
    pub interval: u32,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub steps: Vec<Pose>,
}

impl AnimationDocument {
    /// Snapshot a timeline. Steps are clamped copies; `loop` is always true.
    pub fn from_timeline(
        timeline: &Timeline,
        name: impl Into<String>,
        interval_ticks: f64,
    ) -> Self {
        Self {
            name: name.into(),
            interval: clamp_interval(interval_ticks),
            looping: true,
            steps: timeline.poses().map(Pose::clamped).collect(),
        }
    }

    /// Rebuild an editable timeline from the steps.
    pub fn to_timeline(&self) -> Timeline {
        Timeline::from_poses(self.steps.iter().copied())
    }
}

/// The `animations:` root: animations by name, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimationFile {
    animations: IndexMap<String, AnimationDocument>,
}

impl AnimationFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AnimationDocument> {
        self.animations.get(name)
    }

    /// Like [`AnimationFile::get`] but reports a missing name as an error.
    pub fn require(&self, name: &str) -> Result<&AnimationDocument> {
        self.get(name).ok_or_else(|| AnimationError::AnimationNotFound {
            name: name.to_string(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.animations.keys().map(String::as_str)
    }

    pub fn documents(&self) -> impl Iterator<Item = &AnimationDocument> + '_ {
        self.animations.values()
    }

    /// Add an animation, replacing one with the same name in place.
    /// Returns the replaced document, if any.
    pub fn insert(&mut self, doc: AnimationDocument) -> Option<AnimationDocument> {
        self.animations.insert(doc.name.clone(), doc)
    }

    pub fn remove(&mut self, name: &str) -> Option<AnimationDocument> {
        self.animations.shift_remove(name)
    }
}

impl FromIterator<AnimationDocument> for AnimationFile {
    fn from_iter<I: IntoIterator<Item = AnimationDocument>>(iter: I) -> Self {
        let mut file = AnimationFile::new();
        for doc in iter {
            file.insert(doc);
        }
        file
    }
}

// ----- YAML schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    animations: Option<IndexMap<String, RawAnimation>>,
}

#[derive(Debug, Deserialize)]
struct RawAnimation {
    #[serde(default = "default_interval")]
    interval: f64,
    #[serde(rename = "loop", default = "default_loop")]
    looping: bool,
    #[serde(default)]
    steps: Vec<serde_yaml::Value>,
}

fn default_interval() -> f64 {
    1.0
}

fn default_loop() -> bool {
    true
}

/// Parse an `animations.yml` document.
pub fn parse_animations_yaml(text: &str) -> Result<AnimationFile> {
    let raw: RawFile = serde_yaml::from_str(text)?;
    let mut file = AnimationFile::new();
    for (name, anim) in raw.animations.unwrap_or_default() {
        let mut steps = Vec::with_capacity(anim.steps.len());
        for (index, step) in anim.steps.into_iter().enumerate() {
            let pose: Pose =
                serde_yaml::from_value(step).map_err(|e| AnimationError::InvalidStep {
                    animation: name.clone(),
                    index,
                    reason: e.to_string(),
                })?;
            steps.push(pose.clamped());
        }
        debug!("decoded animation '{name}' with {} steps", steps.len());
        file.insert(AnimationDocument {
            name,
            interval: clamp_interval(anim.interval),
            looping: anim.looping,
            steps,
        });
    }
    Ok(file)
}
