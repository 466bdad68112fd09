//! Editing session: the timeline under edit, its playback clock and the
//! metadata that goes into the exported file.

use log::{debug, info};

use crate::clock::{ClockState, PlaybackClock, TickOutcome};
use crate::config::EditorConfig;
use crate::document::{clamp_interval, parse_animations_yaml};
use crate::export::{export, ExportArtifact};
use crate::joint::{Axis, Joint};
use crate::pose::Pose;
use crate::time::AnimationTime;
use crate::timeline::{Keyframe, Timeline};
use crate::Result;

/// Owns one timeline and one clock. Dropping the session disposes the clock.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    timeline: Timeline,
    clock: PlaybackClock,
    name: String,
    interval_ticks: u32,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        let interval_ticks = config.default_interval_ticks.max(1);
        let clock = PlaybackClock::with_timing(
            interval_ticks,
            config.tick_millis,
            config.poll_interval_millis,
        );
        Self {
            name: config.default_name.clone(),
            timeline: Timeline::new(),
            clock,
            interval_ticks,
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn interval_ticks(&self) -> u32 {
        self.interval_ticks
    }

    /// Floor and clamp to at least one tick; the clock picks it up on its next poll.
    pub fn set_interval_ticks(&mut self, ticks: f64) -> u32 {
        self.interval_ticks = clamp_interval(ticks);
        self.clock.set_interval_ticks(self.interval_ticks);
        self.interval_ticks
    }

    // ----- keyframe editing -----

    pub fn add_keyframe(&mut self) -> usize {
        self.timeline.append()
    }

    pub fn insert_keyframe(&mut self) -> usize {
        self.timeline.insert_after_selection()
    }

    pub fn remove_keyframe(&mut self) -> Option<Keyframe> {
        self.timeline.remove_selected()
    }

    pub fn update_selected(&mut self, joint: Joint, axis: Axis, value: f64) {
        self.timeline.update_selected(joint, axis, value);
    }

    /// Select a keyframe, clamped into range the way the timeline slider does.
    pub fn select(&mut self, index: usize) -> usize {
        let index = self.timeline.clamp_index(index);
        self.timeline.set_selection(index);
        index
    }

    #[inline]
    pub fn current_pose(&self) -> Pose {
        self.timeline.selected_pose()
    }

    /// "Frame N", one-based.
    pub fn frame_label(&self) -> String {
        format!("Frame {}", self.timeline.selected_index() + 1)
    }

    /// Position of the selection along the timeline in [0, 1].
    pub fn progress(&self) -> f64 {
        let last = self.timeline.len().saturating_sub(1);
        if last == 0 {
            return 0.0;
        }
        (self.timeline.selected_index() as f64 / last as f64).min(1.0)
    }

    // ----- playback -----

    #[inline]
    pub fn playback_state(&self) -> ClockState {
        self.clock.state()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.clock.is_running()
    }

    /// The play/pause control.
    pub fn toggle_playback(&mut self, now: AnimationTime) -> ClockState {
        self.clock.play(now)
    }

    pub fn stop_playback(&mut self) {
        self.clock.stop();
    }

    /// Drive the clock; call from the host's frame loop.
    pub fn pump(&mut self, now: AnimationTime) -> TickOutcome {
        self.clock.poll(now, &mut self.timeline)
    }

    pub fn next_poll_due(&self) -> Option<AnimationTime> {
        self.clock.next_poll_due()
    }

    // ----- files -----

    pub fn export(&self) -> Result<ExportArtifact> {
        let artifact = export(&self.timeline, &self.name, f64::from(self.interval_ticks))?;
        info!(
            "exported animation '{}' ({} steps, interval {})",
            self.name,
            self.timeline.len(),
            self.interval_ticks
        );
        Ok(artifact.with_file_name(self.config.export_file_name.clone()))
    }

    /// Replace the timeline with animation `name` from an `animations.yml` text.
    /// Playback is stopped; the session's name and interval follow the file.
    pub fn import_yaml(&mut self, text: &str, name: &str) -> Result<()> {
        let file = parse_animations_yaml(text)?;
        let doc = file.require(name)?;
        self.clock.stop();
        self.timeline = doc.to_timeline();
        self.name = doc.name.clone();
        self.interval_ticks = doc.interval;
        self.clock.set_interval_ticks(doc.interval);
        debug!(
            "imported animation '{name}' with {} keyframes",
            self.timeline.len()
        );
        Ok(())
    }
}
