//! Ordered keyframes under edit plus the current selection.
//!
//! A [`Timeline`] never becomes empty: it starts with one default pose and
//! [`Timeline::remove_selected`] refuses to drop the last keyframe. The selection
//! can still point past the end after [`Timeline::set_selection`], which hosts
//! are expected to clamp; every reader and mutator tolerates that and heals
//! locally instead of failing.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::ids::KeyframeId;
use crate::joint::{Axis, Joint};
use crate::pose::Pose;

/// A pose stored at one step of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub id: KeyframeId,
    pub pose: Pose,
}

impl Keyframe {
    #[inline]
    pub fn new(pose: Pose) -> Self {
        Self {
            id: KeyframeId::new(),
            pose,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Timeline {
    keyframes: Vec<Keyframe>,
    selected: usize,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// One default keyframe, selected.
    pub fn new() -> Self {
        Self {
            keyframes: vec![Keyframe::new(Pose::default())],
            selected: 0,
        }
    }

    /// Build a timeline from poses in order. An empty input yields [`Timeline::new`].
    pub fn from_poses<I>(poses: I) -> Self
    where
        I: IntoIterator<Item = Pose>,
    {
        let keyframes: Vec<Keyframe> = poses
            .into_iter()
            .map(|pose| Keyframe::new(pose.clamped()))
            .collect();
        if keyframes.is_empty() {
            return Self::new();
        }
        Self {
            keyframes,
            selected: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    #[inline]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[inline]
    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn poses(&self) -> impl ExactSizeIterator<Item = &Pose> + '_ {
        self.keyframes.iter().map(|k| &k.pose)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    /// Pose under the selection, or the default pose when the selection is out of range.
    pub fn selected_pose(&self) -> Pose {
        self.keyframes
            .get(self.selected)
            .map(|k| k.pose)
            .unwrap_or_default()
    }

    /// Clamp an index into `[0, len - 1]`. Hosts run slider input through this
    /// before calling [`Timeline::set_selection`].
    #[inline]
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.keyframes.len().saturating_sub(1))
    }

    /// Select `index` without validation.
    pub fn set_selection(&mut self, index: usize) {
        if index >= self.keyframes.len() {
            debug!(
                "selection {index} is past the end of a {}-keyframe timeline",
                self.keyframes.len()
            );
        }
        self.selected = index;
    }

    /// Push a copy of the selected pose and select it. Returns the new index.
    pub fn append(&mut self) -> usize {
        let pose = self.selected_pose();
        self.keyframes.push(Keyframe::new(pose));
        self.selected = self.keyframes.len() - 1;
        debug!("appended keyframe {}", self.selected);
        self.selected
    }

    /// Duplicate the selected pose right after the selection and select the copy.
    pub fn insert_after_selection(&mut self) -> usize {
        let anchor = self.clamp_index(self.selected);
        let pose = self
            .keyframes
            .get(anchor)
            .map(|k| k.pose)
            .unwrap_or_default();
        let at = (anchor + 1).min(self.keyframes.len());
        self.keyframes.insert(at, Keyframe::new(pose));
        self.selected = at;
        debug!("inserted keyframe at {at}");
        at
    }

    /// Remove the selected keyframe unless it is the last one left.
    ///
    /// Returns `None` (and leaves the timeline untouched) when only one keyframe
    /// remains or the selection does not resolve.
    pub fn remove_selected(&mut self) -> Option<Keyframe> {
        if self.keyframes.len() <= 1 || self.selected >= self.keyframes.len() {
            return None;
        }
        let removed = self.keyframes.remove(self.selected);
        self.selected = self.selected.min(self.keyframes.len() - 1);
        debug!(
            "removed keyframe, {} left, selection {}",
            self.keyframes.len(),
            self.selected
        );
        Some(removed)
    }

    /// Set one angle of the selected pose (clamped to the editable range).
    ///
    /// When the selection points past the end, a fresh default keyframe is
    /// appended and selected before the update is applied.
    pub fn update_selected(&mut self, joint: Joint, axis: Axis, value: f64) {
        let index = self.heal_selection();
        let slot = &mut self.keyframes[index];
        slot.pose = slot.pose.with_axis(joint, axis, value);
    }

    /// Replace the whole selected pose (clamped). Same healing as [`Timeline::update_selected`].
    pub fn replace_selected(&mut self, pose: Pose) {
        let index = self.heal_selection();
        self.keyframes[index].pose = pose.clamped();
    }

    // Grows the timeline by at most one keyframe, whatever the dangling index.
    fn heal_selection(&mut self) -> usize {
        if self.selected < self.keyframes.len() {
            return self.selected;
        }
        warn!(
            "selection {} out of range ({} keyframes); appending a default pose",
            self.selected,
            self.keyframes.len()
        );
        self.keyframes.push(Keyframe::new(Pose::default()));
        self.selected = self.keyframes.len() - 1;
        self.selected
    }

    /// Move the selection one step forward, wrapping to 0 after the last keyframe.
    /// Returns the new index, or `None` if there is nothing to select.
    pub fn advance_selection(&mut self) -> Option<usize> {
        let len = self.keyframes.len();
        if len == 0 {
            return None;
        }
        self.selected = (self.selected % len + 1) % len;
        Some(self.selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timeline_has_one_default_keyframe() {
        let tl = Timeline::new();
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.selected_index(), 0);
        assert_eq!(tl.selected_pose(), Pose::default());
    }

    #[test]
    fn append_copies_selection_and_selects_last() {
        let mut tl = Timeline::new();
        tl.update_selected(Joint::Head, Axis::X, 20.0);
        assert_eq!(tl.append(), 1);
        assert_eq!(tl.selected_pose().head.x, 20.0);
        assert_ne!(tl.keyframes()[0].id, tl.keyframes()[1].id);
    }

    #[test]
    fn append_with_dangling_selection_uses_default_pose() {
        let mut tl = Timeline::new();
        tl.update_selected(Joint::Head, Axis::X, 20.0);
        tl.set_selection(7);
        tl.append();
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.selected_index(), 1);
        assert_eq!(tl.selected_pose(), Pose::default());
    }

    #[test]
    fn insert_twice_then_remove() {
        let mut tl = Timeline::new();
        tl.insert_after_selection();
        tl.insert_after_selection();
        assert_eq!(tl.len(), 3);
        assert_eq!(tl.selected_index(), 2);

        tl.remove_selected();
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.selected_index(), 1);
    }

    #[test]
    fn insert_lands_directly_after_selection() {
        let mut tl = Timeline::new();
        tl.append();
        tl.update_selected(Joint::LeftArm, Axis::Y, 90.0);
        tl.set_selection(0);
        tl.insert_after_selection();
        assert_eq!(tl.selected_index(), 1);
        assert_eq!(tl.get(1).unwrap().pose.left_arm.y, 0.0);
        assert_eq!(tl.get(2).unwrap().pose.left_arm.y, 90.0);
    }

    #[test]
    fn remove_on_single_keyframe_is_noop() {
        let mut tl = Timeline::new();
        tl.update_selected(Joint::RightArm, Axis::Z, 5.0);
        let before = tl.keyframes().to_vec();
        assert!(tl.remove_selected().is_none());
        assert_eq!(tl.keyframes(), before.as_slice());
        assert_eq!(tl.selected_index(), 0);
    }

    #[test]
    fn remove_first_keeps_selection_index() {
        let mut tl = Timeline::new();
        tl.append();
        tl.append();
        tl.set_selection(0);
        tl.remove_selected();
        assert_eq!(tl.selected_index(), 0);
        assert_eq!(tl.len(), 2);
    }

    #[test]
    fn update_past_end_self_heals() {
        let mut tl = Timeline::new();
        tl.set_selection(3);
        tl.update_selected(Joint::LeftLeg, Axis::X, -45.0);
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.selected_index(), 1);
        assert_eq!(tl.get(1).unwrap().pose.left_leg.x, -45.0);
        assert_eq!(tl.get(0).unwrap().pose, Pose::default());
    }

    #[test]
    fn far_out_selection_grows_by_one_keyframe() {
        let mut tl = Timeline::new();
        tl.set_selection(usize::MAX);
        tl.update_selected(Joint::Head, Axis::X, 10.0);
        assert_eq!(tl.len(), 2);
        assert_eq!(tl.selected_index(), 1);
        assert_eq!(tl.selected_pose().head.x, 10.0);

        tl.set_selection(1 << 40);
        let mut pose = Pose::default();
        pose.right_leg.z = 30.0;
        tl.replace_selected(pose);
        assert_eq!(tl.len(), 3);
        assert_eq!(tl.selected_index(), 2);
        assert_eq!(tl.selected_pose().right_leg.z, 30.0);
    }

    #[test]
    fn update_clamps_into_range() {
        let mut tl = Timeline::new();
        tl.update_selected(Joint::Head, Axis::Y, 181.0);
        assert_eq!(tl.selected_pose().head.y, 180.0);
    }

    #[test]
    fn replace_selected_clamps_whole_pose() {
        let mut tl = Timeline::new();
        let mut pose = Pose::default();
        pose.right_arm.x = -400.0;
        tl.replace_selected(pose);
        assert_eq!(tl.selected_pose().right_arm.x, -180.0);
    }

    #[test]
    fn advance_wraps_around() {
        let mut tl = Timeline::new();
        tl.append();
        tl.append();
        tl.set_selection(2);
        assert_eq!(tl.advance_selection(), Some(0));
        assert_eq!(tl.advance_selection(), Some(1));

        tl.set_selection(usize::MAX);
        assert_eq!(tl.advance_selection(), Some(1));
    }

    #[test]
    fn clamp_index_bounds_slider_input() {
        let mut tl = Timeline::new();
        tl.append();
        assert_eq!(tl.clamp_index(9), 1);
        assert_eq!(tl.clamp_index(0), 0);
    }

    #[test]
    fn from_poses_empty_falls_back_to_default() {
        let tl = Timeline::from_poses(Vec::new());
        assert_eq!(tl.len(), 1);
    }
}
