//! Per-joint rotation state for one instant of an animation.
//!
//! Angles are degrees. Every constructor and mutator in this module clamps into
//! [`ANGLE_MIN`, `ANGLE_MAX`], so a [`Pose`] built through the API never holds an
//! angle the plugin would reject.

use serde::{Deserialize, Serialize};

use crate::joint::{Axis, Joint};

/// Smallest angle accepted for any axis (degrees).
pub const ANGLE_MIN: f64 = -180.0;
/// Largest angle accepted for any axis (degrees).
pub const ANGLE_MAX: f64 = 180.0;

/// Clamp an angle into the editable range. NaN maps to 0.
#[inline]
pub fn clamp_degrees(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(ANGLE_MIN, ANGLE_MAX)
    }
}

/// Rotation of a single joint, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x: clamp_degrees(x),
            y: clamp_degrees(y),
            z: clamp_degrees(z),
        }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy with one axis replaced (clamped).
    #[inline]
    pub fn with(mut self, axis: Axis, value: f64) -> Self {
        let value = clamp_degrees(value);
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
        self
    }

    pub fn clamped(&self) -> Self {
        Self::new(self.x, self.y, self.z)
    }

    /// Radians in x, y, z order, for renderers that build Euler transforms.
    pub fn to_radians(&self) -> [f32; 3] {
        [
            self.x.to_radians() as f32,
            self.y.to_radians() as f32,
            self.z.to_radians() as f32,
        ]
    }
}

/// Complete set of joint rotations of the armor stand.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Pose {
    pub head: Rotation,
    pub left_arm: Rotation,
    pub right_arm: Rotation,
    pub left_leg: Rotation,
    pub right_leg: Rotation,
}

impl Pose {
    #[inline]
    pub fn get(&self, joint: Joint) -> Rotation {
        match joint {
            Joint::Head => self.head,
            Joint::LeftArm => self.left_arm,
            Joint::RightArm => self.right_arm,
            Joint::LeftLeg => self.left_leg,
            Joint::RightLeg => self.right_leg,
        }
    }

    #[inline]
    pub fn angle(&self, joint: Joint, axis: Axis) -> f64 {
        self.get(joint).get(axis)
    }

    fn slot_mut(&mut self, joint: Joint) -> &mut Rotation {
        match joint {
            Joint::Head => &mut self.head,
            Joint::LeftArm => &mut self.left_arm,
            Joint::RightArm => &mut self.right_arm,
            Joint::LeftLeg => &mut self.left_leg,
            Joint::RightLeg => &mut self.right_leg,
        }
    }

    /// Returns a new pose with a single angle replaced. `self` is left untouched.
    #[must_use]
    pub fn with_axis(&self, joint: Joint, axis: Axis, value: f64) -> Pose {
        let mut next = *self;
        let slot = next.slot_mut(joint);
        *slot = slot.with(axis, value);
        next
    }

    /// Returns a new pose with one joint's rotation replaced (clamped).
    #[must_use]
    pub fn with_rotation(&self, joint: Joint, rotation: Rotation) -> Pose {
        let mut next = *self;
        *next.slot_mut(joint) = rotation.clamped();
        next
    }

    /// Copy with every angle clamped into range.
    #[must_use]
    pub fn clamped(&self) -> Pose {
        let mut next = *self;
        for joint in Joint::ALL {
            let slot = next.slot_mut(joint);
            *slot = slot.clamped();
        }
        next
    }

    /// Joint rotations in file order.
    pub fn joints(&self) -> impl Iterator<Item = (Joint, Rotation)> + '_ {
        Joint::ALL.into_iter().map(move |joint| (joint, self.get(joint)))
    }
}
