//! Closed sets of animatable joints and rotation axes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// One of the five animatable body parts of an armor stand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Head,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl Joint {
    /// All joints in file order.
    pub const ALL: [Joint; 5] = [
        Joint::Head,
        Joint::LeftArm,
        Joint::RightArm,
        Joint::LeftLeg,
        Joint::RightLeg,
    ];

    /// Key used for this joint in `animations.yml`.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::LeftArm => "left_arm",
            Self::RightArm => "right_arm",
            Self::LeftLeg => "left_leg",
            Self::RightLeg => "right_leg",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Joint {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Joint::ALL
            .into_iter()
            .find(|joint| joint.name() == s)
            .ok_or_else(|| AnimationError::UnknownJoint {
                name: s.to_string(),
            })
    }
}

/// Rotation axis of a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Axis {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            "z" | "Z" => Ok(Self::Z),
            _ => Err(AnimationError::UnknownAxis {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_names_round_trip_through_from_str() {
        for joint in Joint::ALL {
            assert_eq!(joint.name().parse::<Joint>().unwrap(), joint);
        }
    }

    #[test]
    fn unknown_joint_is_rejected() {
        let err = "tail".parse::<Joint>().unwrap_err();
        assert_eq!(
            err,
            AnimationError::UnknownJoint {
                name: "tail".into()
            }
        );
    }

    #[test]
    fn axis_accepts_upper_case() {
        assert_eq!("Y".parse::<Axis>().unwrap(), Axis::Y);
        assert!("w".parse::<Axis>().is_err());
    }

    #[test]
    fn serde_uses_file_keys() {
        assert_eq!(
            serde_json::to_string(&Joint::RightLeg).unwrap(),
            "\"right_leg\""
        );
        assert_eq!(serde_json::to_string(&Axis::Z).unwrap(), "\"z\"");
    }
}
