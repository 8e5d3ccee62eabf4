//! Pose landmark types.
//!
//! The pose estimator yields up to 33 landmarks per frame using the
//! BlazePose index scheme:
//!
//! - 0-10: Face (nose, eyes, ears, mouth)
//! - 11-16: Shoulders, elbows, wrists
//! - 17-22: Hand points (pinky, index, thumb)
//! - 23-28: Hips, knees, ankles
//! - 29-32: Heels and foot index

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of landmarks in one pose frame.
pub const JOINT_COUNT: usize = 33;

/// A point in normalized camera space.
///
/// `x` and `y` are in [0, 1] relative to the frame (y grows downward),
/// `z` is depth relative to the hips.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Point3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One tracked landmark with its confidence score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JointSample {
    #[serde(flatten)]
    pub position: Point3D,
    /// Confidence in [0, 1] that the position is reliable.
    pub visibility: f64,
}

impl JointSample {
    pub const fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self {
            position: Point3D::new(x, y, z),
            visibility,
        }
    }
}

/// Named landmark in the 33-point body model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Joint {
    Nose,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl Joint {
    /// All joints in index order.
    pub const ALL: [Joint; JOINT_COUNT] = [
        Joint::Nose,
        Joint::LeftEyeInner,
        Joint::LeftEye,
        Joint::LeftEyeOuter,
        Joint::RightEyeInner,
        Joint::RightEye,
        Joint::RightEyeOuter,
        Joint::LeftEar,
        Joint::RightEar,
        Joint::MouthLeft,
        Joint::MouthRight,
        Joint::LeftShoulder,
        Joint::RightShoulder,
        Joint::LeftElbow,
        Joint::RightElbow,
        Joint::LeftWrist,
        Joint::RightWrist,
        Joint::LeftPinky,
        Joint::RightPinky,
        Joint::LeftIndex,
        Joint::RightIndex,
        Joint::LeftThumb,
        Joint::RightThumb,
        Joint::LeftHip,
        Joint::RightHip,
        Joint::LeftKnee,
        Joint::RightKnee,
        Joint::LeftAnkle,
        Joint::RightAnkle,
        Joint::LeftHeel,
        Joint::RightHeel,
        Joint::LeftFootIndex,
        Joint::RightFootIndex,
    ];

    /// Position of this joint in the estimator's output array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a joint by its estimator index.
    pub fn from_index(index: usize) -> Option<Joint> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Joint::Nose => "nose",
            Joint::LeftEyeInner => "left_eye_inner",
            Joint::LeftEye => "left_eye",
            Joint::LeftEyeOuter => "left_eye_outer",
            Joint::RightEyeInner => "right_eye_inner",
            Joint::RightEye => "right_eye",
            Joint::RightEyeOuter => "right_eye_outer",
            Joint::LeftEar => "left_ear",
            Joint::RightEar => "right_ear",
            Joint::MouthLeft => "mouth_left",
            Joint::MouthRight => "mouth_right",
            Joint::LeftShoulder => "left_shoulder",
            Joint::RightShoulder => "right_shoulder",
            Joint::LeftElbow => "left_elbow",
            Joint::RightElbow => "right_elbow",
            Joint::LeftWrist => "left_wrist",
            Joint::RightWrist => "right_wrist",
            Joint::LeftPinky => "left_pinky",
            Joint::RightPinky => "right_pinky",
            Joint::LeftIndex => "left_index",
            Joint::RightIndex => "right_index",
            Joint::LeftThumb => "left_thumb",
            Joint::RightThumb => "right_thumb",
            Joint::LeftHip => "left_hip",
            Joint::RightHip => "right_hip",
            Joint::LeftKnee => "left_knee",
            Joint::RightKnee => "right_knee",
            Joint::LeftAnkle => "left_ankle",
            Joint::RightAnkle => "right_ankle",
            Joint::LeftHeel => "left_heel",
            Joint::RightHeel => "right_heel",
            Joint::LeftFootIndex => "left_foot_index",
            Joint::RightFootIndex => "right_foot_index",
        }
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a landmark array has the wrong length.
#[derive(Debug, Error)]
#[error("Pose frame must contain 33 landmarks, got {0}")]
pub struct PoseFrameLengthError(pub usize);

/// The landmarks detected in one video frame.
///
/// Serialized as a 33-element array; undetected joints are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Option<JointSample>>", into = "Vec<Option<JointSample>>")]
pub struct PoseFrame {
    joints: [Option<JointSample>; JOINT_COUNT],
}

impl PoseFrame {
    /// A frame with no detected joints.
    pub fn empty() -> Self {
        Self {
            joints: [None; JOINT_COUNT],
        }
    }

    /// Set the sample for one joint.
    pub fn with_joint(mut self, joint: Joint, sample: JointSample) -> Self {
        self.joints[joint.index()] = Some(sample);
        self
    }

    pub fn set(&mut self, joint: Joint, sample: Option<JointSample>) {
        self.joints[joint.index()] = sample;
    }

    pub fn get(&self, joint: Joint) -> Option<&JointSample> {
        self.joints[joint.index()].as_ref()
    }

    /// Number of joints present in this frame.
    pub fn detected_count(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<Option<JointSample>>> for PoseFrame {
    type Error = PoseFrameLengthError;

    fn try_from(samples: Vec<Option<JointSample>>) -> Result<Self, Self::Error> {
        let len = samples.len();
        let joints: [Option<JointSample>; JOINT_COUNT] =
            samples.try_into().map_err(|_| PoseFrameLengthError(len))?;
        Ok(Self { joints })
    }
}

impl From<PoseFrame> for Vec<Option<JointSample>> {
    fn from(frame: PoseFrame) -> Self {
        frame.joints.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_index_roundtrip() {
        for (i, joint) in Joint::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
            assert_eq!(Joint::from_index(i), Some(*joint));
        }
        assert_eq!(Joint::from_index(JOINT_COUNT), None);
    }

    #[test]
    fn test_known_indices() {
        assert_eq!(Joint::LeftShoulder.index(), 11);
        assert_eq!(Joint::LeftHip.index(), 23);
        assert_eq!(Joint::LeftAnkle.index(), 27);
        assert_eq!(Joint::RightFootIndex.index(), 32);
    }

    #[test]
    fn test_pose_frame_rejects_wrong_length() {
        let json = "[null, null]";
        let err = serde_json::from_str::<PoseFrame>(json).unwrap_err();
        assert!(err.to_string().contains("33 landmarks"));
    }

    #[test]
    fn test_pose_frame_deserializes_samples() {
        let mut entries = vec!["null".to_string(); JOINT_COUNT];
        entries[Joint::LeftHip.index()] =
            r#"{"x":0.5,"y":0.6,"z":-0.1,"visibility":0.9}"#.to_string();
        let json = format!("[{}]", entries.join(","));

        let frame: PoseFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(frame.detected_count(), 1);
        let hip = frame.get(Joint::LeftHip).unwrap();
        assert_eq!(hip.position.y, 0.6);
        assert_eq!(hip.visibility, 0.9);
        assert!(frame.get(Joint::LeftKnee).is_none());
    }
}
