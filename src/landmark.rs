use serde::{Deserialize, Serialize};

use crate::error::{PostureError, Result};
use crate::geometry::Point2;

/// Landmarks at or below this confidence are treated as not visible.
pub const MIN_VISIBILITY: f32 = 0.5;

/// One tracked body point from the pose model.
///
/// `x`/`y` are normalised to the frame (origin top-left, y downward).
/// `z` is carried through from the model but never used.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
    pub visibility: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }

    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// A landmark with a NaN or infinite component is never visible, so
    /// noisy joints degrade their measurement instead of failing the frame.
    pub fn is_visible(&self) -> bool {
        self.is_finite() && self.visibility > MIN_VISIBILITY
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.visibility.is_finite()
    }
}

impl From<&Landmark> for Point2 {
    fn from(landmark: &Landmark) -> Self {
        landmark.point()
    }
}

/// BlazePose indices this crate reads. Both view modes go through this one
/// table; the numbering is owned by the upstream model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum Joint {
    Nose = 0,
    LeftEye = 2,
    RightEye = 5,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
}

impl Joint {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Minimum frame length: one past the highest index in [`Joint`].
pub const REQUIRED_LANDMARKS: usize = Joint::RightAnkle as usize + 1;

/// Profile of the driver facing the camera in side view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodySide {
    Left,
    Right,
}

impl BodySide {
    pub fn pick(self, left: Joint, right: Joint) -> Joint {
        match self {
            BodySide::Left => left,
            BodySide::Right => right,
        }
    }
}

/// Bounds-checked view over one frame of landmarks.
#[derive(Debug, Clone, Copy)]
pub struct Pose<'a> {
    landmarks: &'a [Landmark],
}

impl<'a> Pose<'a> {
    /// Rejects frames that are too short to hold every [`Joint`].
    pub fn new(landmarks: &'a [Landmark]) -> Result<Self> {
        if landmarks.len() < REQUIRED_LANDMARKS {
            return Err(PostureError::TooFewLandmarks {
                required: REQUIRED_LANDMARKS,
                actual: landmarks.len(),
            });
        }
        Ok(Self { landmarks })
    }

    pub fn get(&self, joint: Joint) -> &'a Landmark {
        &self.landmarks[joint.index()]
    }

    pub fn visible(&self, joint: Joint) -> Option<&'a Landmark> {
        let landmark = self.get(joint);
        landmark.is_visible().then_some(landmark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(len: usize) -> Vec<Landmark> {
        vec![Landmark::new(0.5, 0.5, 1.0); len]
    }

    #[test]
    fn joint_indices_follow_blazepose() {
        assert_eq!(Joint::Nose.index(), 0);
        assert_eq!(Joint::LeftShoulder.index(), 11);
        assert_eq!(Joint::RightHip.index(), 24);
        assert_eq!(Joint::RightAnkle.index(), 28);
        assert_eq!(REQUIRED_LANDMARKS, 29);
    }

    #[test]
    fn short_frame_is_rejected() {
        let landmarks = frame(28);
        match Pose::new(&landmarks) {
            Err(PostureError::TooFewLandmarks { required, actual }) => {
                assert_eq!(required, 29);
                assert_eq!(actual, 28);
            }
            other => panic!("expected TooFewLandmarks, got {other:?}"),
        }
    }

    #[test]
    fn full_blazepose_frame_is_accepted() {
        let landmarks = frame(33);
        assert!(Pose::new(&landmarks).is_ok());
    }

    #[test]
    fn non_finite_joint_is_not_visible() {
        let mut landmarks = frame(33);
        landmarks[Joint::LeftKnee.index()].y = f32::NAN;
        landmarks[Joint::LeftEye.index()].visibility = f32::NAN;
        landmarks[Joint::Nose.index()].x = f32::INFINITY;

        let pose = Pose::new(&landmarks).unwrap();
        assert!(pose.visible(Joint::LeftKnee).is_none());
        assert!(pose.visible(Joint::LeftEye).is_none());
        assert!(pose.visible(Joint::Nose).is_none());
        assert!(pose.visible(Joint::RightKnee).is_some());
    }

    #[test]
    fn visibility_gate_is_strict() {
        assert!(!Landmark::new(0.0, 0.0, 0.5).is_visible());
        assert!(Landmark::new(0.0, 0.0, 0.51).is_visible());
        // models sometimes report above 1.0
        assert!(Landmark::new(0.0, 0.0, 1.7).is_visible());
    }

    #[test]
    fn z_is_optional_on_input() {
        let landmark: Landmark =
            serde_json::from_str(r#"{"x": 0.1, "y": 0.2, "visibility": 0.9}"#).unwrap();
        assert_eq!(landmark.z, 0.0);
        assert_eq!(landmark.point(), Point2::new(0.1, 0.2));
    }
}
