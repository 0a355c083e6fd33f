use chrono::Utc;
use tracing::{debug, trace};

use crate::config::{Config, Thresholds};
use crate::error::Result;
use crate::feedback::Phrasebook;
use crate::geometry::{angle_between, vertical_tilt};
use crate::landmark::{BodySide, Joint, Landmark, Pose};
use crate::report::{
    AnalysisResult, FrontAnalysis, Measure, Reading, SideAnalysis, Status, ViewAnalysis, ViewMode,
};

/// The left profile is used only when its hip is tracked this much more
/// confidently than the right one.
pub const SIDE_SWITCH_MARGIN: f32 = 0.2;

/// Turns one frame of landmarks into seat adjustment advice.
///
/// Holds only immutable settings, so a single analyzer can be shared across
/// threads and every call is independent.
#[derive(Debug, Clone)]
pub struct PostureAnalyzer {
    thresholds: Thresholds,
    phrases: Phrasebook,
    score_knee: bool,
}

impl Default for PostureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl PostureAnalyzer {
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::STANDARD,
            phrases: Phrasebook::default(),
            score_knee: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            thresholds: config.thresholds,
            phrases: Phrasebook::for_language(config.language),
            score_knee: config.score_knee,
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_phrasebook(mut self, phrases: Phrasebook) -> Self {
        self.phrases = phrases;
        self
    }

    pub fn with_knee_scoring(mut self, enabled: bool) -> Self {
        self.score_knee = enabled;
        self
    }

    /// Analyse one frame.
    ///
    /// Returns `Ok(None)` when there is nothing to analyse: an empty frame,
    /// or a body that is not visible enough for the chosen view. Joints with
    /// non-finite values count as not visible. Only frames too short to hold
    /// every joint are rejected with an error.
    pub fn analyze(&self, landmarks: &[Landmark], mode: ViewMode) -> Result<Option<AnalysisResult>> {
        if landmarks.is_empty() {
            debug!("no landmarks in frame");
            return Ok(None);
        }
        let pose = Pose::new(landmarks)?;

        let view = match mode {
            ViewMode::Side => self.analyze_side(&pose).map(ViewAnalysis::Side),
            ViewMode::Front => self.analyze_front(&pose).map(ViewAnalysis::Front),
        };

        Ok(view.map(|view| AnalysisResult {
            view,
            captured_at: Utc::now(),
        }))
    }

    fn analyze_side(&self, pose: &Pose) -> Option<SideAnalysis> {
        let side = select_side(pose);
        let joint = |left, right| pose.get(side.pick(left, right));

        let shoulder = joint(Joint::LeftShoulder, Joint::RightShoulder);
        let hip = joint(Joint::LeftHip, Joint::RightHip);
        let knee = joint(Joint::LeftKnee, Joint::RightKnee);
        let ankle = joint(Joint::LeftAnkle, Joint::RightAnkle);
        let elbow = joint(Joint::LeftElbow, Joint::RightElbow);
        let wrist = joint(Joint::LeftWrist, Joint::RightWrist);
        let nose = pose.get(Joint::Nose);

        if !(shoulder.is_visible() && hip.is_visible() && knee.is_visible()) {
            debug!(
                ?side,
                shoulder = shoulder.visibility,
                hip = hip.visibility,
                knee = knee.visibility,
                "torso not visible enough for side analysis"
            );
            return None;
        }

        let back = self.back(shoulder, hip);
        let knee_reading = self.score_knee.then(|| self.knee(hip, knee, ankle));
        let hip_reading = self.hip(shoulder, hip, knee);
        let elbow_reading = self.elbow(shoulder, elbow, wrist);
        let height = self.seat_height(hip, knee, nose);

        Some(SideAnalysis {
            side,
            back,
            knee: knee_reading,
            hip: hip_reading,
            elbow: elbow_reading,
            height,
        })
    }

    fn analyze_front(&self, pose: &Pose) -> Option<FrontAnalysis> {
        let height = self.eye_level(pose);
        let distance = self.arm_reach(pose);

        if height.status == Status::Unknown && distance.status == Status::Unknown {
            debug!("neither eyes nor arms visible enough for front analysis");
            return None;
        }

        Some(FrontAnalysis { height, distance })
    }

    fn back(&self, shoulder: &Landmark, hip: &Landmark) -> Reading {
        let angle = vertical_tilt(shoulder.point(), hip.point());
        trace!(angle, "back tilt");
        let status = self
            .thresholds
            .back
            .classify(angle, Status::TooUpright, Status::TooReclined);
        Reading::new(Measure::Back, status, Some(angle), &self.phrases)
    }

    fn knee(&self, hip: &Landmark, knee: &Landmark, ankle: &Landmark) -> Reading {
        if !ankle.is_visible() {
            return Reading::unknown(Measure::Knee, &self.phrases);
        }
        let angle = angle_between(hip.point(), knee.point(), ankle.point());
        trace!(angle, "knee angle");
        let status = self
            .thresholds
            .knee
            .classify(angle, Status::TooBent, Status::TooStraight);
        Reading::new(Measure::Knee, status, Some(angle), &self.phrases)
    }

    fn hip(&self, shoulder: &Landmark, hip: &Landmark, knee: &Landmark) -> Reading {
        let angle = angle_between(shoulder.point(), hip.point(), knee.point());
        trace!(angle, "hip angle");
        let status = self
            .thresholds
            .hip
            .classify(angle, Status::TooClosed, Status::TooOpen);
        Reading::new(Measure::Hip, status, Some(angle), &self.phrases)
    }

    fn elbow(&self, shoulder: &Landmark, elbow: &Landmark, wrist: &Landmark) -> Reading {
        if !(elbow.is_visible() && wrist.is_visible()) {
            return Reading::unknown(Measure::Elbow, &self.phrases);
        }
        let angle = angle_between(shoulder.point(), elbow.point(), wrist.point());
        trace!(angle, "elbow angle");
        let status = self
            .thresholds
            .elbow
            .classify(angle, Status::TooBent, Status::TooStraight);
        Reading::new(Measure::Elbow, status, Some(angle), &self.phrases)
    }

    fn seat_height(&self, hip: &Landmark, knee: &Landmark, nose: &Landmark) -> Reading {
        // y grows downward: negative means the hip sits above the knee
        let drop = hip.y - knee.y;
        let mut status = if drop < -self.thresholds.seat_drop {
            Status::TooHigh
        } else {
            Status::Good
        };

        if nose.is_visible() && nose.y < self.thresholds.head_clearance {
            debug!(nose_y = nose.y, "head close to the top of the frame");
            status = Status::TooHighHead;
        }

        Reading::new(Measure::SeatHeight, status, None, &self.phrases)
    }

    fn eye_level(&self, pose: &Pose) -> Reading {
        let Some(eye_y) = mean(
            [Joint::LeftEye, Joint::RightEye]
                .into_iter()
                .filter_map(|eye| pose.visible(eye))
                .map(|eye| eye.y),
        ) else {
            return Reading::unknown(Measure::EyeLevel, &self.phrases);
        };

        trace!(eye_y, "eye level");
        // a large y means the eyes sit low in the frame
        let status = self
            .thresholds
            .eye_level
            .classify(eye_y, Status::TooHigh, Status::TooLow);
        Reading::new(Measure::EyeLevel, status, None, &self.phrases)
    }

    fn arm_reach(&self, pose: &Pose) -> Reading {
        let arms = [
            (Joint::LeftShoulder, Joint::LeftElbow, Joint::LeftWrist),
            (Joint::RightShoulder, Joint::RightElbow, Joint::RightWrist),
        ];
        let angles = arms.into_iter().filter_map(|(shoulder, elbow, wrist)| {
            let shoulder = pose.visible(shoulder)?;
            let elbow = pose.visible(elbow)?;
            let wrist = pose.visible(wrist)?;
            Some(angle_between(shoulder.point(), elbow.point(), wrist.point()))
        });

        let Some(angle) = mean(angles) else {
            return Reading::unknown(Measure::ArmReach, &self.phrases);
        };

        trace!(angle, "arm reach");
        let status = self
            .thresholds
            .arm_reach
            .classify(angle, Status::TooClose, Status::TooFar);
        Reading::new(Measure::ArmReach, status, Some(angle), &self.phrases)
    }
}

/// Right profile unless the left hip is tracked clearly better.
pub fn select_side(pose: &Pose) -> BodySide {
    let left = pose.get(Joint::LeftHip).visibility;
    let right = pose.get(Joint::RightHip).visibility;
    let side = if left > right + SIDE_SWITCH_MARGIN {
        BodySide::Left
    } else {
        BodySide::Right
    };
    debug!(left_hip = left, right_hip = right, ?side, "selected body side");
    side
}

fn mean(values: impl Iterator<Item = f32>) -> Option<f32> {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::REQUIRED_LANDMARKS;

    fn blank() -> Vec<Landmark> {
        vec![Landmark::new(0.0, 0.0, 0.0); 33]
    }

    fn set(frame: &mut [Landmark], joint: Joint, x: f32, y: f32, visibility: f32) {
        frame[joint.index()] = Landmark::new(x, y, visibility);
    }

    #[test]
    fn side_defaults_to_right() {
        let mut frame = blank();
        set(&mut frame, Joint::LeftHip, 0.5, 0.5, 0.6);
        set(&mut frame, Joint::RightHip, 0.5, 0.5, 0.5);
        let pose = Pose::new(&frame).unwrap();
        assert_eq!(select_side(&pose), BodySide::Right);
    }

    #[test]
    fn side_switches_to_left_past_margin() {
        let mut frame = blank();
        set(&mut frame, Joint::LeftHip, 0.5, 0.5, 0.9);
        set(&mut frame, Joint::RightHip, 0.5, 0.5, 0.5);
        let pose = Pose::new(&frame).unwrap();
        assert_eq!(select_side(&pose), BodySide::Left);
    }

    #[test]
    fn equal_visibility_breaks_toward_right() {
        let mut frame = blank();
        set(&mut frame, Joint::LeftHip, 0.5, 0.5, 0.8);
        set(&mut frame, Joint::RightHip, 0.5, 0.5, 0.8);
        let pose = Pose::new(&frame).unwrap();
        assert_eq!(select_side(&pose), BodySide::Right);
    }

    #[test]
    fn empty_frame_is_absent() {
        let analyzer = PostureAnalyzer::new();
        assert!(analyzer.analyze(&[], ViewMode::Side).unwrap().is_none());
        assert!(analyzer.analyze(&[], ViewMode::Front).unwrap().is_none());
    }

    #[test]
    fn short_frame_is_an_error() {
        let analyzer = PostureAnalyzer::new();
        let frame = vec![Landmark::new(0.5, 0.5, 1.0); REQUIRED_LANDMARKS - 1];
        assert!(analyzer.analyze(&frame, ViewMode::Side).is_err());
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(std::iter::empty()), None);
        assert_eq!(mean([90.0, 110.0].into_iter()), Some(100.0));
    }

    #[test]
    fn seat_drop_boundary() {
        let analyzer = PostureAnalyzer::new();
        let knee = Landmark::new(0.6, 0.6, 1.0);
        let nose = Landmark::new(0.5, 0.3, 1.0);

        let level = Landmark::new(0.5, 0.6, 1.0);
        assert_eq!(analyzer.seat_height(&level, &knee, &nose).status, Status::Good);

        let raised = Landmark::new(0.5, 0.5, 1.0);
        assert_eq!(analyzer.seat_height(&raised, &knee, &nose).status, Status::TooHigh);
    }

    #[test]
    fn hidden_nose_skips_head_clearance() {
        let analyzer = PostureAnalyzer::new();
        let hip = Landmark::new(0.5, 0.6, 1.0);
        let knee = Landmark::new(0.6, 0.6, 1.0);
        let nose = Landmark::new(0.5, 0.05, 0.2);
        assert_eq!(analyzer.seat_height(&hip, &knee, &nose).status, Status::Good);
    }
}
