use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PostureError;
use crate::feedback::Phrasebook;
use crate::landmark::BodySide;

/// Camera perspective the landmarks were captured from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Dashboard camera looking at the driver.
    Front,
    /// Profile camera, e.g. mounted on the passenger side.
    #[default]
    Side,
}

impl FromStr for ViewMode {
    type Err = PostureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "front" => Ok(ViewMode::Front),
            "side" => Ok(ViewMode::Side),
            _ => Err(PostureError::UnknownViewMode(s.to_string())),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Front => f.write_str("front"),
            ViewMode::Side => f.write_str("side"),
        }
    }
}

/// Ergonomic quantity a [`Reading`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    Back,
    Knee,
    Hip,
    Elbow,
    SeatHeight,
    EyeLevel,
    ArmReach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Good,
    TooUpright,
    TooReclined,
    TooBent,
    TooStraight,
    TooClosed,
    TooOpen,
    TooHigh,
    TooLow,
    TooHighHead,
    TooClose,
    TooFar,
    Unknown,
}

/// Status of one measurement together with its advice text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub status: Status,
    pub feedback: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<i32>,
}

impl Reading {
    /// The only way to build a reading: feedback is looked up from the
    /// status so the two never drift apart.
    pub fn new(measure: Measure, status: Status, angle: Option<f32>, phrases: &Phrasebook) -> Self {
        Self {
            status,
            feedback: phrases.phrase(measure, status),
            angle: angle.map(|degrees| degrees.round() as i32),
        }
    }

    pub fn unknown(measure: Measure, phrases: &Phrasebook) -> Self {
        Self::new(measure, Status::Unknown, None, phrases)
    }

    pub fn is_good(&self) -> bool {
        self.status == Status::Good
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrontAnalysis {
    pub height: Reading,
    pub distance: Reading,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideAnalysis {
    pub side: BodySide,
    pub back: Reading,
    /// `None` when knee scoring is switched off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knee: Option<Reading>,
    pub hip: Reading,
    pub elbow: Reading,
    pub height: Reading,
}

impl SideAnalysis {
    pub fn is_right_side(&self) -> bool {
        self.side == BodySide::Right
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewAnalysis {
    Front(FrontAnalysis),
    Side(SideAnalysis),
}

impl ViewAnalysis {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewAnalysis::Front(_) => ViewMode::Front,
            ViewAnalysis::Side(_) => ViewMode::Side,
        }
    }

    pub fn readings(&self) -> Vec<&Reading> {
        match self {
            ViewAnalysis::Front(front) => vec![&front.height, &front.distance],
            ViewAnalysis::Side(side) => {
                let mut readings = vec![&side.back];
                readings.extend(side.knee.as_ref());
                readings.extend([&side.hip, &side.elbow, &side.height]);
                readings
            }
        }
    }
}

/// Result of analysing a single frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(flatten)]
    pub view: ViewAnalysis,
    pub captured_at: DateTime<Utc>,
}

impl AnalysisResult {
    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    pub fn front(&self) -> Option<&FrontAnalysis> {
        match &self.view {
            ViewAnalysis::Front(front) => Some(front),
            ViewAnalysis::Side(_) => None,
        }
    }

    pub fn side(&self) -> Option<&SideAnalysis> {
        match &self.view {
            ViewAnalysis::Side(side) => Some(side),
            ViewAnalysis::Front(_) => None,
        }
    }

    /// True when every measured reading is good. Unknown readings do not
    /// count against the posture.
    pub fn all_good(&self) -> bool {
        self.view
            .readings()
            .iter()
            .all(|reading| reading.is_good() || reading.status == Status::Unknown)
    }
}
