//! Driver seat ergonomics from 2D pose landmarks.
//!
//! Feed one frame of BlazePose landmarks and a [`ViewMode`] to
//! [`PostureAnalyzer::analyze`] to get per-measurement statuses and advice
//! text for the seat, backrest and steering wheel position.

pub mod config;
pub mod error;
pub mod feedback;
pub mod geometry;
pub mod landmark;
pub mod logger;
pub mod posture;
pub mod report;

pub use config::{Band, Config, Thresholds};
pub use error::{PostureError, Result};
pub use feedback::{Language, Phrasebook};
pub use landmark::{BodySide, Joint, Landmark, Pose, MIN_VISIBILITY, REQUIRED_LANDMARKS};
pub use posture::{PostureAnalyzer, SIDE_SWITCH_MARGIN};
pub use report::{
    AnalysisResult, FrontAnalysis, Measure, Reading, SideAnalysis, Status, ViewAnalysis, ViewMode,
};
