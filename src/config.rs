use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PostureError, Result};
use crate::feedback::Language;
use crate::report::{Status, ViewMode};

/// Closed interval of "good" values. Anything strictly below `lower` or
/// strictly above `upper` is out of band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub lower: f32,
    pub upper: f32,
}

impl Band {
    pub const fn new(lower: f32, upper: f32) -> Self {
        Self { lower, upper }
    }

    pub fn classify(&self, value: f32, below: Status, above: Status) -> Status {
        if value < self.lower {
            below
        } else if value > self.upper {
            above
        } else {
            Status::Good
        }
    }

    fn validate(&self, name: &'static str) -> Result<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(PostureError::InvalidThreshold {
                name,
                reason: "bounds must be finite".to_string(),
            });
        }
        if self.lower > self.upper {
            return Err(PostureError::InvalidThreshold {
                name,
                reason: format!("lower {} is above upper {}", self.lower, self.upper),
            });
        }
        Ok(())
    }
}

/// Tunable cutoffs. Angles are in degrees, distances are fractions of the
/// frame height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// How far the hip may sit above the knee before the seat is too high.
    pub seat_drop: f32,
    /// Nose above this y means the head is close to the roof.
    pub head_clearance: f32,
    pub back: Band,
    pub knee: Band,
    pub hip: Band,
    pub elbow: Band,
    pub arm_reach: Band,
    /// Eye y inside this band is a good seat height in front view.
    pub eye_level: Band,
}

impl Thresholds {
    pub const STANDARD: Thresholds = Thresholds {
        seat_drop: 0.05,
        head_clearance: 0.1,
        back: Band::new(5.0, 30.0),
        knee: Band::new(100.0, 140.0),
        hip: Band::new(90.0, 115.0),
        elbow: Band::new(90.0, 145.0),
        arm_reach: Band::new(90.0, 150.0),
        eye_level: Band::new(0.25, 0.6),
    };

    pub fn validate(&self) -> Result<()> {
        self.back.validate("back")?;
        self.knee.validate("knee")?;
        self.hip.validate("hip")?;
        self.elbow.validate("elbow")?;
        self.arm_reach.validate("arm_reach")?;
        self.eye_level.validate("eye_level")?;

        for (name, value) in [
            ("seat_drop", self.seat_drop),
            ("head_clearance", self.head_clearance),
        ] {
            if !value.is_finite() {
                return Err(PostureError::InvalidThreshold {
                    name,
                    reason: "must be finite".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_mode: ViewMode,
    pub language: Language,
    /// Knee scoring is under review; turning it off drops the knee reading.
    pub score_knee: bool,
    pub thresholds: Thresholds,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: ViewMode::Side,
            language: Language::Korean,
            score_knee: true,
            thresholds: Thresholds::STANDARD,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_good() {
        let band = Band::new(5.0, 30.0);
        assert_eq!(band.classify(5.0, Status::TooUpright, Status::TooReclined), Status::Good);
        assert_eq!(band.classify(30.0, Status::TooUpright, Status::TooReclined), Status::Good);
        assert_eq!(
            band.classify(4.999, Status::TooUpright, Status::TooReclined),
            Status::TooUpright
        );
        assert_eq!(
            band.classify(30.001, Status::TooUpright, Status::TooReclined),
            Status::TooReclined
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            default_mode = "front"
            score_knee = false

            [thresholds]
            seat_drop = 0.08

            [thresholds.back]
            lower = 8.0
            upper = 25.0
            "#,
        )
        .unwrap();

        assert_eq!(config.default_mode, ViewMode::Front);
        assert_eq!(config.language, Language::Korean);
        assert!(!config.score_knee);
        assert_eq!(config.thresholds.back, Band::new(8.0, 25.0));
        assert_eq!(config.thresholds.seat_drop, 0.08);
        assert_eq!(config.thresholds.hip, Thresholds::STANDARD.hip);
    }

    #[test]
    fn unknown_mode_in_toml_is_rejected() {
        let parsed: std::result::Result<Config, _> = toml::from_str(r#"default_mode = "top""#);
        assert!(parsed.is_err());
    }

    #[test]
    fn inverted_band_fails_validation() {
        let mut config = Config::default();
        config.thresholds.knee = Band::new(150.0, 100.0);
        assert!(matches!(
            config.validate(),
            Err(PostureError::InvalidThreshold { name: "knee", .. })
        ));
    }

    #[test]
    fn non_finite_cutoff_fails_validation() {
        let mut config = Config::default();
        config.thresholds.head_clearance = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(PostureError::InvalidThreshold {
                name: "head_clearance",
                ..
            })
        ));
    }
}
