//! Advice text for every (measure, status) pair the classifier can emit.
//!
//! The tables are plain data so the wording can be swapped per deployment
//! without touching the classification code.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PostureError;
use crate::report::{Measure, Status};

type Entry = (Measure, Status, &'static str);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    Korean,
    English,
}

impl FromStr for Language {
    type Err = PostureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "korean" | "ko" => Ok(Language::Korean),
            "english" | "en" => Ok(Language::English),
            _ => Err(PostureError::UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Korean => f.write_str("korean"),
            Language::English => f.write_str("english"),
        }
    }
}

const KOREAN: &[Entry] = &[
    (Measure::Back, Status::Good, "등받이 각도가 좋습니다."),
    (Measure::Back, Status::TooUpright, "등받이를 조금 눕혀주세요."),
    (Measure::Back, Status::TooReclined, "등받이를 세워주세요."),
    (Measure::Back, Status::Unknown, "상체가 잘 보이지 않습니다."),
    (Measure::Knee, Status::Good, "무릎 각도가 적절합니다."),
    (Measure::Knee, Status::TooBent, "시트를 뒤로 이동하세요 (무릎이 너무 굽혀짐)."),
    (Measure::Knee, Status::TooStraight, "시트를 앞으로 당기세요 (무릎이 너무 펴짐)."),
    (Measure::Knee, Status::Unknown, "다리가 잘 보이지 않습니다."),
    (Measure::Hip, Status::Good, "상체와 다리 각도가 안정적입니다."),
    (
        Measure::Hip,
        Status::TooClosed,
        "자세가 너무 웅크려졌습니다. 등받이를 눕히거나 엉덩이를 깊숙이 넣으세요.",
    ),
    (Measure::Hip, Status::TooOpen, "자세가 너무 펴졌습니다."),
    (Measure::Hip, Status::Unknown, "엉덩이 각도 분석 불가"),
    (Measure::Elbow, Status::Good, "팔 각도가 적절합니다."),
    (Measure::Elbow, Status::TooBent, "핸들과 너무 가깝습니다."),
    (Measure::Elbow, Status::TooStraight, "핸들이 너무 멉니다."),
    (Measure::Elbow, Status::Unknown, "팔이 잘 보이지 않습니다."),
    (Measure::SeatHeight, Status::Good, "시트 높이가 적절합니다."),
    (Measure::SeatHeight, Status::TooHigh, "시트를 낮춰 엉덩이를 무릎보다 낮게 하세요."),
    (Measure::SeatHeight, Status::TooHighHead, "머리 공간이 부족합니다. 시트를 낮추세요."),
    (Measure::EyeLevel, Status::Good, "눈높이가 적절합니다."),
    (Measure::EyeLevel, Status::TooLow, "시트를 높여주세요 (눈높이가 너무 낮음)."),
    (Measure::EyeLevel, Status::TooHigh, "시트를 낮춰주세요 (눈높이가 너무 높음)."),
    (Measure::EyeLevel, Status::Unknown, "얼굴이 잘 보이지 않습니다."),
    (Measure::ArmReach, Status::Good, "핸들과의 거리가 적절합니다."),
    (Measure::ArmReach, Status::TooClose, "시트를 뒤로 이동하세요 (핸들과 너무 가까움)."),
    (Measure::ArmReach, Status::TooFar, "시트를 앞으로 당기세요 (핸들이 너무 멂)."),
    (Measure::ArmReach, Status::Unknown, "팔이 잘 보이지 않습니다."),
];

const ENGLISH: &[Entry] = &[
    (Measure::Back, Status::Good, "Backrest angle looks good."),
    (Measure::Back, Status::TooUpright, "Recline the backrest slightly."),
    (Measure::Back, Status::TooReclined, "Raise the backrest."),
    (Measure::Back, Status::Unknown, "Upper body is not visible enough."),
    (Measure::Knee, Status::Good, "Knee angle is comfortable."),
    (Measure::Knee, Status::TooBent, "Move the seat back (knees too bent)."),
    (Measure::Knee, Status::TooStraight, "Move the seat forward (legs too straight)."),
    (Measure::Knee, Status::Unknown, "Legs are not visible enough."),
    (Measure::Hip, Status::Good, "Torso-to-thigh angle is stable."),
    (
        Measure::Hip,
        Status::TooClosed,
        "Posture is too hunched. Recline the backrest or sit further back.",
    ),
    (Measure::Hip, Status::TooOpen, "Posture is too stretched out."),
    (Measure::Hip, Status::Unknown, "Hip angle cannot be analysed."),
    (Measure::Elbow, Status::Good, "Arm angle is comfortable."),
    (Measure::Elbow, Status::TooBent, "Too close to the steering wheel."),
    (Measure::Elbow, Status::TooStraight, "Steering wheel is too far away."),
    (Measure::Elbow, Status::Unknown, "Arms are not visible enough."),
    (Measure::SeatHeight, Status::Good, "Seat height is appropriate."),
    (
        Measure::SeatHeight,
        Status::TooHigh,
        "Lower the seat so your hips sit below your knees.",
    ),
    (
        Measure::SeatHeight,
        Status::TooHighHead,
        "Not enough head room. Lower the seat.",
    ),
    (Measure::EyeLevel, Status::Good, "Eye level is appropriate."),
    (Measure::EyeLevel, Status::TooLow, "Raise the seat (eye level too low)."),
    (Measure::EyeLevel, Status::TooHigh, "Lower the seat (eye level too high)."),
    (Measure::EyeLevel, Status::Unknown, "Face is not visible enough."),
    (Measure::ArmReach, Status::Good, "Distance to the wheel is appropriate."),
    (
        Measure::ArmReach,
        Status::TooClose,
        "Move the seat back (too close to the wheel).",
    ),
    (
        Measure::ArmReach,
        Status::TooFar,
        "Move the seat forward (wheel too far away).",
    ),
    (Measure::ArmReach, Status::Unknown, "Arms are not visible enough."),
];

/// Language-specific lookup from (measure, status) to advice text.
#[derive(Debug, Clone, Copy)]
pub struct Phrasebook {
    entries: &'static [Entry],
    fallback: &'static str,
}

impl Phrasebook {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Korean => Self {
                entries: KOREAN,
                fallback: "분석 불가",
            },
            Language::English => Self {
                entries: ENGLISH,
                fallback: "Cannot be analysed.",
            },
        }
    }

    /// Falls back to a generic "cannot analyse" text for pairs the
    /// classifier never produces.
    pub fn phrase(&self, measure: Measure, status: Status) -> &'static str {
        self.entries
            .iter()
            .find(|(m, s, _)| *m == measure && *s == status)
            .map(|(_, _, text)| *text)
            .unwrap_or(self.fallback)
    }
}

impl Default for Phrasebook {
    fn default() -> Self {
        Self::for_language(Language::default())
    }
}
