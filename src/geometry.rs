//! Planar angle helpers shared by every posture measurement.
//!
//! Both functions treat an absent point as "indeterminate" and return `0.0`
//! instead of failing. Callers that need to tell a real zero apart from a
//! missing joint must check the joint's presence themselves.

use serde::{Deserialize, Serialize};

/// Offset used to build the virtual point straight above the tilt origin.
/// Any positive length gives the same angle.
const VERTICAL_PROBE: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Unsigned angle in degrees at vertex `b` between rays `b→a` and `b→c`.
///
/// The result lies in `[0, 180]` and is symmetric in `a` and `c`. A
/// zero-length ray contributes a direction of 0 rad (`atan2(0, 0)`), so the
/// result is still a finite number.
pub fn angle_between(
    a: impl Into<Option<Point2>>,
    b: impl Into<Option<Point2>>,
    c: impl Into<Option<Point2>>,
) -> f32 {
    let (Some(a), Some(b), Some(c)) = (a.into(), b.into(), c.into()) else {
        return 0.0;
    };

    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

/// Lean of the segment `bottom→top` away from straight up, in degrees.
///
/// Image y grows downward, so "up" is negative y. Forward and backward lean
/// give the same magnitude.
pub fn vertical_tilt(top: impl Into<Option<Point2>>, bottom: impl Into<Option<Point2>>) -> f32 {
    let Some(bottom) = bottom.into() else {
        return 0.0;
    };
    let virtual_top = Point2::new(bottom.x, bottom.y - VERTICAL_PROBE);
    angle_between(top, bottom, virtual_top)
}
