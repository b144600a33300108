//! Force curves
//!
//! Keyframed scalar curves sampled by time. The jump sequencer samples one
//! every airborne frame to get the upward force for that instant.
//!
//! Between two keys the curve is a cubic Hermite spline using the left key's
//! out-tangent and the right key's in-tangent. Outside the keyed range the
//! curve holds the first/last value.
//!
//! # Example
//!
//! ```rust,ignore
//! use player_move_engine::curve::{Curve, ForceCurve};
//!
//! let curve = ForceCurve::linear(0.0, 1.0, 0.5, 0.0);
//! assert_eq!(curve.evaluate(0.25), 0.5);
//! assert_eq!(curve.evaluate(2.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Anything that maps elapsed time to a scalar.
pub trait Curve {
    fn evaluate(&self, time: f32) -> f32;
}

impl<F: Fn(f32) -> f32> Curve for F {
    fn evaluate(&self, time: f32) -> f32 {
        self(time)
    }
}

/// One control point of a [`ForceCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    /// Slope arriving at this key
    #[serde(default)]
    pub in_tangent: f32,
    /// Slope leaving this key
    #[serde(default)]
    pub out_tangent: f32,
}

impl Keyframe {
    /// Key with flat tangents.
    pub fn new(time: f32, value: f32) -> Self {
        Self::with_tangents(time, value, 0.0, 0.0)
    }

    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
        }
    }

    fn is_finite(&self) -> bool {
        self.time.is_finite()
            && self.value.is_finite()
            && self.in_tangent.is_finite()
            && self.out_tangent.is_finite()
    }
}

/// Keyframed Hermite curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceCurve {
    pub keys: Vec<Keyframe>,
}

impl Default for ForceCurve {
    /// Jump falloff: full force at take-off easing to nothing at 0.5s.
    fn default() -> Self {
        Self::new(vec![Keyframe::new(0.0, 1.0), Keyframe::new(0.5, 0.0)])
    }
}

impl ForceCurve {
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self { keys }
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        let slope = if t1 != t0 { (v1 - v0) / (t1 - t0) } else { 0.0 };
        Self::new(vec![
            Keyframe::with_tangents(t0, v0, slope, slope),
            Keyframe::with_tangents(t1, v1, slope, slope),
        ])
    }

    /// Same value at every time.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![Keyframe::new(0.0, value)])
    }

    /// Curve that is zero everywhere.
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    /// Time of the last key, or 0 for an empty curve.
    pub fn duration(&self) -> f32 {
        self.keys.last().map_or(0.0, |k| k.time)
    }

    /// Checks that keys exist, are finite, and strictly increase in time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keys.is_empty() {
            return Err(ConfigError::EmptyCurve);
        }
        for (index, key) in self.keys.iter().enumerate() {
            if !key.is_finite() {
                return Err(ConfigError::NonFiniteCurve { index });
            }
            if index > 0 && key.time <= self.keys[index - 1].time {
                return Err(ConfigError::UnorderedCurve { index });
            }
        }
        Ok(())
    }
}

impl Curve for ForceCurve {
    fn evaluate(&self, time: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };

        if time.is_nan() || time <= first.time {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }

        // First key strictly after `time`; both neighbors exist here
        let upper = self.keys.partition_point(|k| k.time <= time);
        let k0 = &self.keys[upper - 1];
        let k1 = &self.keys[upper];
        hermite(k0, k1, time)
    }
}

fn hermite(k0: &Keyframe, k1: &Keyframe, time: f32) -> f32 {
    let span = k1.time - k0.time;
    if span <= 0.0 {
        return k1.value;
    }

    let s = (time - k0.time) / span;
    let s2 = s * s;
    let s3 = s2 * s;

    let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
    let h10 = s3 - 2.0 * s2 + s;
    let h01 = -2.0 * s3 + 3.0 * s2;
    let h11 = s3 - s2;

    h00 * k0.value + h10 * span * k0.out_tangent + h01 * k1.value + h11 * span * k1.in_tangent
}
