//! Curve - Level-indexed lookup with linear interpolation
//!
//! Keys are `(level, value)` pairs with strictly increasing levels.
//! Between keys the value is interpolated linearly; outside the key range
//! the nearest end key is used.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a set of keys cannot form a curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("curve has no keys")]
    Empty,
    #[error("curve key {index} is not finite")]
    NonFinite { index: usize },
    #[error("curve key {index} does not have a higher level than the key before it")]
    Unsorted { index: usize },
}

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub level: f64,
    pub value: f64,
}

impl CurveKey {
    pub fn new(level: f64, value: f64) -> Self {
        CurveKey { level, value }
    }
}

/// Non-empty, level-sorted curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    pub fn new(keys: Vec<CurveKey>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::Empty);
        }
        for (index, key) in keys.iter().enumerate() {
            if !key.level.is_finite() || !key.value.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if index > 0 && key.level <= keys[index - 1].level {
                return Err(CurveError::Unsorted { index });
            }
        }
        Ok(Curve { keys })
    }

    /// Build a curve from `(level, value)` pairs
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, CurveError> {
        Curve::new(points.iter().map(|&(level, value)| CurveKey::new(level, value)).collect())
    }

    /// A curve that returns `value` at every level
    pub fn constant(value: f64) -> Self {
        Curve {
            keys: vec![CurveKey::new(1.0, value)],
        }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn eval(&self, level: f64) -> f64 {
        // `new` guarantees at least one key
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];

        if level <= first.level {
            return first.value;
        }
        if level >= last.level {
            return last.value;
        }

        // First key strictly above `level`; exists because level < last.level
        let upper = self.keys.partition_point(|k| k.level <= level);
        let lo = self.keys[upper - 1];
        let hi = self.keys[upper];
        let t = (level - lo.level) / (hi.level - lo.level);
        lo.value + (hi.value - lo.value) * t
    }
}

impl TryFrom<Vec<CurveKey>> for Curve {
    type Error = CurveError;

    fn try_from(keys: Vec<CurveKey>) -> Result<Self, Self::Error> {
        Curve::new(keys)
    }
}

impl From<Curve> for Vec<CurveKey> {
    fn from(curve: Curve) -> Self {
        curve.keys
    }
}
