//! ScalableFloat - a magnitude that grows with ability level

use crate::coefficients::Curve;
use serde::{Deserialize, Serialize};

/// `value × curve(level)`, or just `value` when no curve is set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalableFloat {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<Curve>,
}

impl ScalableFloat {
    pub fn new(value: f64) -> Self {
        ScalableFloat { value, curve: None }
    }

    pub fn with_curve(mut self, curve: Curve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn value_at(&self, level: u32) -> f64 {
        match &self.curve {
            Some(curve) => self.value * curve.eval(level as f64),
            None => self.value,
        }
    }
}

impl From<f64> for ScalableFloat {
    fn from(value: f64) -> Self {
        ScalableFloat::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_value() {
        let flat = ScalableFloat::new(12.0);
        assert!((flat.value_at(1) - 12.0).abs() < f64::EPSILON);
        assert!((flat.value_at(30) - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_curve_scaling() {
        let curve = Curve::from_points(&[(1.0, 1.0), (11.0, 3.0)]).unwrap();
        let scaled = ScalableFloat::new(10.0).with_curve(curve);
        assert!((scaled.value_at(1) - 10.0).abs() < 1e-9);
        assert!((scaled.value_at(6) - 20.0).abs() < 1e-9);
        assert!((scaled.value_at(40) - 30.0).abs() < 1e-9);
    }
}
