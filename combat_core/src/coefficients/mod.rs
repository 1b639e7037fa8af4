//! Damage calculation coefficients - level curves used by mitigation

mod curve;

pub use curve::{Curve, CurveError, CurveKey};

use serde::{Deserialize, Serialize};

/// The three named curves of a coefficient table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoefficientCurve {
    /// Scales how much of the target's armor the source's penetration ignores
    ArmorPenetration,
    /// Scales how much damage the remaining armor removes
    EffectiveArmor,
    /// Scales how much critical hit resistance lowers crit chance
    CriticalHitResistance,
}

impl CoefficientCurve {
    pub fn name(self) -> &'static str {
        match self {
            CoefficientCurve::ArmorPenetration => "ArmorPenetration",
            CoefficientCurve::EffectiveArmor => "EffectiveArmor",
            CoefficientCurve::CriticalHitResistance => "CriticalHitResistance",
        }
    }
}

/// Level → coefficient table for one character class
///
/// All three curves are required fields, so a table that deserializes
/// successfully can always answer every lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageCoefficients {
    pub armor_penetration: Curve,
    pub effective_armor: Curve,
    pub critical_hit_resistance: Curve,
}

impl DamageCoefficients {
    pub fn curve(&self, which: CoefficientCurve) -> &Curve {
        match which {
            CoefficientCurve::ArmorPenetration => &self.armor_penetration,
            CoefficientCurve::EffectiveArmor => &self.effective_armor,
            CoefficientCurve::CriticalHitResistance => &self.critical_hit_resistance,
        }
    }

    pub fn coefficient(&self, which: CoefficientCurve, level: u32) -> f64 {
        self.curve(which).eval(level as f64)
    }

    /// Same coefficient at every level for each curve
    pub fn flat(armor_penetration: f64, effective_armor: f64, critical_hit_resistance: f64) -> Self {
        DamageCoefficients {
            armor_penetration: Curve::constant(armor_penetration),
            effective_armor: Curve::constant(effective_armor),
            critical_hit_resistance: Curve::constant(critical_hit_resistance),
        }
    }
}

impl Default for DamageCoefficients {
    fn default() -> Self {
        let curve = |points: &[(f64, f64)]| {
            Curve::from_points(points).unwrap_or_else(|_| Curve::constant(points[0].1))
        };
        DamageCoefficients {
            armor_penetration: curve(&[(1.0, 0.25), (10.0, 0.15), (20.0, 0.085), (40.0, 0.035)]),
            effective_armor: curve(&[(1.0, 0.333), (10.0, 0.25), (20.0, 0.15), (40.0, 0.085)]),
            critical_hit_resistance: curve(&[(1.0, 0.25), (10.0, 0.15), (20.0, 0.1), (40.0, 0.05)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_coefficients_decrease_with_level() {
        let table = DamageCoefficients::default();
        for which in [
            CoefficientCurve::ArmorPenetration,
            CoefficientCurve::EffectiveArmor,
            CoefficientCurve::CriticalHitResistance,
        ] {
            let low = table.coefficient(which, 1);
            let high = table.coefficient(which, 40);
            assert!(low > high, "{} should shrink with level", which.name());
            assert!((0.0..=1.0).contains(&low));
            assert!((0.0..=1.0).contains(&high));
        }
    }

    #[test]
    fn test_flat_table() {
        let table = DamageCoefficients::flat(1.0, 0.5, 0.0);
        assert!((table.coefficient(CoefficientCurve::ArmorPenetration, 17) - 1.0).abs() < f64::EPSILON);
        assert!((table.coefficient(CoefficientCurve::EffectiveArmor, 3) - 0.5).abs() < f64::EPSILON);
        assert!((table.coefficient(CoefficientCurve::CriticalHitResistance, 9)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_requires_all_curves() {
        let missing = r#"
armor_penetration = [{ level = 1, value = 0.25 }]
effective_armor = [{ level = 1, value = 0.33 }]
"#;
        assert!(toml::from_str::<DamageCoefficients>(missing).is_err());

        let complete = r#"
armor_penetration = [{ level = 1, value = 0.25 }]
effective_armor = [{ level = 1, value = 0.33 }]
critical_hit_resistance = [{ level = 1, value = 0.25 }, { level = 10, value = 0.15 }]
"#;
        let table: DamageCoefficients = toml::from_str(complete).unwrap();
        assert!((table.coefficient(CoefficientCurve::CriticalHitResistance, 10) - 0.15).abs() < 1e-9);
    }
}
