//! Damage types and their resistance bindings

use crate::attributes::Attribute;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Elemental/physical damage carried by an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Fire,
    Lightning,
    Arcane,
    Physical,
}

impl DamageType {
    pub const ALL: [DamageType; 4] = [
        DamageType::Fire,
        DamageType::Lightning,
        DamageType::Arcane,
        DamageType::Physical,
    ];

    /// Resistance attribute bound to this damage type
    pub fn resistance(self) -> Attribute {
        match self {
            DamageType::Fire => Attribute::FireResistance,
            DamageType::Lightning => Attribute::LightningResistance,
            DamageType::Arcane => Attribute::ArcaneResistance,
            DamageType::Physical => Attribute::PhysicalResistance,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            DamageType::Fire => "Damage.Fire",
            DamageType::Lightning => "Damage.Lightning",
            DamageType::Arcane => "Damage.Arcane",
            DamageType::Physical => "Damage.Physical",
        }
    }
}

impl fmt::Display for DamageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raw per-type damage assigned by the ability that applies an effect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetByCallerMagnitudes(BTreeMap<DamageType, f64>);

impl SetByCallerMagnitudes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the magnitude for a damage type, replacing any previous value
    pub fn set(&mut self, damage_type: DamageType, magnitude: f64) {
        self.0.insert(damage_type, magnitude);
    }

    pub fn with(mut self, damage_type: DamageType, magnitude: f64) -> Self {
        self.set(damage_type, magnitude);
        self
    }

    /// Magnitude for `damage_type`, 0 if the caller never assigned one
    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.0.get(&damage_type).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DamageType, f64)> + '_ {
        self.0.iter().map(|(&damage_type, &magnitude)| (damage_type, magnitude))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of raw magnitudes before any resistance
    pub fn total_raw(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(DamageType, f64)> for SetByCallerMagnitudes {
    fn from_iter<I: IntoIterator<Item = (DamageType, f64)>>(iter: I) -> Self {
        SetByCallerMagnitudes(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistances_are_distinct() {
        let mut resistances: Vec<Attribute> = DamageType::ALL.iter().map(|d| d.resistance()).collect();
        resistances.sort();
        resistances.dedup();
        assert_eq!(resistances.len(), 4);
    }

    #[test]
    fn test_missing_magnitude_is_zero() {
        let magnitudes = SetByCallerMagnitudes::new().with(DamageType::Fire, 20.0);
        assert!((magnitudes.get(DamageType::Fire) - 20.0).abs() < f64::EPSILON);
        assert!((magnitudes.get(DamageType::Arcane) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_replaces() {
        let mut magnitudes = SetByCallerMagnitudes::new();
        magnitudes.set(DamageType::Physical, 10.0);
        magnitudes.set(DamageType::Physical, 15.0);
        assert!((magnitudes.total_raw() - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_from_toml() {
        let magnitudes: SetByCallerMagnitudes = toml::from_str("fire = 12.5\nphysical = 4").unwrap();
        assert!((magnitudes.get(DamageType::Fire) - 12.5).abs() < f64::EPSILON);
        assert!((magnitudes.get(DamageType::Physical) - 4.0).abs() < f64::EPSILON);
    }
}
