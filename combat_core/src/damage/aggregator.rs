//! Damage type aggregation - per-type damage reduced by matching resistance

use super::types::{DamageType, SetByCallerMagnitudes};
use crate::snapshot::CombatantSnapshot;
use serde::{Deserialize, Serialize};

/// Highest resistance that counts; 100 means immunity
pub const MAX_RESISTANCE: f64 = 100.0;

/// Damage after resistance: `raw × (100 − r) / 100` with `r` clamped to `[0, 100]`
pub fn resist_adjusted(raw: f64, resistance: f64) -> f64 {
    let resistance = resistance.clamp(0.0, MAX_RESISTANCE);
    raw * (MAX_RESISTANCE - resistance) / MAX_RESISTANCE
}

/// One damage type's contribution to the pre-mitigation total
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypedDamage {
    pub damage_type: DamageType,
    pub raw: f64,
    /// Target resistance after clamping
    pub resistance: f64,
    pub adjusted: f64,
}

impl TypedDamage {
    pub fn resisted(&self) -> f64 {
        self.raw - self.adjusted
    }
}

/// Sum of all damage types after resistances
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDamage {
    pub per_type: Vec<TypedDamage>,
    pub total: f64,
}

impl AggregatedDamage {
    pub fn of_type(&self, damage_type: DamageType) -> Option<&TypedDamage> {
        self.per_type.iter().find(|d| d.damage_type == damage_type)
    }
}

/// Reduce every caller-supplied magnitude by the target's matching resistance and sum them
pub fn aggregate_damage(
    magnitudes: &SetByCallerMagnitudes,
    target: &CombatantSnapshot,
) -> AggregatedDamage {
    let mut aggregated = AggregatedDamage::default();

    for (damage_type, raw) in magnitudes.iter() {
        let resistance = target.resistance(damage_type).clamp(0.0, MAX_RESISTANCE);
        let adjusted = resist_adjusted(raw, resistance);

        aggregated.per_type.push(TypedDamage {
            damage_type,
            raw,
            resistance,
            adjusted,
        });
        aggregated.total += adjusted;
    }

    aggregated
}
