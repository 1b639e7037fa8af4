//! CombatResult - Outcome of damage resolution

use crate::damage::{DamageOutcome, DamageType, TypedDamage};
use crate::effect::EffectContext;
use serde::{Deserialize, Serialize};

/// Result of applying a damage effect spec to a combatant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatResult {
    /// Pipeline output with the per-stage breakdown
    pub outcome: DamageOutcome,
    /// Effect context with the hit flags filled in
    pub context: EffectContext,

    // === State Changes ===
    pub health_before: f64,
    pub health_after: f64,

    /// Whether this hit took the target from alive to dead
    pub is_killing_blow: bool,
}

impl CombatResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Final damage after every mitigation stage
    pub fn total_damage(&self) -> f64 {
        self.outcome.damage
    }

    /// Health the target actually lost, which may be less than the damage
    pub fn health_lost(&self) -> f64 {
        self.health_before - self.health_after
    }

    pub fn total_raw_damage(&self) -> f64 {
        self.outcome.breakdown.aggregated.per_type.iter().map(|d| d.raw).sum()
    }

    pub fn damage_reduced_by_resists(&self) -> f64 {
        self.outcome.breakdown.aggregated.per_type.iter().map(|d| d.resisted()).sum()
    }

    pub fn damage_of_type(&self, damage_type: DamageType) -> Option<&TypedDamage> {
        self.outcome.breakdown.aggregated.of_type(damage_type)
    }

    pub fn is_blocked_hit(&self) -> bool {
        self.context.is_blocked_hit()
    }

    pub fn is_critical_hit(&self) -> bool {
        self.context.is_critical_hit()
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.total_damage() > 0.0 {
            parts.push(format!("{:.0} damage taken", self.total_damage()));
        }

        let resisted = self.damage_reduced_by_resists();
        if resisted > 0.0 {
            parts.push(format!("{:.0} resisted", resisted));
        }

        let armor = self.outcome.reduced_by_armor();
        if armor > 0.0 {
            parts.push(format!("{:.0} reduced by armor", armor));
        }

        if self.is_blocked_hit() {
            parts.push("BLOCKED".to_string());
        }

        if self.is_critical_hit() {
            parts.push("CRITICAL".to_string());
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        if parts.is_empty() {
            "No damage".to_string()
        } else {
            parts.join(", ")
        }
    }
}
