//! Damage execution - aggregation followed by the mitigation stages
//!
//! The execution is a pure function of the two snapshots, the caller's
//! magnitudes, the coefficient table and two percentage rolls.

use super::aggregator::{aggregate_damage, AggregatedDamage};
use super::mitigation::{
    apply_armor, apply_block, apply_critical, ArmorStage, BlockStage, CriticalStage, ROLL_MAX,
    ROLL_MIN,
};
use super::types::SetByCallerMagnitudes;
use crate::coefficients::{CoefficientCurve, DamageCoefficients};
use crate::snapshot::CombatantSnapshot;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The two percentage rolls one execution consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageRolls {
    pub block: u32,
    pub critical: u32,
}

impl DamageRolls {
    pub fn new(block: u32, critical: u32) -> Self {
        DamageRolls { block, critical }
    }

    /// Draw both rolls in `[1, 100]`, block first
    pub fn roll(rng: &mut impl Rng) -> Self {
        let block = rng.gen_range(ROLL_MIN..=ROLL_MAX);
        let critical = rng.gen_range(ROLL_MIN..=ROLL_MAX);
        DamageRolls { block, critical }
    }

    /// Rolls that never block or crit
    pub fn never() -> Self {
        DamageRolls::new(ROLL_MAX, ROLL_MAX)
    }
}

/// Stage-by-stage record of one execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    pub aggregated: AggregatedDamage,
    pub block: BlockStage,
    pub armor: ArmorStage,
    pub critical: CriticalStage,
}

/// Final damage and hit flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub damage: f64,
    pub blocked: bool,
    pub critical: bool,
    pub breakdown: DamageBreakdown,
}

impl DamageOutcome {
    /// Damage before block, armor and critical
    pub fn pre_mitigation(&self) -> f64 {
        self.breakdown.aggregated.total
    }

    /// Damage removed by armor, negative if armor amplified it
    pub fn reduced_by_armor(&self) -> f64 {
        self.breakdown.block.damage_after - self.breakdown.armor.damage_after
    }
}

/// Everything one damage execution reads
#[derive(Debug, Clone, Copy)]
pub struct DamageExecution<'a> {
    pub source: &'a CombatantSnapshot,
    pub target: &'a CombatantSnapshot,
    pub magnitudes: &'a SetByCallerMagnitudes,
    /// Table of the source combatant's class
    pub coefficients: &'a DamageCoefficients,
}

impl<'a> DamageExecution<'a> {
    pub fn new(
        source: &'a CombatantSnapshot,
        target: &'a CombatantSnapshot,
        magnitudes: &'a SetByCallerMagnitudes,
        coefficients: &'a DamageCoefficients,
    ) -> Self {
        DamageExecution {
            source,
            target,
            magnitudes,
            coefficients,
        }
    }

    pub fn execute_with_rng(&self, rng: &mut impl Rng) -> DamageOutcome {
        self.execute(DamageRolls::roll(rng))
    }

    /// Run aggregation, block, armor and critical in order
    pub fn execute(&self, rolls: DamageRolls) -> DamageOutcome {
        let aggregated = aggregate_damage(self.magnitudes, self.target);
        tracing::debug!(
            total = aggregated.total,
            types = aggregated.per_type.len(),
            "aggregated damage after resistances"
        );

        let block = apply_block(aggregated.total, self.target.block_chance(), rolls.block);
        tracing::debug!(
            roll = block.roll,
            chance = block.block_chance,
            blocked = block.blocked,
            damage = block.damage_after,
            "block stage"
        );

        let penetration_coefficient = self
            .coefficients
            .coefficient(CoefficientCurve::ArmorPenetration, self.source.level());
        let effective_armor_coefficient = self
            .coefficients
            .coefficient(CoefficientCurve::EffectiveArmor, self.target.level());
        let armor = apply_armor(
            block.damage_after,
            self.target.armor(),
            self.source.armor_penetration(),
            penetration_coefficient,
            effective_armor_coefficient,
        );
        tracing::debug!(
            effective_armor = armor.effective_armor,
            damage = armor.damage_after,
            "armor stage"
        );

        let resistance_coefficient = self
            .coefficients
            .coefficient(CoefficientCurve::CriticalHitResistance, self.target.level());
        let critical = apply_critical(
            armor.damage_after,
            self.source.critical_hit_chance(),
            self.target.critical_hit_resistance(),
            resistance_coefficient,
            self.source.critical_hit_damage(),
            rolls.critical,
        );
        tracing::debug!(
            roll = critical.roll,
            chance = critical.effective_chance,
            critical = critical.critical,
            damage = critical.damage_after,
            "critical stage"
        );

        DamageOutcome {
            damage: critical.damage_after,
            blocked: block.blocked,
            critical: critical.critical,
            breakdown: DamageBreakdown {
                aggregated,
                block,
                armor,
                critical,
            },
        }
    }
}
