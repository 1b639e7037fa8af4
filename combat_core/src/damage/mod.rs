//! Damage pipeline - resistance aggregation and mitigation

mod aggregator;
mod execution;
mod mitigation;
mod types;

pub use aggregator::{aggregate_damage, resist_adjusted, AggregatedDamage, TypedDamage, MAX_RESISTANCE};
pub use execution::{DamageBreakdown, DamageExecution, DamageOutcome, DamageRolls};
pub use mitigation::{
    apply_armor, apply_block, apply_critical, effective_armor, effective_critical_hit_chance,
    roll_succeeds, ArmorStage, BlockStage, CriticalStage, ROLL_MAX, ROLL_MIN,
};
pub use types::{DamageType, SetByCallerMagnitudes};
