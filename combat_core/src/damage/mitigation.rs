//! Mitigation stages - block, armor, critical hit
//!
//! Stages run in that order on the aggregated damage. Block and critical
//! each consume one roll in `[1, 100]` and succeed only when the roll is
//! strictly below the chance, so a chance of exactly 100 still fails on a
//! roll of 100.
//!
//! Formulas:
//! - block: `damage / 2` on success
//! - armor: `effective = armor × (100 − pen × pen_coeff) / 100`,
//!   `damage × (100 − effective × armor_coeff) / 100`
//! - critical: `chance − resistance × res_coeff`; `damage × 2 + bonus` on success

use serde::{Deserialize, Serialize};

/// Lowest value of a percentage roll
pub const ROLL_MIN: u32 = 1;
/// Highest value of a percentage roll
pub const ROLL_MAX: u32 = 100;

/// Strict `roll < chance` test shared by block and critical
pub fn roll_succeeds(roll: u32, chance: f64) -> bool {
    (roll as f64) < chance
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockStage {
    pub block_chance: f64,
    pub roll: u32,
    pub blocked: bool,
    pub damage_after: f64,
}

/// Halve `damage` if the roll lands under the target's block chance
pub fn apply_block(damage: f64, block_chance: f64, roll: u32) -> BlockStage {
    let blocked = roll_succeeds(roll, block_chance);
    BlockStage {
        block_chance,
        roll,
        blocked,
        damage_after: if blocked { damage / 2.0 } else { damage },
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ArmorStage {
    pub armor: f64,
    pub armor_penetration: f64,
    pub penetration_coefficient: f64,
    pub effective_armor_coefficient: f64,
    pub effective_armor: f64,
    pub damage_after: f64,
}

/// Target armor left after the source's penetration
pub fn effective_armor(armor: f64, armor_penetration: f64, penetration_coefficient: f64) -> f64 {
    armor * (100.0 - armor_penetration * penetration_coefficient) / 100.0
}

/// Reduce `damage` by the armor penetration leaves behind
pub fn apply_armor(
    damage: f64,
    armor: f64,
    armor_penetration: f64,
    penetration_coefficient: f64,
    effective_armor_coefficient: f64,
) -> ArmorStage {
    let effective = effective_armor(armor, armor_penetration, penetration_coefficient);
    ArmorStage {
        armor,
        armor_penetration,
        penetration_coefficient,
        effective_armor_coefficient,
        effective_armor: effective,
        damage_after: damage * (100.0 - effective * effective_armor_coefficient) / 100.0,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CriticalStage {
    /// May be negative, in which case no roll can crit
    pub effective_chance: f64,
    pub bonus_damage: f64,
    pub roll: u32,
    pub critical: bool,
    pub damage_after: f64,
}

/// Source crit chance minus the target's scaled crit resistance
pub fn effective_critical_hit_chance(
    critical_hit_chance: f64,
    critical_hit_resistance: f64,
    resistance_coefficient: f64,
) -> f64 {
    critical_hit_chance - critical_hit_resistance * resistance_coefficient
}

/// Double `damage` and add the crit bonus if the roll lands under the effective chance
pub fn apply_critical(
    damage: f64,
    critical_hit_chance: f64,
    critical_hit_resistance: f64,
    resistance_coefficient: f64,
    bonus_damage: f64,
    roll: u32,
) -> CriticalStage {
    let effective_chance =
        effective_critical_hit_chance(critical_hit_chance, critical_hit_resistance, resistance_coefficient);
    let critical = roll_succeeds(roll, effective_chance);
    CriticalStage {
        effective_chance,
        bonus_damage,
        roll,
        critical,
        damage_after: if critical { damage * 2.0 + bonus_damage } else { damage },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_block_boundary_is_strict() {
        let at = apply_block(100.0, 50.0, 50);
        assert!(!at.blocked);
        assert!((at.damage_after - 100.0).abs() < f64::EPSILON);

        let under = apply_block(100.0, 50.0, 49);
        assert!(under.blocked);
        assert!((under.damage_after - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_block_chance_misses_on_max_roll() {
        assert!(!apply_block(100.0, 100.0, ROLL_MAX).blocked);
        assert!(apply_block(100.0, 100.0, ROLL_MAX - 1).blocked);
    }

    #[test]
    fn test_zero_block_never_blocks() {
        for roll in ROLL_MIN..=ROLL_MAX {
            assert!(!apply_block(10.0, 0.0, roll).blocked);
        }
    }

    #[test]
    fn test_armor_reduction() {
        // effective = 50 * (100 - 20 * 0.5) / 100 = 45
        // damage = 100 * (100 - 45 * 0.4) / 100 = 82
        let stage = apply_armor(100.0, 50.0, 20.0, 0.5, 0.4);
        assert!((stage.effective_armor - 45.0).abs() < 1e-9);
        assert!((stage.damage_after - 82.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_armor_no_reduction() {
        let stage = apply_armor(100.0, 0.0, 30.0, 0.25, 0.333);
        assert!((stage.damage_after - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_critical_doubles_and_adds_bonus() {
        // chance = 30 - 20 * 0.5 = 20, roll 5 crits: 40 * 2 + 12 = 92
        let stage = apply_critical(40.0, 30.0, 20.0, 0.5, 12.0, 5);
        assert!((stage.effective_chance - 20.0).abs() < 1e-9);
        assert!(stage.critical);
        assert!((stage.damage_after - 92.0).abs() < 1e-9);
    }

    #[test]
    fn test_critical_boundary_is_strict() {
        let stage = apply_critical(40.0, 20.0, 0.0, 0.0, 0.0, 20);
        assert!(!stage.critical);
        assert!((stage.damage_after - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_negative_effective_chance_never_crits() {
        for roll in ROLL_MIN..=ROLL_MAX {
            let stage = apply_critical(40.0, 5.0, 100.0, 0.25, 50.0, roll);
            assert!(stage.effective_chance < 0.0);
            assert!(!stage.critical);
        }
    }

    proptest! {
        #[test]
        fn prop_penetration_never_raises_armor(
            armor in 0.0f64..10_000.0,
            pen in 0.0f64..1_000.0,
            coeff in 0.0f64..=1.0,
        ) {
            prop_assert!(effective_armor(armor, pen, coeff) <= armor + 1e-9);
        }

        #[test]
        fn prop_armor_never_raises_damage(
            damage in 0.0f64..10_000.0,
            armor in 0.0f64..10_000.0,
            pen in 0.0f64..100.0,
            c1 in 0.0f64..=1.0,
            c2 in 0.0f64..=1.0,
        ) {
            let stage = apply_armor(damage, armor, pen, c1, c2);
            prop_assume!(stage.effective_armor * c2 >= 0.0);
            prop_assert!(stage.damage_after <= damage + 1e-9);
        }

        #[test]
        fn prop_non_positive_crit_chance_never_crits(
            chance in 0.0f64..100.0,
            resistance in 0.0f64..1_000.0,
            coeff in 0.0f64..=1.0,
            roll in ROLL_MIN..=ROLL_MAX,
        ) {
            let stage = apply_critical(100.0, chance, resistance, coeff, 10.0, roll);
            prop_assume!(stage.effective_chance <= 0.0);
            prop_assert!(!stage.critical);
        }
    }
}
