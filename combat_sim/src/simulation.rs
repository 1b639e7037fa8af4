//! Duel simulation utilities

use combat_core::{
    ability::{AbilityError, DamageAbility},
    combat::resolve_damage_with_rng,
    combatant::Combatant,
    config::ClassInfo,
};
use rand::Rng;
use serde::Serialize;

/// Seconds between two activations of the attacker's ability
pub const ATTACK_INTERVAL: f64 = 1.0;

/// Run one attacker against one defender with a single ability
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DuelSimulation {
    /// Activations that landed a hit
    pub hit_count: u32,
    pub block_count: u32,
    pub crit_count: u32,
    /// Activations skipped for lack of mana
    pub out_of_mana: u32,
    pub total_damage: f64,
    /// Health the defender actually lost
    pub health_lost: f64,
    /// Hit number (1-based) on which the defender died
    pub killed_on_hit: Option<u32>,
    /// Defender health when the duel ended, regeneration included
    pub defender_health_after: f64,
}

impl DuelSimulation {
    /// Simulate up to `attempts` activations, stopping once the defender dies
    ///
    /// Both combatants tick `ATTACK_INTERVAL` seconds before each
    /// activation, so duration effects expire and vitals regenerate.
    pub fn run(
        attacker: &Combatant,
        defender: &Combatant,
        ability: &DamageAbility,
        level: u32,
        attempts: u32,
        classes: &ClassInfo,
        rng: &mut impl Rng,
    ) -> Self {
        let mut attacker = attacker.clone();
        let mut defender = defender.clone();
        let mut result = DuelSimulation {
            defender_health_after: defender.attributes().health(),
            ..DuelSimulation::default()
        };

        for attempt in 1..=attempts {
            if !defender.is_alive() {
                break;
            }
            if attempt > 1 {
                attacker.tick(ATTACK_INTERVAL);
                defender.tick(ATTACK_INTERVAL);
            }

            let spec = match ability.activate(&mut attacker, level) {
                Ok(spec) => spec,
                Err(AbilityError::InsufficientMana { .. }) => {
                    result.out_of_mana += 1;
                    continue;
                }
                Err(err) => {
                    tracing::warn!(%err, "attacker cannot act, ending duel");
                    break;
                }
            };

            let (new_defender, combat_result) =
                resolve_damage_with_rng(&attacker, &defender, &spec, classes, rng);
            defender = new_defender;

            result.hit_count += 1;
            if combat_result.is_blocked_hit() {
                result.block_count += 1;
            }
            if combat_result.is_critical_hit() {
                result.crit_count += 1;
            }
            result.total_damage += combat_result.total_damage();
            result.health_lost += combat_result.health_lost();

            tracing::info!(
                hit = result.hit_count,
                health = combat_result.health_after,
                "{}",
                combat_result.summary()
            );

            if combat_result.is_killing_blow {
                result.killed_on_hit = Some(result.hit_count);
            }
        }

        result.defender_health_after = defender.attributes().health();
        result
    }

    /// Calculate block rate
    pub fn block_rate(&self) -> f64 {
        if self.hit_count > 0 {
            self.block_count as f64 / self.hit_count as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Calculate crit rate
    pub fn crit_rate(&self) -> f64 {
        if self.hit_count > 0 {
            self.crit_count as f64 / self.hit_count as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Calculate average damage per hit
    pub fn avg_damage(&self) -> f64 {
        if self.hit_count > 0 {
            self.total_damage / self.hit_count as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{
        attributes::{Attribute, AttributeSet},
        damage::DamageType,
        types::{CharacterClass, Team},
        AbilityKind,
    };
    use rand::SeedableRng;

    fn dummy(health: f64) -> Combatant {
        let attributes = AttributeSet::new()
            .with_base(Attribute::MaxHealth, health)
            .with_base(Attribute::Health, health);
        Combatant::new("dummy", CharacterClass::Warrior, Team::Enemy, 1, attributes)
    }

    fn hero(mana: f64) -> Combatant {
        let attributes = AttributeSet::new()
            .with_base(Attribute::MaxHealth, 100.0)
            .with_base(Attribute::Health, 100.0)
            .with_base(Attribute::MaxMana, mana)
            .with_base(Attribute::Mana, mana);
        Combatant::new("hero", CharacterClass::Elementalist, Team::Player, 1, attributes)
    }

    #[test]
    fn test_duel_simulation() {
        let ability = DamageAbility::basic_attack();
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        let result = DuelSimulation::run(
            &hero(0.0),
            &dummy(10_000.0),
            &ability,
            1,
            10,
            &ClassInfo::default(),
            &mut rng,
        );

        assert_eq!(result.hit_count, 10);
        assert_eq!(result.block_count, 0);
        assert_eq!(result.crit_count, 0);
        assert!((result.avg_damage() - 10.0).abs() < 1e-9);
        assert!(result.killed_on_hit.is_none());
    }

    #[test]
    fn test_duel_stops_at_kill() {
        let ability = DamageAbility::basic_attack();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);

        let result = DuelSimulation::run(&hero(0.0), &dummy(35.0), &ability, 1, 10, &ClassInfo::default(), &mut rng);

        assert_eq!(result.killed_on_hit, Some(4));
        assert_eq!(result.hit_count, 4);
        assert!((result.health_lost - 35.0).abs() < 1e-9);
        assert!((result.total_damage - 40.0).abs() < 1e-9);
        assert!((result.defender_health_after - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_regeneration_counts_toward_remaining_health() {
        let ability = DamageAbility::basic_attack();
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        let attributes = AttributeSet::new()
            .with_base(Attribute::MaxHealth, 1_000.0)
            .with_base(Attribute::Health, 1_000.0)
            .with_base(Attribute::HealthRegeneration, 4.0);
        let troll = Combatant::new("troll", CharacterClass::Warrior, Team::Enemy, 1, attributes);

        let result = DuelSimulation::run(&hero(0.0), &troll, &ability, 1, 5, &ClassInfo::default(), &mut rng);

        // Five hits of 10; four regeneration ticks of 4 land after the first hit
        assert_eq!(result.hit_count, 5);
        assert!((result.health_lost - 50.0).abs() < 1e-9);
        assert!((result.defender_health_after - 966.0).abs() < 1e-9);
        assert!(result.defender_health_after > 1_000.0 - result.health_lost);
    }

    #[test]
    fn test_mana_runs_out() {
        let ability = DamageAbility::new("zap", "Zap", AbilityKind::Projectile)
            .with_damage(DamageType::Lightning, 5.0)
            .with_mana_cost(10.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);

        let result = DuelSimulation::run(&hero(25.0), &dummy(1_000.0), &ability, 1, 5, &ClassInfo::default(), &mut rng);

        assert_eq!(result.hit_count, 2);
        assert_eq!(result.out_of_mana, 3);
    }
}
