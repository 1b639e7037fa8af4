//! Damage resolution - Apply a DamageEffectSpec to a Combatant

use super::result::CombatResult;
use crate::attributes::EvaluateParams;
use crate::combatant::Combatant;
use crate::config::ClassInfo;
use crate::damage::{DamageExecution, DamageRolls};
use crate::effect::DamageEffectSpec;
use crate::snapshot::CaptureSide;
use rand::Rng;

/// Resolve a damage effect from `source` against `target` (immutable API)
///
/// Returns the new target state and combat result. This is the main combat
/// resolution function that:
/// 1. Captures source and target attributes under both combatants' tags,
///    counting the spec's ability tags as source tags
/// 2. Runs aggregation, block, armor and critical with the source class's coefficients
/// 3. Writes the blocked/critical flags into the effect context
/// 4. Applies the damage to the target through `IncomingDamage`
pub fn resolve_damage(
    source: &Combatant,
    target: &Combatant,
    spec: &DamageEffectSpec,
    classes: &ClassInfo,
) -> (Combatant, CombatResult) {
    let mut rng = rand::thread_rng();
    resolve_damage_with_rng(source, target, spec, classes, &mut rng)
}

/// Resolve damage with a provided RNG (for deterministic testing)
pub fn resolve_damage_with_rng(
    source: &Combatant,
    target: &Combatant,
    spec: &DamageEffectSpec,
    classes: &ClassInfo,
    rng: &mut impl Rng,
) -> (Combatant, CombatResult) {
    resolve_damage_with_rolls(source, target, spec, classes, DamageRolls::roll(rng))
}

/// Resolve damage with explicit block and critical rolls
pub fn resolve_damage_with_rolls(
    source: &Combatant,
    target: &Combatant,
    spec: &DamageEffectSpec,
    classes: &ClassInfo,
    rolls: DamageRolls,
) -> (Combatant, CombatResult) {
    let mut source_tags = source.owned_tags();
    for tag in spec.source_tags.iter() {
        source_tags.insert(tag.clone());
    }
    let target_tags = target.owned_tags();
    let params = EvaluateParams::new(&source_tags, &target_tags);

    // Captured now, not when the spec was made
    let source_snapshot = source.snapshot(CaptureSide::Source, &params);
    let target_snapshot = target.snapshot(CaptureSide::Target, &params);

    let coefficients = classes.coefficients_for(source.class);
    let outcome =
        DamageExecution::new(&source_snapshot, &target_snapshot, &spec.magnitudes, coefficients).execute(rolls);

    let mut context = spec.context.clone();
    context.set_is_blocked_hit(outcome.blocked);
    context.set_is_critical_hit(outcome.critical);

    let mut new_target = target.clone();
    let was_alive = new_target.is_alive();
    let change = new_target.receive_damage(outcome.damage);

    let result = CombatResult {
        context,
        health_before: change.before,
        health_after: change.after,
        is_killing_blow: was_alive && !new_target.is_alive(),
        outcome,
    };

    tracing::debug!(
        source = %source.id,
        target = %target.id,
        damage = result.outcome.damage,
        blocked = result.outcome.blocked,
        critical = result.outcome.critical,
        health = result.health_after,
        "damage resolved"
    );

    (new_target, result)
}
