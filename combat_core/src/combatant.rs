//! Combatant - an attribute set with identity, team, tags and active effects

use crate::attributes::{Attribute, AttributeChange, AttributeFormulas, AttributeSet, EvaluateParams, ModifierOp};
use crate::config::ClassInfo;
use crate::effect::{ActiveEffect, ActiveEffectHandle, ActiveEffects, EffectApplication, EffectError, GameplayEffect};
use crate::snapshot::{CaptureSide, CombatantSnapshot};
use crate::types::{CharacterClass, TagContainer, Team};
use serde::{Deserialize, Serialize};

/// What one call to [`Combatant::tick`] changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickResult {
    pub expired: Vec<ActiveEffect>,
    pub health_regenerated: f64,
    pub mana_regenerated: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub class: CharacterClass,
    pub level: u32,
    pub team: Team,
    /// Tags the combatant owns regardless of active effects
    #[serde(default)]
    pub tags: TagContainer,
    attributes: AttributeSet,
    #[serde(default)]
    active_effects: ActiveEffects,
}

impl Combatant {
    pub fn new(
        id: impl Into<String>,
        class: CharacterClass,
        team: Team,
        level: u32,
        attributes: AttributeSet,
    ) -> Self {
        Combatant {
            id: id.into(),
            class,
            level,
            team,
            tags: TagContainer::new(),
            attributes,
            active_effects: ActiveEffects::new(),
        }
    }

    /// Combatant with its class's starting attributes at `level`, vitals full
    pub fn from_class(
        id: impl Into<String>,
        class: CharacterClass,
        team: Team,
        level: u32,
        classes: &ClassInfo,
        formulas: &AttributeFormulas,
    ) -> Self {
        let attributes = classes.initialize_attributes(class, level, formulas);
        Combatant::new(id, class, team, level, attributes)
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn active_effects(&self) -> &ActiveEffects {
        &self.active_effects
    }

    pub fn is_alive(&self) -> bool {
        self.attributes.is_alive()
    }

    /// Base tags, the team tag and tags granted by active effects
    pub fn owned_tags(&self) -> TagContainer {
        let mut tags = self.tags.clone();
        tags.insert(self.team.tag());
        for tag in self.active_effects.granted_tags().iter() {
            tags.insert(tag.clone());
        }
        tags
    }

    /// Players and enemies are hostile to each other; teammates are not
    pub fn is_hostile_to(&self, other: &Combatant) -> bool {
        self.team != other.team
    }

    /// Apply an effect whose source owns `source_tags`
    pub fn apply_effect(
        &mut self,
        effect: &GameplayEffect,
        level: u32,
        source_tags: &TagContainer,
    ) -> Result<EffectApplication, EffectError> {
        let target_tags = self.owned_tags();
        let params = EvaluateParams::new(source_tags, &target_tags);
        self.active_effects.apply(effect, level, &mut self.attributes, &params)
    }

    /// Apply an effect this combatant is both source and target of
    pub fn apply_effect_to_self(
        &mut self,
        effect: &GameplayEffect,
        level: u32,
    ) -> Result<EffectApplication, EffectError> {
        let tags = self.owned_tags();
        let params = EvaluateParams::new(&tags, &tags);
        self.active_effects.apply(effect, level, &mut self.attributes, &params)
    }

    pub fn remove_effect(&mut self, handle: ActiveEffectHandle) -> Result<ActiveEffect, EffectError> {
        self.active_effects.remove(handle, &mut self.attributes)
    }

    /// Advance time: expire duration effects, then regenerate health and mana
    pub fn tick(&mut self, delta: f64) -> TickResult {
        let expired = self.active_effects.tick(delta, &mut self.attributes);

        if !self.is_alive() || delta <= 0.0 {
            return TickResult {
                expired,
                ..Default::default()
            };
        }

        let health_rate = self.attributes.current(Attribute::HealthRegeneration).max(0.0);
        let mana_rate = self.attributes.current(Attribute::ManaRegeneration).max(0.0);
        let health = self
            .attributes
            .apply_instant(Attribute::Health, ModifierOp::Add, health_rate * delta);
        let mana = self
            .attributes
            .apply_instant(Attribute::Mana, ModifierOp::Add, mana_rate * delta);

        TickResult {
            expired,
            health_regenerated: health.delta(),
            mana_regenerated: mana.delta(),
        }
    }

    /// Capture the attributes this combatant contributes on `side`
    pub fn snapshot(&self, side: CaptureSide, params: &EvaluateParams<'_>) -> CombatantSnapshot {
        CombatantSnapshot::capture(&self.attributes, self.level, side, params)
    }

    /// Route resolved damage through the `IncomingDamage` meta attribute
    pub(crate) fn receive_damage(&mut self, damage: f64) -> AttributeChange {
        self.attributes.apply_incoming_damage(damage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectModifierSpec;

    fn fighter(team: Team) -> Combatant {
        let attributes = AttributeSet::new()
            .with_base(Attribute::MaxHealth, 100.0)
            .with_base(Attribute::Health, 60.0)
            .with_base(Attribute::MaxMana, 40.0)
            .with_base(Attribute::Mana, 10.0)
            .with_base(Attribute::HealthRegeneration, 2.0)
            .with_base(Attribute::ManaRegeneration, 5.0);
        Combatant::new("fighter", CharacterClass::Warrior, team, 3, attributes)
    }

    #[test]
    fn test_hostility() {
        let player = fighter(Team::Player);
        let ally = fighter(Team::Player);
        let enemy = fighter(Team::Enemy);
        assert!(player.is_hostile_to(&enemy));
        assert!(enemy.is_hostile_to(&player));
        assert!(!player.is_hostile_to(&ally));
    }

    #[test]
    fn test_owned_tags_include_team_and_effects() {
        let mut player = fighter(Team::Player).with_tag("Class.Warrior");
        player
            .apply_effect_to_self(&GameplayEffect::infinite("Enrage").with_granted_tag("Buff.Enrage"), 1)
            .unwrap();

        let tags = player.owned_tags();
        assert!(tags.has_tag(&"Player".into()));
        assert!(tags.has_tag(&"Class.Warrior".into()));
        assert!(tags.has_tag(&"Buff".into()));
        assert!(!tags.has_tag(&"Enemy".into()));
    }

    #[test]
    fn test_tick_regenerates_up_to_max() {
        let mut combatant = fighter(Team::Player);
        let result = combatant.tick(2.0);
        assert!((result.health_regenerated - 4.0).abs() < f64::EPSILON);
        assert!((result.mana_regenerated - 10.0).abs() < f64::EPSILON);

        let result = combatant.tick(100.0);
        assert!((combatant.attributes().health() - 100.0).abs() < f64::EPSILON);
        assert!((combatant.attributes().mana() - 40.0).abs() < f64::EPSILON);
        assert!((result.mana_regenerated - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_dead_combatant_does_not_regenerate() {
        let mut combatant = fighter(Team::Enemy);
        combatant.receive_damage(500.0);
        assert!(!combatant.is_alive());
        let result = combatant.tick(10.0);
        assert!((result.health_regenerated - 0.0).abs() < f64::EPSILON);
        assert!(!combatant.is_alive());
    }

    #[test]
    fn test_tick_expires_effects() {
        let mut combatant = fighter(Team::Player);
        let haste = GameplayEffect::with_duration("Haste", 1.5)
            .with_modifier(EffectModifierSpec::new(Attribute::Armor, ModifierOp::Add, 5.0));
        let handle = match combatant.apply_effect_to_self(&haste, 1).unwrap() {
            EffectApplication::Active(handle) => handle,
            other => panic!("expected active effect, got {other:?}"),
        };

        let result = combatant.tick(2.0);
        assert_eq!(result.expired.len(), 1);
        assert!(combatant.remove_effect(handle).is_err());
        assert!((combatant.attributes().current(Attribute::Armor) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snapshot_reads_level() {
        let combatant = fighter(Team::Player);
        let snapshot = combatant.snapshot(CaptureSide::Target, &EvaluateParams::default());
        assert_eq!(snapshot.level(), 3);
    }
}
