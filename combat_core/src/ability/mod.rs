//! Damage abilities - melee and projectile attacks that build damage effect specs

use crate::attributes::{Attribute, ModifierOp};
use crate::combatant::Combatant;
use crate::damage::DamageType;
use crate::effect::{DamageEffectSpec, EffectContext, EffectError, EffectModifierSpec, GameplayEffect, ScalableFloat};
use crate::types::TagContainer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// How the ability delivers its damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityKind {
    Melee,
    Projectile,
}

/// Why an ability could not be activated
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbilityError {
    #[error("{caster} cannot act while dead")]
    CasterDead { caster: String },
    #[error("{ability} needs {required:.1} mana, {available:.1} available")]
    InsufficientMana {
        ability: String,
        required: f64,
        available: f64,
    },
    #[error(transparent)]
    Effect(#[from] EffectError),
}

/// An ability that applies a damage effect to its target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageAbility {
    pub id: String,
    pub name: String,
    pub kind: AbilityKind,
    /// Source tags while this ability's damage resolves
    #[serde(default)]
    pub tags: TagContainer,
    /// Raw damage per type, scaled by ability level
    #[serde(default)]
    pub damage: BTreeMap<DamageType, ScalableFloat>,
    #[serde(default)]
    pub mana_cost: f64,
}

impl DamageAbility {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: AbilityKind) -> Self {
        DamageAbility {
            id: id.into(),
            name: name.into(),
            kind,
            tags: TagContainer::new(),
            damage: BTreeMap::new(),
            mana_cost: 0.0,
        }
    }

    pub fn with_damage(mut self, damage_type: DamageType, magnitude: impl Into<ScalableFloat>) -> Self {
        self.damage.insert(damage_type, magnitude.into());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.insert(tag);
        self
    }

    pub fn with_mana_cost(mut self, mana_cost: f64) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    /// Plain physical melee hit
    pub fn basic_attack() -> Self {
        DamageAbility::new("basic_attack", "Basic Attack", AbilityKind::Melee)
            .with_damage(DamageType::Physical, 10.0)
    }

    /// Damage spec with one set-by-caller magnitude per damage type
    pub fn make_damage_spec(&self, level: u32, context: EffectContext) -> DamageEffectSpec {
        let mut spec = DamageEffectSpec::new(level, context).with_source_tags(self.tags.clone());
        for (&damage_type, magnitude) in &self.damage {
            spec.set_by_caller_magnitude(damage_type, magnitude.value_at(level));
        }
        spec
    }

    /// Instant effect that spends the mana cost
    pub fn cost_effect(&self) -> GameplayEffect {
        GameplayEffect::instant(format!("Cost.{}", self.id)).with_modifier(EffectModifierSpec::new(
            Attribute::Mana,
            ModifierOp::Add,
            -self.mana_cost,
        ))
    }

    /// Check and spend the caster's mana, then build the damage spec
    pub fn activate(&self, caster: &mut Combatant, level: u32) -> Result<DamageEffectSpec, AbilityError> {
        if !caster.is_alive() {
            return Err(AbilityError::CasterDead {
                caster: caster.id.clone(),
            });
        }

        let available = caster.attributes().mana();
        if self.mana_cost > available {
            return Err(AbilityError::InsufficientMana {
                ability: self.id.clone(),
                required: self.mana_cost,
                available,
            });
        }

        if self.mana_cost > 0.0 {
            caster.apply_effect_to_self(&self.cost_effect(), level)?;
        }

        tracing::debug!(ability = %self.id, caster = %caster.id, level, "ability activated");
        let context = EffectContext::new(caster.id.clone()).with_effect_causer(match self.kind {
            AbilityKind::Melee => caster.id.clone(),
            AbilityKind::Projectile => format!("{}.projectile", self.id),
        });
        Ok(self.make_damage_spec(level, context))
    }
}
