//! GameplayEffect - data describing how an effect changes attributes

use super::scalable::ScalableFloat;
use super::EffectError;
use crate::attributes::{Attribute, AttributeCategory, AttributeModifier, ModifierOp};
use crate::effect::ActiveEffectHandle;
use crate::types::TagContainer;
use serde::{Deserialize, Serialize};

/// How long an effect stays on its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum EffectDuration {
    /// Changes base values once and is gone
    Instant,
    /// Adds modifiers that are removed after `seconds`
    HasDuration { seconds: f64 },
    /// Adds modifiers that stay until removed
    Infinite,
}

impl EffectDuration {
    pub fn is_instant(&self) -> bool {
        matches!(self, EffectDuration::Instant)
    }
}

/// One attribute change an effect makes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectModifierSpec {
    pub attribute: Attribute,
    pub op: ModifierOp,
    pub magnitude: ScalableFloat,
    #[serde(default)]
    pub required_source_tags: TagContainer,
    #[serde(default)]
    pub required_target_tags: TagContainer,
}

impl EffectModifierSpec {
    pub fn new(attribute: Attribute, op: ModifierOp, magnitude: impl Into<ScalableFloat>) -> Self {
        EffectModifierSpec {
            attribute,
            op,
            magnitude: magnitude.into(),
            required_source_tags: TagContainer::new(),
            required_target_tags: TagContainer::new(),
        }
    }

    pub fn with_target_tags(mut self, tags: TagContainer) -> Self {
        self.required_target_tags = tags;
        self
    }

    pub fn with_source_tags(mut self, tags: TagContainer) -> Self {
        self.required_source_tags = tags;
        self
    }

    /// Modifier instance at `level`, owned by `owner`
    pub fn to_modifier(&self, level: u32, owner: Option<ActiveEffectHandle>) -> AttributeModifier {
        let mut modifier = AttributeModifier::new(self.op, self.magnitude.value_at(level))
            .with_source_tags(self.required_source_tags.clone())
            .with_target_tags(self.required_target_tags.clone());
        modifier.owner = owner;
        modifier
    }
}

/// A named bundle of attribute modifiers with a duration policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameplayEffect {
    pub name: String,
    pub duration: EffectDuration,
    #[serde(default)]
    pub modifiers: Vec<EffectModifierSpec>,
    /// Tags the target owns while the effect is active
    #[serde(default)]
    pub granted_tags: TagContainer,
}

impl GameplayEffect {
    pub fn instant(name: impl Into<String>) -> Self {
        GameplayEffect {
            name: name.into(),
            duration: EffectDuration::Instant,
            modifiers: Vec::new(),
            granted_tags: TagContainer::new(),
        }
    }

    pub fn with_duration(name: impl Into<String>, seconds: f64) -> Self {
        GameplayEffect {
            duration: EffectDuration::HasDuration { seconds },
            ..Self::instant(name)
        }
    }

    pub fn infinite(name: impl Into<String>) -> Self {
        GameplayEffect {
            duration: EffectDuration::Infinite,
            ..Self::instant(name)
        }
    }

    pub fn with_modifier(mut self, modifier: EffectModifierSpec) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn with_granted_tag(mut self, tag: &str) -> Self {
        self.granted_tags.insert(tag);
        self
    }

    /// Reject effects the attribute set cannot hold
    pub fn validate(&self) -> Result<(), EffectError> {
        if let EffectDuration::HasDuration { seconds } = self.duration {
            if !seconds.is_finite() || seconds <= 0.0 {
                return Err(EffectError::InvalidDuration {
                    effect: self.name.clone(),
                    seconds,
                });
            }
        }

        // Meta and vital attributes only ever change through their base value
        if !self.duration.is_instant() {
            for spec in &self.modifiers {
                let effect = self.name.clone();
                let attribute = spec.attribute;
                match attribute.category() {
                    AttributeCategory::Meta => {
                        return Err(EffectError::PersistentMetaModifier { effect, attribute })
                    }
                    AttributeCategory::Vital => {
                        return Err(EffectError::PersistentVitalModifier { effect, attribute })
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration_rejected() {
        let effect = GameplayEffect::with_duration("Haste", 0.0);
        assert!(matches!(effect.validate(), Err(EffectError::InvalidDuration { .. })));
    }

    #[test]
    fn test_persistent_meta_modifier_rejected() {
        let effect = GameplayEffect::infinite("Bleed")
            .with_modifier(EffectModifierSpec::new(Attribute::IncomingDamage, ModifierOp::Add, 5.0));
        assert!(matches!(
            effect.validate(),
            Err(EffectError::PersistentMetaModifier { attribute: Attribute::IncomingDamage, .. })
        ));

        let instant = GameplayEffect::instant("Smite")
            .with_modifier(EffectModifierSpec::new(Attribute::IncomingDamage, ModifierOp::Add, 5.0));
        assert!(instant.validate().is_ok());
    }

    #[test]
    fn test_persistent_vital_modifier_rejected() {
        let overheal = GameplayEffect::infinite("Overheal")
            .with_modifier(EffectModifierSpec::new(Attribute::Health, ModifierOp::Add, 50.0));
        assert!(matches!(
            overheal.validate(),
            Err(EffectError::PersistentVitalModifier { attribute: Attribute::Health, .. })
        ));

        let drain = GameplayEffect::with_duration("Mana Drain", 2.0)
            .with_modifier(EffectModifierSpec::new(Attribute::Mana, ModifierOp::Add, -150.0));
        assert!(matches!(
            drain.validate(),
            Err(EffectError::PersistentVitalModifier { attribute: Attribute::Mana, .. })
        ));

        let heal = GameplayEffect::instant("Heal")
            .with_modifier(EffectModifierSpec::new(Attribute::Health, ModifierOp::Add, 50.0));
        assert!(heal.validate().is_ok());
    }

    #[test]
    fn test_parse_effect_from_toml() {
        let effect: GameplayEffect = toml::from_str(
            r#"
name = "Stone Skin"
duration = { policy = "has_duration", seconds = 8.0 }
granted_tags = ["Buff.StoneSkin"]

[[modifiers]]
attribute = "armor"
op = "add"
magnitude = { value = 15.0 }
"#,
        )
        .unwrap();

        assert_eq!(effect.duration, EffectDuration::HasDuration { seconds: 8.0 });
        assert_eq!(effect.modifiers.len(), 1);
        assert_eq!(effect.modifiers[0].attribute, Attribute::Armor);
        assert!(effect.validate().is_ok());
    }

    #[test]
    fn test_to_modifier_scales_with_level() {
        use crate::coefficients::Curve;
        let spec = EffectModifierSpec::new(
            Attribute::Armor,
            ModifierOp::Add,
            ScalableFloat::new(10.0).with_curve(Curve::from_points(&[(1.0, 1.0), (3.0, 2.0)]).unwrap()),
        );
        let modifier = spec.to_modifier(3, Some(ActiveEffectHandle(1)));
        assert!((modifier.magnitude - 20.0).abs() < 1e-9);
        assert_eq!(modifier.owner, Some(ActiveEffectHandle(1)));
    }
}
