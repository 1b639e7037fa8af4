//! ActiveEffects - tracking duration and infinite effects on a combatant

use super::gameplay_effect::{EffectDuration, GameplayEffect};
use super::EffectError;
use crate::attributes::{Attribute, AttributeChange, AttributeSet, EvaluateParams};
use crate::types::TagContainer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one applied duration/infinite effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActiveEffectHandle(pub u64);

impl fmt::Display for ActiveEffectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An effect currently holding modifiers on a combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub handle: ActiveEffectHandle,
    pub name: String,
    pub level: u32,
    /// Seconds left, `None` for infinite effects
    pub remaining: Option<f64>,
    pub granted_tags: TagContainer,
}

impl ActiveEffect {
    pub fn is_expired(&self) -> bool {
        matches!(self.remaining, Some(r) if r <= 0.0)
    }
}

/// What applying an effect did
#[derive(Debug, Clone, PartialEq)]
pub enum EffectApplication {
    /// Instant effect: base values changed
    Executed(Vec<AttributeChange>),
    /// Duration/infinite effect: modifiers added under this handle
    Active(ActiveEffectHandle),
}

/// All active effects on one combatant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    next_handle: u64,
    effects: Vec<ActiveEffect>,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn get(&self, handle: ActiveEffectHandle) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.handle == handle)
    }

    /// Union of tags granted by every active effect
    pub fn granted_tags(&self) -> TagContainer {
        self.effects
            .iter()
            .flat_map(|e| e.granted_tags.iter().cloned())
            .collect()
    }

    /// Apply `effect` at `level` to `attributes`
    ///
    /// Instant modifiers whose tag requirements `params` does not meet are
    /// skipped. Duration and infinite effects keep all their modifiers;
    /// tag requirements are checked whenever the attribute is evaluated.
    pub fn apply(
        &mut self,
        effect: &GameplayEffect,
        level: u32,
        attributes: &mut AttributeSet,
        params: &EvaluateParams<'_>,
    ) -> Result<EffectApplication, EffectError> {
        effect.validate()?;

        let remaining = match effect.duration {
            EffectDuration::Instant => {
                let changes = effect
                    .modifiers
                    .iter()
                    .filter_map(|spec| {
                        let modifier = spec.to_modifier(level, None);
                        modifier
                            .applies(params)
                            .then(|| attributes.apply_instant(spec.attribute, modifier.op, modifier.magnitude))
                    })
                    .collect();
                tracing::debug!(effect = %effect.name, level, "executed instant effect");
                return Ok(EffectApplication::Executed(changes));
            }
            EffectDuration::HasDuration { seconds } => Some(seconds),
            EffectDuration::Infinite => None,
        };

        self.next_handle += 1;
        let handle = ActiveEffectHandle(self.next_handle);

        for spec in &effect.modifiers {
            attributes
                .value_mut(spec.attribute)
                .add_modifier(spec.to_modifier(level, Some(handle)));
        }
        attributes.on_modifiers_changed();

        self.effects.push(ActiveEffect {
            handle,
            name: effect.name.clone(),
            level,
            remaining,
            granted_tags: effect.granted_tags.clone(),
        });
        tracing::debug!(effect = %effect.name, %handle, ?remaining, "effect became active");

        Ok(EffectApplication::Active(handle))
    }

    /// Remove an active effect and every modifier it granted
    pub fn remove(
        &mut self,
        handle: ActiveEffectHandle,
        attributes: &mut AttributeSet,
    ) -> Result<ActiveEffect, EffectError> {
        let index = self
            .effects
            .iter()
            .position(|e| e.handle == handle)
            .ok_or(EffectError::UnknownHandle(handle))?;
        let removed = self.effects.remove(index);
        strip_modifiers(attributes, handle);
        tracing::debug!(effect = %removed.name, %handle, "effect removed");
        Ok(removed)
    }

    /// Advance duration effects by `delta` seconds, removing the ones that ran out
    pub fn tick(&mut self, delta: f64, attributes: &mut AttributeSet) -> Vec<ActiveEffect> {
        for effect in &mut self.effects {
            if let Some(remaining) = effect.remaining.as_mut() {
                *remaining -= delta;
            }
        }

        let (expired, kept): (Vec<_>, Vec<_>) =
            self.effects.drain(..).partition(ActiveEffect::is_expired);
        self.effects = kept;

        for effect in &expired {
            strip_modifiers(attributes, effect.handle);
            tracing::debug!(effect = %effect.name, handle = %effect.handle, "effect expired");
        }
        expired
    }
}

fn strip_modifiers(attributes: &mut AttributeSet, handle: ActiveEffectHandle) {
    for attribute in Attribute::ALL {
        attributes.value_mut(attribute).remove_modifiers_from(handle);
    }
    attributes.on_modifiers_changed();
}
