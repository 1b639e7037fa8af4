//! Gameplay effects - instant, duration and infinite attribute changes

mod active;
mod context;
mod gameplay_effect;
mod scalable;
mod spec;

pub use active::{ActiveEffect, ActiveEffectHandle, ActiveEffects, EffectApplication};
pub use context::EffectContext;
pub use gameplay_effect::{EffectDuration, EffectModifierSpec, GameplayEffect};
pub use scalable::ScalableFloat;
pub use spec::DamageEffectSpec;

use crate::attributes::Attribute;
use thiserror::Error;

/// Errors from applying or removing effects
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectError {
    #[error("no active effect with handle {0}")]
    UnknownHandle(ActiveEffectHandle),
    #[error("effect '{effect}' has invalid duration {seconds}")]
    InvalidDuration { effect: String, seconds: f64 },
    #[error("effect '{effect}' cannot hold a persistent modifier on meta attribute {attribute}")]
    PersistentMetaModifier { effect: String, attribute: Attribute },
    #[error("effect '{effect}' cannot hold a persistent modifier on vital attribute {attribute}")]
    PersistentVitalModifier { effect: String, attribute: Attribute },
}
