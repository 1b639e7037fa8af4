//! DamageEffectSpec - a damage effect ready to be applied

use super::context::EffectContext;
use crate::damage::{DamageType, SetByCallerMagnitudes};
use crate::types::TagContainer;
use serde::{Deserialize, Serialize};

/// Damage effect instance carrying caller-assigned per-type magnitudes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageEffectSpec {
    /// Ability level the magnitudes were computed at
    pub level: u32,
    pub magnitudes: SetByCallerMagnitudes,
    pub context: EffectContext,
    /// Tags of the ability that made the spec, added to the source's tags on capture
    #[serde(default)]
    pub source_tags: TagContainer,
}

impl DamageEffectSpec {
    pub fn new(level: u32, context: EffectContext) -> Self {
        DamageEffectSpec {
            level,
            magnitudes: SetByCallerMagnitudes::new(),
            context,
            source_tags: TagContainer::new(),
        }
    }

    /// Assign the raw magnitude for one damage type
    pub fn set_by_caller_magnitude(&mut self, damage_type: DamageType, magnitude: f64) {
        self.magnitudes.set(damage_type, magnitude);
    }

    pub fn with_source_tags(mut self, tags: TagContainer) -> Self {
        self.source_tags = tags;
        self
    }

    pub fn with_magnitude(mut self, damage_type: DamageType, magnitude: f64) -> Self {
        self.set_by_caller_magnitude(damage_type, magnitude);
        self
    }
}
