//! EffectContext - who caused an effect and how the hit landed

use serde::{Deserialize, Serialize};

/// Metadata carried by an applied effect instance
///
/// The hit flags are written by damage resolution and read by
/// presentation consumers (floating damage text, hit reactions).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectContext {
    /// Combatant that owns the ability
    pub instigator: Option<String>,
    /// Actor that physically delivered the effect, e.g. a projectile
    pub effect_causer: Option<String>,
    blocked: bool,
    critical: bool,
}

impl EffectContext {
    pub fn new(instigator: impl Into<String>) -> Self {
        EffectContext {
            instigator: Some(instigator.into()),
            ..Default::default()
        }
    }

    pub fn with_effect_causer(mut self, causer: impl Into<String>) -> Self {
        self.effect_causer = Some(causer.into());
        self
    }

    pub fn is_blocked_hit(&self) -> bool {
        self.blocked
    }

    pub fn set_is_blocked_hit(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    pub fn is_critical_hit(&self) -> bool {
        self.critical
    }

    pub fn set_is_critical_hit(&mut self, critical: bool) {
        self.critical = critical;
    }
}
