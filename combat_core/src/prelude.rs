//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Attributes
pub use crate::attributes::{Attribute, AttributeSet, EvaluateParams, ModifierOp};

// Effects and abilities
pub use crate::ability::{AbilityKind, DamageAbility};
pub use crate::effect::{DamageEffectSpec, EffectContext, EffectModifierSpec, GameplayEffect};

// Damage pipeline
pub use crate::damage::{DamageOutcome, DamageRolls, DamageType};

// Combat
pub use crate::combat::{resolve_damage, resolve_damage_with_rng, resolve_damage_with_rolls, CombatResult};
pub use crate::combatant::Combatant;

// Config
pub use crate::config::{ClassInfo, GameData};

pub use crate::types::{CharacterClass, TagContainer, Team};
