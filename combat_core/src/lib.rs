//! combat_core - Attribute-driven damage resolution for action RPG combatants
//!
//! This library provides:
//! - AttributeSet: Primary, secondary, resistance and vital attributes with tag-conditional modifiers
//! - GameplayEffect: Instant, duration and infinite attribute changes
//! - DamageAbility: Melee/projectile abilities that build damage effect specs
//! - Damage Execution: Resistance aggregation, then block, armor and critical mitigation
//! - Damage Resolution: Applying a damage effect spec to a combatant

pub mod ability;
pub mod attributes;
pub mod coefficients;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod effect;
pub mod prelude;
pub mod snapshot;
pub mod types;

// Re-export core types for convenience
pub use ability::{AbilityError, AbilityKind, DamageAbility};
pub use attributes::{Attribute, AttributeModifier, AttributeSet, AttributeValue, ModifierOp};
pub use coefficients::{Curve, DamageCoefficients};
pub use combat::{resolve_damage, resolve_damage_with_rng, resolve_damage_with_rolls, CombatResult};
pub use combatant::Combatant;
pub use config::{ClassInfo, ConfigError, GameData};
pub use damage::{DamageExecution, DamageOutcome, DamageRolls, DamageType, SetByCallerMagnitudes};
pub use effect::{DamageEffectSpec, EffectContext, GameplayEffect};
pub use snapshot::CombatantSnapshot;
pub use types::{CharacterClass, GameplayTag, TagContainer, Team};
