//! Combat resolution - Apply damage effect specs to combatants

mod resolution;
mod result;

pub use resolution::{resolve_damage, resolve_damage_with_rng, resolve_damage_with_rolls};
pub use result::CombatResult;
