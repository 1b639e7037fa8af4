//! Configuration loading from TOML files

mod abilities;
mod classes;
mod formulas;

pub use abilities::{default_abilities, load_abilities, parse_abilities, AbilitiesConfig};
pub use classes::{
    default_class_info, load_class_info, parse_class_info, ClassDefaults, ClassInfo, PrimaryAttributes,
};
pub use formulas::{default_formulas, load_formulas, parse_formulas};

use crate::ability::DamageAbility;
use crate::attributes::AttributeFormulas;
use crate::combatant::Combatant;
use crate::types::{CharacterClass, Team};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// All content the combat system reads: classes, abilities and formulas
#[derive(Debug, Clone)]
pub struct GameData {
    pub classes: ClassInfo,
    pub abilities: HashMap<String, DamageAbility>,
    pub formulas: AttributeFormulas,
}

impl Default for GameData {
    fn default() -> Self {
        GameData {
            classes: default_class_info(),
            abilities: default_abilities(),
            formulas: default_formulas(),
        }
    }
}

impl GameData {
    /// Load `classes.toml`, `abilities.toml` and `formulas.toml` from `dir`
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let data = GameData {
            classes: load_class_info(&dir.join("classes.toml"))?,
            abilities: load_abilities(&dir.join("abilities.toml"))?,
            formulas: load_formulas(&dir.join("formulas.toml"))?,
        };
        tracing::info!(
            dir = %dir.display(),
            abilities = data.abilities.len(),
            formulas = data.formulas.formulas.len(),
            "loaded game data"
        );
        Ok(data)
    }

    pub fn ability(&self, id: &str) -> Option<&DamageAbility> {
        self.abilities.get(id)
    }

    /// Create a combatant of `class` at `level` with full vitals
    pub fn spawn(&self, id: impl Into<String>, class: CharacterClass, team: Team, level: u32) -> Combatant {
        Combatant::from_class(id, class, team, level, &self.classes, &self.formulas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_is_reported() {
        let result: Result<ClassInfo, _> = parse_toml("not = [valid");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GameData::load_dir(Path::new("/nonexistent/combat_core/config"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_load_bundled_dir() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("config");
        let data = GameData::load_dir(&dir).unwrap();
        assert!(data.ability("basic_attack").is_some());
        assert_eq!(data.formulas, AttributeFormulas::default());
    }

    #[test]
    fn test_spawn_full_vitals() {
        let data = GameData::default();
        for &class in CharacterClass::all() {
            let combatant = data.spawn("c", class, Team::Enemy, 3);
            assert!(combatant.is_alive());
            assert_eq!(combatant.level, 3);
            let attributes = combatant.attributes();
            assert!((attributes.health() - attributes.max_health()).abs() < f64::EPSILON);
        }
    }
}
