//! Damage ability configuration loading

use super::ConfigError;
use crate::ability::DamageAbility;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for ability configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitiesConfig {
    #[serde(rename = "abilities")]
    pub abilities: Vec<DamageAbility>,
}

impl AbilitiesConfig {
    fn into_map(self) -> Result<HashMap<String, DamageAbility>, ConfigError> {
        let mut map = HashMap::new();
        for ability in self.abilities {
            if ability.damage.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "ability '{}' deals no damage",
                    ability.id
                )));
            }
            if ability.mana_cost < 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "ability '{}' has negative mana cost",
                    ability.id
                )));
            }
            if let Some(previous) = map.insert(ability.id.clone(), ability) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate ability id '{}'",
                    previous.id
                )));
            }
        }
        Ok(map)
    }
}

/// Load ability configurations from a TOML file
pub fn load_abilities(path: &Path) -> Result<HashMap<String, DamageAbility>, ConfigError> {
    let config: AbilitiesConfig = super::load_toml(path)?;
    config.into_map()
}

/// Load ability configurations from a TOML string
pub fn parse_abilities(content: &str) -> Result<HashMap<String, DamageAbility>, ConfigError> {
    let config: AbilitiesConfig = super::parse_toml(content)?;
    config.into_map()
}

/// Get default ability configurations
pub fn default_abilities() -> HashMap<String, DamageAbility> {
    let toml = include_str!("../../config/abilities.toml");
    parse_abilities(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled abilities.toml is invalid, using basic attack only");
        let mut map = HashMap::new();
        map.insert("basic_attack".to_string(), DamageAbility::basic_attack());
        map
    })
}
