//! Attribute formula configuration loading

use super::ConfigError;
use crate::attributes::AttributeFormulas;
use std::path::Path;

fn validated(formulas: AttributeFormulas) -> Result<AttributeFormulas, ConfigError> {
    formulas.validate().map_err(ConfigError::ValidationError)?;
    Ok(formulas)
}

/// Load attribute formulas from a TOML file
pub fn load_formulas(path: &Path) -> Result<AttributeFormulas, ConfigError> {
    validated(super::load_toml(path)?)
}

/// Load attribute formulas from a TOML string
pub fn parse_formulas(content: &str) -> Result<AttributeFormulas, ConfigError> {
    validated(super::parse_toml(content)?)
}

/// Get default attribute formulas
pub fn default_formulas() -> AttributeFormulas {
    let toml = include_str!("../../config/formulas.toml");
    parse_formulas(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled formulas.toml is invalid, using built-in formulas");
        AttributeFormulas::default()
    })
}
