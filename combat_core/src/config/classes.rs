//! Character class configuration loading

use super::ConfigError;
use crate::attributes::{Attribute, AttributeFormulas, AttributeSet};
use crate::coefficients::DamageCoefficients;
use crate::damage::DamageType;
use crate::types::CharacterClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Values for the four primary attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimaryAttributes {
    pub strength: f64,
    pub intelligence: f64,
    pub resilience: f64,
    pub vigor: f64,
}

impl PrimaryAttributes {
    pub fn new(strength: f64, intelligence: f64, resilience: f64, vigor: f64) -> Self {
        PrimaryAttributes {
            strength,
            intelligence,
            resilience,
            vigor,
        }
    }

    fn pairs(&self) -> [(Attribute, f64); 4] {
        [
            (Attribute::Strength, self.strength),
            (Attribute::Intelligence, self.intelligence),
            (Attribute::Resilience, self.resilience),
            (Attribute::Vigor, self.vigor),
        ]
    }
}

/// Starting attributes for one class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefaults {
    /// Primary attributes at level 1
    pub primary: PrimaryAttributes,
    /// Primary attributes gained per level after the first
    #[serde(default)]
    pub growth: PrimaryAttributes,
    /// Base resistance per damage type
    #[serde(default)]
    pub resistances: BTreeMap<DamageType, f64>,
    /// Replaces the shared coefficient table for this class
    #[serde(default)]
    pub coefficients: Option<DamageCoefficients>,
}

impl ClassDefaults {
    pub fn new(primary: PrimaryAttributes) -> Self {
        ClassDefaults {
            primary,
            growth: PrimaryAttributes::default(),
            resistances: BTreeMap::new(),
            coefficients: None,
        }
    }
}

/// Class defaults plus the shared damage calculation coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub coefficients: DamageCoefficients,
    pub elementalist: ClassDefaults,
    pub warrior: ClassDefaults,
    pub ranger: ClassDefaults,
}

impl Default for ClassInfo {
    fn default() -> Self {
        ClassInfo {
            coefficients: DamageCoefficients::default(),
            elementalist: ClassDefaults::new(PrimaryAttributes::new(8.0, 17.0, 10.0, 9.0)),
            warrior: ClassDefaults::new(PrimaryAttributes::new(17.0, 8.0, 14.0, 12.0)),
            ranger: ClassDefaults::new(PrimaryAttributes::new(12.0, 11.0, 10.0, 10.0)),
        }
    }
}

impl ClassInfo {
    pub fn class_defaults(&self, class: CharacterClass) -> &ClassDefaults {
        match class {
            CharacterClass::Elementalist => &self.elementalist,
            CharacterClass::Warrior => &self.warrior,
            CharacterClass::Ranger => &self.ranger,
        }
    }

    pub fn class_defaults_mut(&mut self, class: CharacterClass) -> &mut ClassDefaults {
        match class {
            CharacterClass::Elementalist => &mut self.elementalist,
            CharacterClass::Warrior => &mut self.warrior,
            CharacterClass::Ranger => &mut self.ranger,
        }
    }

    /// Coefficient table used when a combatant of `class` deals damage
    pub fn coefficients_for(&self, class: CharacterClass) -> &DamageCoefficients {
        self.class_defaults(class)
            .coefficients
            .as_ref()
            .unwrap_or(&self.coefficients)
    }

    /// Starting attribute set for `class` at `level`
    ///
    /// Primary attributes come from the class defaults, secondary attributes
    /// from `formulas`, and Health/Mana start full.
    pub fn initialize_attributes(
        &self,
        class: CharacterClass,
        level: u32,
        formulas: &AttributeFormulas,
    ) -> AttributeSet {
        let defaults = self.class_defaults(class);
        let levels_gained = level.saturating_sub(1) as f64;

        let mut attributes = AttributeSet::new();
        for ((attribute, base), (_, growth)) in defaults.primary.pairs().into_iter().zip(defaults.growth.pairs()) {
            attributes.value_mut(attribute).base = base + growth * levels_gained;
        }
        for (&damage_type, &resistance) in &defaults.resistances {
            attributes.value_mut(damage_type.resistance()).base = resistance;
        }

        formulas.apply(&mut attributes, level);
        attributes.refill_vitals();

        tracing::debug!(
            %class,
            level,
            max_health = attributes.max_health(),
            max_mana = attributes.max_mana(),
            "initialized class attributes"
        );
        attributes
    }
}

/// Load class configuration from a TOML file
pub fn load_class_info(path: &Path) -> Result<ClassInfo, ConfigError> {
    super::load_toml(path)
}

/// Load class configuration from a TOML string
pub fn parse_class_info(content: &str) -> Result<ClassInfo, ConfigError> {
    super::parse_toml(content)
}

/// Get default class configuration
pub fn default_class_info() -> ClassInfo {
    let toml = include_str!("../../config/classes.toml");
    parse_class_info(toml).unwrap_or_else(|err| {
        tracing::warn!(%err, "bundled classes.toml is invalid, using built-in defaults");
        ClassInfo::default()
    })
}
