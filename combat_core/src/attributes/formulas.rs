//! Secondary attribute derivation from primary attributes and level

use super::{Attribute, AttributeCategory, AttributeSet};
use serde::{Deserialize, Serialize};

/// `(backing + pre_add) × coefficient + post_add + per_level × level`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeFormula {
    /// Attribute whose base value is derived
    pub attribute: Attribute,
    /// Attribute the value scales from
    pub backing: Attribute,
    #[serde(default = "default_coefficient")]
    pub coefficient: f64,
    #[serde(default)]
    pub pre_add: f64,
    #[serde(default)]
    pub post_add: f64,
    #[serde(default)]
    pub per_level: f64,
}

fn default_coefficient() -> f64 {
    1.0
}

impl AttributeFormula {
    pub fn new(attribute: Attribute, backing: Attribute, coefficient: f64) -> Self {
        AttributeFormula {
            attribute,
            backing,
            coefficient,
            pre_add: 0.0,
            post_add: 0.0,
            per_level: 0.0,
        }
    }

    pub fn pre_add(mut self, value: f64) -> Self {
        self.pre_add = value;
        self
    }

    pub fn post_add(mut self, value: f64) -> Self {
        self.post_add = value;
        self
    }

    pub fn per_level(mut self, value: f64) -> Self {
        self.per_level = value;
        self
    }

    pub fn evaluate(&self, backing_value: f64, level: u32) -> f64 {
        (backing_value + self.pre_add) * self.coefficient + self.post_add + self.per_level * level as f64
    }
}

/// Ordered derivation rules; later formulas may read earlier results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeFormulas {
    pub formulas: Vec<AttributeFormula>,
}

impl Default for AttributeFormulas {
    fn default() -> Self {
        use Attribute::*;
        AttributeFormulas {
            formulas: vec![
                AttributeFormula::new(Armor, Resilience, 0.25).pre_add(2.0).post_add(6.0),
                AttributeFormula::new(ArmorPenetration, Resilience, 0.15).pre_add(1.0).post_add(3.0),
                AttributeFormula::new(BlockChance, Armor, 0.25).post_add(4.0),
                AttributeFormula::new(CriticalHitChance, ArmorPenetration, 0.25).post_add(2.0),
                AttributeFormula::new(CriticalHitDamage, ArmorPenetration, 1.5).post_add(5.0),
                AttributeFormula::new(CriticalHitResistance, Armor, 0.25).post_add(10.0),
                AttributeFormula::new(HealthRegeneration, Vigor, 0.1).post_add(1.0),
                AttributeFormula::new(ManaRegeneration, Intelligence, 0.1).post_add(1.0),
                AttributeFormula::new(MaxHealth, Vigor, 2.5).post_add(80.0).per_level(10.0),
                AttributeFormula::new(MaxMana, Intelligence, 2.0).post_add(50.0).per_level(15.0),
            ],
        }
    }
}

impl AttributeFormulas {
    /// Check that every formula derives a secondary attribute from a
    /// primary, secondary or resistance attribute
    pub fn validate(&self) -> Result<(), String> {
        for formula in &self.formulas {
            if formula.attribute.category() != AttributeCategory::Secondary {
                return Err(format!(
                    "formula target {} is not a secondary attribute",
                    formula.attribute
                ));
            }
            if matches!(
                formula.backing.category(),
                AttributeCategory::Vital | AttributeCategory::Meta
            ) {
                return Err(format!(
                    "formula for {} cannot scale from {}",
                    formula.attribute, formula.backing
                ));
            }
        }
        Ok(())
    }

    /// Write derived base values into `attributes`, in declaration order
    pub fn apply(&self, attributes: &mut AttributeSet, level: u32) {
        for formula in &self.formulas {
            let backing = attributes.current(formula.backing);
            attributes.value_mut(formula.attribute).base = formula.evaluate(backing, level);
        }
        attributes.on_modifiers_changed();
    }
}
