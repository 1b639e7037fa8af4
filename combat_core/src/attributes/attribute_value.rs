//! AttributeValue - Base value plus tag-conditional modifiers

use crate::effect::ActiveEffectHandle;
use crate::types::TagContainer;
use serde::{Deserialize, Serialize};

static NO_TAGS: TagContainer = TagContainer::new();

/// How a modifier combines with the attribute's base value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOp {
    Add,
    Multiply,
    Divide,
    Override,
}

/// Source/target tags an attribute is evaluated against
#[derive(Debug, Clone, Copy)]
pub struct EvaluateParams<'a> {
    pub source_tags: &'a TagContainer,
    pub target_tags: &'a TagContainer,
}

impl<'a> EvaluateParams<'a> {
    pub fn new(source_tags: &'a TagContainer, target_tags: &'a TagContainer) -> Self {
        EvaluateParams {
            source_tags,
            target_tags,
        }
    }
}

impl Default for EvaluateParams<'static> {
    fn default() -> Self {
        EvaluateParams::new(&NO_TAGS, &NO_TAGS)
    }
}

/// A single modification to an attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub op: ModifierOp,
    pub magnitude: f64,
    /// Tags the source must have for this modifier to apply
    #[serde(default)]
    pub required_source_tags: TagContainer,
    /// Tags the target must have for this modifier to apply
    #[serde(default)]
    pub required_target_tags: TagContainer,
    /// Active effect that granted this modifier
    #[serde(skip)]
    pub owner: Option<ActiveEffectHandle>,
}

impl AttributeModifier {
    pub fn new(op: ModifierOp, magnitude: f64) -> Self {
        AttributeModifier {
            op,
            magnitude,
            required_source_tags: TagContainer::new(),
            required_target_tags: TagContainer::new(),
            owner: None,
        }
    }

    pub fn add(magnitude: f64) -> Self {
        Self::new(ModifierOp::Add, magnitude)
    }

    pub fn multiply(magnitude: f64) -> Self {
        Self::new(ModifierOp::Multiply, magnitude)
    }

    /// Only apply when the source carries these tags
    pub fn with_source_tags(mut self, tags: TagContainer) -> Self {
        self.required_source_tags = tags;
        self
    }

    /// Only apply when the target carries these tags
    pub fn with_target_tags(mut self, tags: TagContainer) -> Self {
        self.required_target_tags = tags;
        self
    }

    /// Whether the tag requirements are met
    pub fn applies(&self, params: &EvaluateParams<'_>) -> bool {
        params.source_tags.has_all(&self.required_source_tags)
            && params.target_tags.has_all(&self.required_target_tags)
    }
}

/// A numeric attribute: a base value and the modifiers stacked on it
///
/// Final value is calculated as:
/// `((base + Σadd) × (1 + Σ(mul − 1))) / (1 + Σ(div − 1))`
///
/// Multipliers stack additively with each other, as do divisors. An
/// `Override` modifier replaces the result entirely; the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    pub base: f64,
    #[serde(default)]
    pub modifiers: Vec<AttributeModifier>,
}

impl AttributeValue {
    pub fn with_base(base: f64) -> Self {
        AttributeValue {
            base,
            modifiers: Vec::new(),
        }
    }

    /// Current value, counting only modifiers with no tag requirements
    pub fn compute(&self) -> f64 {
        self.evaluate(&EvaluateParams::default())
    }

    /// Current value under the given source/target tags
    pub fn evaluate(&self, params: &EvaluateParams<'_>) -> f64 {
        let mut additive = 0.0;
        let mut multiplicative = 1.0;
        let mut division = 1.0;
        let mut overridden = None;

        for modifier in self.modifiers.iter().filter(|m| m.applies(params)) {
            match modifier.op {
                ModifierOp::Add => additive += modifier.magnitude,
                ModifierOp::Multiply => multiplicative += modifier.magnitude - 1.0,
                ModifierOp::Divide => division += modifier.magnitude - 1.0,
                ModifierOp::Override => overridden = Some(modifier.magnitude),
            }
        }

        if let Some(value) = overridden {
            return value;
        }

        let division = if division.abs() < f64::EPSILON { 1.0 } else { division };
        (self.base + additive) * multiplicative / division
    }

    pub fn add_modifier(&mut self, modifier: AttributeModifier) {
        self.modifiers.push(modifier);
    }

    /// Remove every modifier granted by `owner`, returning how many were removed
    pub fn remove_modifiers_from(&mut self, owner: ActiveEffectHandle) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.owner != Some(owner));
        before - self.modifiers.len()
    }

    /// Drop all modifiers, keeping the base value
    pub fn reset_to_base(&mut self) {
        self.modifiers.clear();
    }
}
