//! Attribute snapshots - point-in-time attribute values for damage execution
//!
//! A damage execution reads ten attributes: three from the source, seven
//! from the target. Every capture happens when the effect executes; none of
//! the damage captures are frozen at spec creation.
//!
//! A capture that fails (the combatant has no such attribute) is not an
//! error: the value resolves to 0.

use crate::attributes::{Attribute, AttributeSet, EvaluateParams};
use crate::damage::DamageType;
use serde::{Deserialize, Serialize};

/// Which combatant a capture reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureSide {
    Source,
    Target,
}

/// One attribute the damage execution needs, and whose it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureDefinition {
    pub attribute: Attribute,
    pub side: CaptureSide,
    /// Freeze the value when the spec is created instead of at execution
    pub snapshot: bool,
}

impl CaptureDefinition {
    /// Live capture, read when the effect executes
    pub const fn new(attribute: Attribute, side: CaptureSide) -> Self {
        CaptureDefinition {
            attribute,
            side,
            snapshot: false,
        }
    }
}

/// Attributes captured for every damage execution
pub const DAMAGE_CAPTURES: [CaptureDefinition; 10] = [
    CaptureDefinition::new(Attribute::Armor, CaptureSide::Target),
    CaptureDefinition::new(Attribute::ArmorPenetration, CaptureSide::Source),
    CaptureDefinition::new(Attribute::BlockChance, CaptureSide::Target),
    CaptureDefinition::new(Attribute::CriticalHitChance, CaptureSide::Source),
    CaptureDefinition::new(Attribute::CriticalHitDamage, CaptureSide::Source),
    CaptureDefinition::new(Attribute::CriticalHitResistance, CaptureSide::Target),
    CaptureDefinition::new(Attribute::FireResistance, CaptureSide::Target),
    CaptureDefinition::new(Attribute::LightningResistance, CaptureSide::Target),
    CaptureDefinition::new(Attribute::ArcaneResistance, CaptureSide::Target),
    CaptureDefinition::new(Attribute::PhysicalResistance, CaptureSide::Target),
];

/// Anything attributes can be captured from
pub trait AttributeProvider {
    /// Current magnitude of `attribute`, or `None` if the provider has none
    fn capture(&self, attribute: Attribute, params: &EvaluateParams<'_>) -> Option<f64>;
}

impl AttributeProvider for AttributeSet {
    fn capture(&self, attribute: Attribute, params: &EvaluateParams<'_>) -> Option<f64> {
        Some(self.evaluate(attribute, params))
    }
}

/// Provider for actors that carry no attribute set at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAttributes;

impl AttributeProvider for NoAttributes {
    fn capture(&self, _attribute: Attribute, _params: &EvaluateParams<'_>) -> Option<f64> {
        None
    }
}

/// Captured damage-relevant attributes of one combatant
///
/// Getters for attributes that are logically non-negative floor at 0.
/// Resistances are returned raw; the aggregator clamps them to `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    level: u32,
    armor: f64,
    armor_penetration: f64,
    block_chance: f64,
    critical_hit_chance: f64,
    critical_hit_damage: f64,
    critical_hit_resistance: f64,
    fire_resistance: f64,
    lightning_resistance: f64,
    arcane_resistance: f64,
    physical_resistance: f64,
}

impl CombatantSnapshot {
    /// Empty snapshot: every attribute reads as 0
    pub fn new(level: u32) -> Self {
        CombatantSnapshot {
            level,
            ..Default::default()
        }
    }

    /// Capture the attributes `side` contributes to a damage execution
    pub fn capture(
        provider: &impl AttributeProvider,
        level: u32,
        side: CaptureSide,
        params: &EvaluateParams<'_>,
    ) -> Self {
        let mut snapshot = CombatantSnapshot::new(level);
        for definition in DAMAGE_CAPTURES.iter().filter(|d| d.side == side) {
            match provider.capture(definition.attribute, params) {
                Some(value) => snapshot.set(definition.attribute, value),
                None => tracing::debug!(
                    attribute = %definition.attribute,
                    ?side,
                    "attribute capture failed, using 0"
                ),
            }
        }
        snapshot
    }

    /// Set a captured value; attributes the damage execution never reads are ignored
    pub fn with(mut self, attribute: Attribute, value: f64) -> Self {
        self.set(attribute, value);
        self
    }

    fn set(&mut self, attribute: Attribute, value: f64) {
        if let Some(slot) = self.slot_mut(attribute) {
            *slot = value;
        }
    }

    fn slot_mut(&mut self, attribute: Attribute) -> Option<&mut f64> {
        match attribute {
            Attribute::Armor => Some(&mut self.armor),
            Attribute::ArmorPenetration => Some(&mut self.armor_penetration),
            Attribute::BlockChance => Some(&mut self.block_chance),
            Attribute::CriticalHitChance => Some(&mut self.critical_hit_chance),
            Attribute::CriticalHitDamage => Some(&mut self.critical_hit_damage),
            Attribute::CriticalHitResistance => Some(&mut self.critical_hit_resistance),
            Attribute::FireResistance => Some(&mut self.fire_resistance),
            Attribute::LightningResistance => Some(&mut self.lightning_resistance),
            Attribute::ArcaneResistance => Some(&mut self.arcane_resistance),
            Attribute::PhysicalResistance => Some(&mut self.physical_resistance),
            _ => None,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn armor(&self) -> f64 {
        self.armor.max(0.0)
    }

    pub fn armor_penetration(&self) -> f64 {
        self.armor_penetration.max(0.0)
    }

    pub fn block_chance(&self) -> f64 {
        self.block_chance.max(0.0)
    }

    pub fn critical_hit_chance(&self) -> f64 {
        self.critical_hit_chance.max(0.0)
    }

    pub fn critical_hit_damage(&self) -> f64 {
        self.critical_hit_damage.max(0.0)
    }

    pub fn critical_hit_resistance(&self) -> f64 {
        self.critical_hit_resistance.max(0.0)
    }

    pub fn fire_resistance(&self) -> f64 {
        self.fire_resistance
    }

    pub fn lightning_resistance(&self) -> f64 {
        self.lightning_resistance
    }

    pub fn arcane_resistance(&self) -> f64 {
        self.arcane_resistance
    }

    pub fn physical_resistance(&self) -> f64 {
        self.physical_resistance
    }

    /// Resistance bound to `damage_type`
    pub fn resistance(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Fire => self.fire_resistance(),
            DamageType::Lightning => self.lightning_resistance(),
            DamageType::Arcane => self.arcane_resistance(),
            DamageType::Physical => self.physical_resistance(),
        }
    }
}
