//! Combatant attributes - primary, secondary, resistance and vital values

mod attribute_value;
mod formulas;

pub use attribute_value::{AttributeModifier, AttributeValue, EvaluateParams, ModifierOp};
pub use formulas::{AttributeFormula, AttributeFormulas};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping used for display and derivation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeCategory {
    Primary,
    Secondary,
    Resistance,
    Vital,
    Meta,
}

/// Identifier of every attribute a combatant can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    // Primary
    Strength,
    Intelligence,
    Resilience,
    Vigor,
    // Secondary
    Armor,
    ArmorPenetration,
    BlockChance,
    CriticalHitChance,
    CriticalHitDamage,
    CriticalHitResistance,
    HealthRegeneration,
    ManaRegeneration,
    MaxHealth,
    MaxMana,
    // Resistances
    FireResistance,
    LightningResistance,
    ArcaneResistance,
    PhysicalResistance,
    // Vital
    Health,
    Mana,
    /// Meta attribute: damage waiting to be subtracted from Health
    IncomingDamage,
}

impl Attribute {
    pub const ALL: [Attribute; 21] = [
        Attribute::Strength,
        Attribute::Intelligence,
        Attribute::Resilience,
        Attribute::Vigor,
        Attribute::Armor,
        Attribute::ArmorPenetration,
        Attribute::BlockChance,
        Attribute::CriticalHitChance,
        Attribute::CriticalHitDamage,
        Attribute::CriticalHitResistance,
        Attribute::HealthRegeneration,
        Attribute::ManaRegeneration,
        Attribute::MaxHealth,
        Attribute::MaxMana,
        Attribute::FireResistance,
        Attribute::LightningResistance,
        Attribute::ArcaneResistance,
        Attribute::PhysicalResistance,
        Attribute::Health,
        Attribute::Mana,
        Attribute::IncomingDamage,
    ];

    pub fn category(self) -> AttributeCategory {
        use Attribute::*;
        match self {
            Strength | Intelligence | Resilience | Vigor => AttributeCategory::Primary,
            Armor | ArmorPenetration | BlockChance | CriticalHitChance | CriticalHitDamage
            | CriticalHitResistance | HealthRegeneration | ManaRegeneration | MaxHealth
            | MaxMana => AttributeCategory::Secondary,
            FireResistance | LightningResistance | ArcaneResistance | PhysicalResistance => {
                AttributeCategory::Resistance
            }
            Health | Mana => AttributeCategory::Vital,
            IncomingDamage => AttributeCategory::Meta,
        }
    }

    /// Hierarchical tag name, e.g. `Attributes.Secondary.Armor`
    pub fn tag(self) -> &'static str {
        use Attribute::*;
        match self {
            Strength => "Attributes.Primary.Strength",
            Intelligence => "Attributes.Primary.Intelligence",
            Resilience => "Attributes.Primary.Resilience",
            Vigor => "Attributes.Primary.Vigor",
            Armor => "Attributes.Secondary.Armor",
            ArmorPenetration => "Attributes.Secondary.ArmorPenetration",
            BlockChance => "Attributes.Secondary.BlockChance",
            CriticalHitChance => "Attributes.Secondary.CriticalHitChance",
            CriticalHitDamage => "Attributes.Secondary.CriticalHitDamage",
            CriticalHitResistance => "Attributes.Secondary.CriticalHitResistance",
            HealthRegeneration => "Attributes.Secondary.HealthRegeneration",
            ManaRegeneration => "Attributes.Secondary.ManaRegeneration",
            MaxHealth => "Attributes.Secondary.MaxHealth",
            MaxMana => "Attributes.Secondary.MaxMana",
            FireResistance => "Attributes.Resistance.Fire",
            LightningResistance => "Attributes.Resistance.Lightning",
            ArcaneResistance => "Attributes.Resistance.Arcane",
            PhysicalResistance => "Attributes.Resistance.Physical",
            Health => "Attributes.Vital.Health",
            Mana => "Attributes.Vital.Mana",
            IncomingDamage => "Attributes.Meta.IncomingDamage",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Before/after values of a committed attribute change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeChange {
    pub attribute: Attribute,
    pub before: f64,
    pub after: f64,
}

impl AttributeChange {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

/// Complete attribute state for one combatant
///
/// Fields are private: outside this crate the set is read through
/// [`AttributeSet::value`] / [`AttributeSet::current`] and changed through
/// gameplay effects, which keeps Health and Mana inside `[0, Max]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSet {
    // === Primary ===
    strength: AttributeValue,
    intelligence: AttributeValue,
    resilience: AttributeValue,
    vigor: AttributeValue,

    // === Secondary ===
    armor: AttributeValue,
    armor_penetration: AttributeValue,
    block_chance: AttributeValue,
    critical_hit_chance: AttributeValue,
    critical_hit_damage: AttributeValue,
    critical_hit_resistance: AttributeValue,
    health_regeneration: AttributeValue,
    mana_regeneration: AttributeValue,
    max_health: AttributeValue,
    max_mana: AttributeValue,

    // === Resistances ===
    fire_resistance: AttributeValue,
    lightning_resistance: AttributeValue,
    arcane_resistance: AttributeValue,
    physical_resistance: AttributeValue,

    // === Vital ===
    health: AttributeValue,
    mana: AttributeValue,

    // === Meta ===
    #[serde(skip)]
    incoming_damage: AttributeValue,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used when constructing a combatant's starting attributes
    ///
    /// Vitals are clamped on every call, so set `MaxHealth`/`MaxMana`
    /// before `Health`/`Mana`.
    pub fn with_base(mut self, attribute: Attribute, base: f64) -> Self {
        self.value_mut(attribute).base = base;
        self.clamp_vitals();
        self
    }

    pub fn value(&self, attribute: Attribute) -> &AttributeValue {
        use Attribute::*;
        match attribute {
            Strength => &self.strength,
            Intelligence => &self.intelligence,
            Resilience => &self.resilience,
            Vigor => &self.vigor,
            Armor => &self.armor,
            ArmorPenetration => &self.armor_penetration,
            BlockChance => &self.block_chance,
            CriticalHitChance => &self.critical_hit_chance,
            CriticalHitDamage => &self.critical_hit_damage,
            CriticalHitResistance => &self.critical_hit_resistance,
            HealthRegeneration => &self.health_regeneration,
            ManaRegeneration => &self.mana_regeneration,
            MaxHealth => &self.max_health,
            MaxMana => &self.max_mana,
            FireResistance => &self.fire_resistance,
            LightningResistance => &self.lightning_resistance,
            ArcaneResistance => &self.arcane_resistance,
            PhysicalResistance => &self.physical_resistance,
            Health => &self.health,
            Mana => &self.mana,
            IncomingDamage => &self.incoming_damage,
        }
    }

    pub(crate) fn value_mut(&mut self, attribute: Attribute) -> &mut AttributeValue {
        use Attribute::*;
        match attribute {
            Strength => &mut self.strength,
            Intelligence => &mut self.intelligence,
            Resilience => &mut self.resilience,
            Vigor => &mut self.vigor,
            Armor => &mut self.armor,
            ArmorPenetration => &mut self.armor_penetration,
            BlockChance => &mut self.block_chance,
            CriticalHitChance => &mut self.critical_hit_chance,
            CriticalHitDamage => &mut self.critical_hit_damage,
            CriticalHitResistance => &mut self.critical_hit_resistance,
            HealthRegeneration => &mut self.health_regeneration,
            ManaRegeneration => &mut self.mana_regeneration,
            MaxHealth => &mut self.max_health,
            MaxMana => &mut self.max_mana,
            FireResistance => &mut self.fire_resistance,
            LightningResistance => &mut self.lightning_resistance,
            ArcaneResistance => &mut self.arcane_resistance,
            PhysicalResistance => &mut self.physical_resistance,
            Health => &mut self.health,
            Mana => &mut self.mana,
            IncomingDamage => &mut self.incoming_damage,
        }
    }

    /// Current value counting unconditional modifiers only
    pub fn current(&self, attribute: Attribute) -> f64 {
        self.value(attribute).compute()
    }

    /// Current value under the given source/target tags
    pub fn evaluate(&self, attribute: Attribute, params: &EvaluateParams<'_>) -> f64 {
        self.value(attribute).evaluate(params)
    }

    pub fn health(&self) -> f64 {
        self.current(Attribute::Health)
    }

    pub fn max_health(&self) -> f64 {
        self.current(Attribute::MaxHealth)
    }

    pub fn mana(&self) -> f64 {
        self.current(Attribute::Mana)
    }

    pub fn max_mana(&self) -> f64 {
        self.current(Attribute::MaxMana)
    }

    pub fn is_alive(&self) -> bool {
        self.health() > 0.0
    }

    /// Clamp a proposed new value before it is committed
    fn pre_attribute_change(&self, attribute: Attribute, new_value: f64) -> f64 {
        match attribute {
            Attribute::Health => new_value.clamp(0.0, self.max_health().max(0.0)),
            Attribute::Mana => new_value.clamp(0.0, self.max_mana().max(0.0)),
            _ => new_value,
        }
    }

    /// Keep Health and Mana inside `[0, Max]` after maxima change
    fn clamp_vitals(&mut self) {
        let health = self.pre_attribute_change(Attribute::Health, self.health.base);
        self.health.base = health;
        let mana = self.pre_attribute_change(Attribute::Mana, self.mana.base);
        self.mana.base = mana;
    }

    /// Permanently change an attribute's base value (instant effect path)
    ///
    /// Writing to `IncomingDamage` is converted into a Health loss and the
    /// returned change describes Health.
    pub(crate) fn apply_instant(
        &mut self,
        attribute: Attribute,
        op: ModifierOp,
        magnitude: f64,
    ) -> AttributeChange {
        let base = self.value(attribute).base;
        let proposed = match op {
            ModifierOp::Add => base + magnitude,
            ModifierOp::Multiply => base * magnitude,
            ModifierOp::Divide if magnitude.abs() < f64::EPSILON => base,
            ModifierOp::Divide => base / magnitude,
            ModifierOp::Override => magnitude,
        };

        if attribute == Attribute::IncomingDamage {
            self.incoming_damage.base = proposed;
            return self.consume_incoming_damage();
        }

        let before = self.current(attribute);
        let committed = self.pre_attribute_change(attribute, proposed);
        self.value_mut(attribute).base = committed;
        self.post_effect_execute(attribute);

        AttributeChange {
            attribute,
            before,
            after: self.current(attribute),
        }
    }

    /// Add `damage` to the incoming damage accumulator and apply it to Health
    pub(crate) fn apply_incoming_damage(&mut self, damage: f64) -> AttributeChange {
        self.apply_instant(Attribute::IncomingDamage, ModifierOp::Add, damage)
    }

    fn consume_incoming_damage(&mut self) -> AttributeChange {
        let before = self.health();
        let incoming = std::mem::take(&mut self.incoming_damage.base);
        if incoming > 0.0 {
            let new_health = self.pre_attribute_change(Attribute::Health, self.health.base - incoming);
            self.health.base = new_health;
        }
        AttributeChange {
            attribute: Attribute::Health,
            before,
            after: self.health(),
        }
    }

    fn post_effect_execute(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::Health | Attribute::Mana | Attribute::MaxHealth | Attribute::MaxMana => {
                self.clamp_vitals()
            }
            _ => {}
        }
    }

    /// Called after modifiers were added or removed
    pub(crate) fn on_modifiers_changed(&mut self) {
        self.clamp_vitals();
    }

    /// Fill Health and Mana to their maxima
    pub(crate) fn refill_vitals(&mut self) {
        self.health.base = self.max_health().max(0.0);
        self.mana.base = self.max_mana().max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vital_set() -> AttributeSet {
        AttributeSet::new()
            .with_base(Attribute::MaxHealth, 100.0)
            .with_base(Attribute::MaxMana, 50.0)
            .with_base(Attribute::Health, 100.0)
            .with_base(Attribute::Mana, 50.0)
    }

    #[test]
    fn test_health_clamped_to_max() {
        let mut set = vital_set();
        let change = set.apply_instant(Attribute::Health, ModifierOp::Add, 40.0);
        assert!((change.after - 100.0).abs() < f64::EPSILON);
        assert!((set.health() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mana_clamped_to_zero() {
        let mut set = vital_set();
        set.apply_instant(Attribute::Mana, ModifierOp::Add, -80.0);
        assert!((set.mana() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_incoming_damage_reduces_health() {
        let mut set = vital_set();
        let change = set.apply_incoming_damage(30.0);
        assert_eq!(change.attribute, Attribute::Health);
        assert!((change.before - 100.0).abs() < f64::EPSILON);
        assert!((change.after - 70.0).abs() < f64::EPSILON);
        assert!((set.current(Attribute::IncomingDamage) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_incoming_damage_floors_at_zero() {
        let mut set = vital_set();
        set.apply_incoming_damage(1000.0);
        assert!((set.health() - 0.0).abs() < f64::EPSILON);
        assert!(!set.is_alive());
    }

    #[test]
    fn test_negative_incoming_damage_ignored() {
        let mut set = vital_set();
        set.apply_incoming_damage(-20.0);
        assert!((set.health() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lowering_max_health_clamps_health() {
        let mut set = vital_set();
        set.apply_instant(Attribute::MaxHealth, ModifierOp::Override, 60.0);
        assert!((set.health() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attribute_tags_unique() {
        let mut tags: Vec<&str> = Attribute::ALL.iter().map(|a| a.tag()).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), Attribute::ALL.len());
    }

    #[test]
    fn test_categories() {
        assert_eq!(Attribute::Vigor.category(), AttributeCategory::Primary);
        assert_eq!(Attribute::BlockChance.category(), AttributeCategory::Secondary);
        assert_eq!(Attribute::ArcaneResistance.category(), AttributeCategory::Resistance);
        assert_eq!(Attribute::IncomingDamage.category(), AttributeCategory::Meta);
    }

    #[test]
    fn test_parse_partial_set() {
        let set: AttributeSet = toml::from_str(
            r#"
[armor]
base = 12.0

[fire_resistance]
base = 40.0
"#,
        )
        .unwrap();
        assert!((set.current(Attribute::Armor) - 12.0).abs() < f64::EPSILON);
        assert!((set.current(Attribute::FireResistance) - 40.0).abs() < f64::EPSILON);
        assert!((set.current(Attribute::Strength) - 0.0).abs() < f64::EPSILON);
    }
}
