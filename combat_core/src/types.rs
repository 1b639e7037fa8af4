//! Core types shared across combat_core

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Character class, selects default attributes and damage coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Elementalist,
    Warrior,
    Ranger,
}

impl CharacterClass {
    /// Get all character classes
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Elementalist,
            CharacterClass::Warrior,
            CharacterClass::Ranger,
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharacterClass::Elementalist => "elementalist",
            CharacterClass::Warrior => "warrior",
            CharacterClass::Ranger => "ranger",
        };
        f.write_str(name)
    }
}

/// Which side a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    /// Tag every member of the team owns
    pub fn tag(self) -> &'static str {
        match self {
            Team::Player => "Player",
            Team::Enemy => "Enemy",
        }
    }
}

/// Hierarchical dot-separated tag, e.g. `Status.Burning`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameplayTag(pub String);

impl GameplayTag {
    pub fn new(name: impl Into<String>) -> Self {
        GameplayTag(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if this tag equals `query` or is a descendant of it.
    ///
    /// `Status.Burning` matches `Status` and `Status.Burning`, but not
    /// `Stat` or `Status.Burning.Intense`.
    pub fn matches(&self, query: &GameplayTag) -> bool {
        match self.0.strip_prefix(query.as_str()) {
            Some("") => true,
            Some(rest) => rest.starts_with('.'),
            None => false,
        }
    }
}

impl From<&str> for GameplayTag {
    fn from(s: &str) -> Self {
        GameplayTag(s.to_string())
    }
}

impl fmt::Display for GameplayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Set of gameplay tags owned by a combatant or required by a modifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagContainer(BTreeSet<GameplayTag>);

impl TagContainer {
    pub const fn new() -> Self {
        TagContainer(BTreeSet::new())
    }

    pub fn insert(&mut self, tag: impl Into<GameplayTag>) {
        self.0.insert(tag.into());
    }

    pub fn remove(&mut self, tag: &GameplayTag) -> bool {
        self.0.remove(tag)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameplayTag> {
        self.0.iter()
    }

    /// True if any owned tag matches `query` (exactly or as a child)
    pub fn has_tag(&self, query: &GameplayTag) -> bool {
        self.0.iter().any(|tag| tag.matches(query))
    }

    /// True if every tag in `required` is matched by this container
    pub fn has_all(&self, required: &TagContainer) -> bool {
        required.iter().all(|tag| self.has_tag(tag))
    }
}

impl<T: Into<GameplayTag>> FromIterator<T> for TagContainer {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TagContainer(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_matches_parent() {
        let tag = GameplayTag::from("Status.Burning");
        assert!(tag.matches(&"Status".into()));
        assert!(tag.matches(&"Status.Burning".into()));
        assert!(!tag.matches(&"Stat".into()));
        assert!(!tag.matches(&"Status.Burning.Intense".into()));
    }

    #[test]
    fn test_container_has_all() {
        let owned: TagContainer = ["Status.Burning", "Team.Enemy"].into_iter().collect();
        let required: TagContainer = ["Status", "Team.Enemy"].into_iter().collect();
        assert!(owned.has_all(&required));

        let missing: TagContainer = ["Status.Frozen"].into_iter().collect();
        assert!(!owned.has_all(&missing));
        assert!(owned.has_all(&TagContainer::new()));
    }

    #[test]
    fn test_class_display() {
        assert_eq!(CharacterClass::Elementalist.to_string(), "elementalist");
        assert_eq!(CharacterClass::all().len(), 3);
    }
}
