//! # Material Specification
//!
//! A metal (type + grams) and up to three stone slots (type + carats). A slot
//! whose stone is `None` is unused; its carats are kept for round-tripping but
//! never priced.

use serde::{Deserialize, Serialize};

/// Metal type used when no source names one.
pub const UNKNOWN_METAL: &str = "Unknown";

/// Stored value of an unused stone slot.
pub const UNUSED_STONE: &str = "None";

/// Sentinel strings that mark a stone slot as unused (case-insensitive).
pub const UNUSED_SENTINELS: [&str; 2] = ["none", "none_selected"];

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoneSlot {
    pub stone: Option<String>,
    pub carats: f64,
}

impl StoneSlot {
    /// Builds a slot, mapping sentinel or blank stone names to unused.
    pub fn new(stone: impl AsRef<str>, carats: f64) -> Self {
        Self {
            stone: parse_stone(stone.as_ref()),
            carats,
        }
    }

    pub fn unused() -> Self {
        Self::default()
    }

    pub fn is_used(&self) -> bool {
        self.stone.is_some()
    }

    /// The stone name as stored in the details blob.
    pub fn label(&self) -> &str {
        self.stone.as_deref().unwrap_or(UNUSED_STONE)
    }
}

/// Interprets a stored stone name. Sentinels and blanks mean "unused".
pub fn parse_stone(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || UNUSED_SENTINELS
            .iter()
            .any(|s| trimmed.eq_ignore_ascii_case(s))
    {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// The three stone positions of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoneRole {
    Primary,
    Secondary,
    Other,
}

impl StoneRole {
    pub const ALL: [StoneRole; 3] = [StoneRole::Primary, StoneRole::Secondary, StoneRole::Other];

    /// Details-blob key holding the stone name.
    pub fn stone_key(self) -> &'static str {
        match self {
            StoneRole::Primary => "primaryStone",
            StoneRole::Secondary => "secondaryStone",
            StoneRole::Other => "otherStone",
        }
    }

    /// Details-blob key holding the carat weight.
    pub fn weight_key(self) -> &'static str {
        match self {
            StoneRole::Primary => "primaryStoneWeight",
            StoneRole::Secondary => "secondaryStoneWeight",
            StoneRole::Other => "otherStoneWeight",
        }
    }
}

pub const METAL_TYPE_KEY: &str = "metalType";
pub const METAL_WEIGHT_KEY: &str = "metalWeight";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub metal_type: String,
    /// Grams.
    pub metal_weight: f64,
    pub primary: StoneSlot,
    pub secondary: StoneSlot,
    pub other: StoneSlot,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            metal_type: UNKNOWN_METAL.to_string(),
            metal_weight: 0.0,
            primary: StoneSlot::unused(),
            secondary: StoneSlot::unused(),
            other: StoneSlot::unused(),
        }
    }
}

impl MaterialSpec {
    pub fn new(metal_type: impl Into<String>, metal_weight: f64) -> Self {
        Self {
            metal_type: metal_type.into(),
            metal_weight,
            ..Self::default()
        }
    }

    pub fn with_stone(mut self, role: StoneRole, stone: impl AsRef<str>, carats: f64) -> Self {
        *self.slot_mut(role) = StoneSlot::new(stone, carats);
        self
    }

    pub fn slot(&self, role: StoneRole) -> &StoneSlot {
        match role {
            StoneRole::Primary => &self.primary,
            StoneRole::Secondary => &self.secondary,
            StoneRole::Other => &self.other,
        }
    }

    pub fn slot_mut(&mut self, role: StoneRole) -> &mut StoneSlot {
        match role {
            StoneRole::Primary => &mut self.primary,
            StoneRole::Secondary => &mut self.secondary,
            StoneRole::Other => &mut self.other,
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = (StoneRole, &StoneSlot)> {
        StoneRole::ALL.into_iter().map(move |role| (role, self.slot(role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_mark_slot_unused() {
        assert!(!StoneSlot::new("None", 2.0).is_used());
        assert!(!StoneSlot::new("NONE_SELECTED", 2.0).is_used());
        assert!(!StoneSlot::new("  ", 2.0).is_used());
        assert_eq!(StoneSlot::new(" Ruby ", 1.5).stone.as_deref(), Some("Ruby"));
        assert_eq!(StoneSlot::unused().label(), "None");
    }

    #[test]
    fn test_builder_fills_slots() {
        let spec = MaterialSpec::new("Gold", 10.0)
            .with_stone(StoneRole::Primary, "Diamond", 0.5)
            .with_stone(StoneRole::Other, "none_selected", 3.0);
        assert_eq!(spec.primary.stone.as_deref(), Some("Diamond"));
        assert!(!spec.secondary.is_used());
        assert!(!spec.other.is_used());
        assert_eq!(spec.other.carats, 3.0);
        assert_eq!(spec.slots().filter(|(_, s)| s.is_used()).count(), 1);
    }
}
