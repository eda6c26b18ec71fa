//! Core types shared across the engine

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The seven FASERIP abilities
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Ability {
    Fighting,
    Agility,
    Strength,
    Endurance,
    Reason,
    Intuition,
    Psyche,
}

impl Ability {
    /// Physical abilities, summed for Health
    pub fn physical() -> &'static [Ability] {
        &[
            Ability::Fighting,
            Ability::Agility,
            Ability::Strength,
            Ability::Endurance,
        ]
    }

    /// Mental abilities, summed for starting Karma
    pub fn mental() -> &'static [Ability] {
        &[Ability::Reason, Ability::Intuition, Ability::Psyche]
    }
}

/// Color result of a percentile roll, ordered from worst to best
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Color {
    White,
    Green,
    Yellow,
    Red,
}

impl Color {
    /// All colors in ascending order
    pub fn all() -> &'static [Color] {
        &[Color::White, Color::Green, Color::Yellow, Color::Red]
    }

    /// Position in the white < green < yellow < red ordering
    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Green => 1,
            Color::Yellow => 2,
            Color::Red => 3,
        }
    }

    /// Damage multiplier applied before resistance
    pub fn damage_multiplier(self) -> f64 {
        match self {
            Color::Red => 2.0,
            Color::Yellow => 1.5,
            Color::Green | Color::White => 1.0,
        }
    }
}

/// Damage category used to pick a resistance
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageCategory {
    Physical,
    Energy,
    Force,
}

/// Kind of effect a color result produces
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectKind {
    Miss,
    Damage,
    Slam,
    Stun,
    Kill,
    Bullseye,
    Hold,
    Partial,
    Take,
    Grab,
    Break,
    Escape,
    Reverse,
    ColumnShift,
    Evade,
    Catch,
    Stagger,
    None,
}

impl EffectKind {
    /// Whether this effect lands a damaging blow on the target
    pub fn inflicts_damage(self) -> bool {
        matches!(
            self,
            EffectKind::Damage
                | EffectKind::Slam
                | EffectKind::Stun
                | EffectKind::Kill
                | EffectKind::Bullseye
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_color_ordering() {
        assert!(Color::White < Color::Green);
        assert!(Color::Green < Color::Yellow);
        assert!(Color::Yellow < Color::Red);
        for (i, color) in Color::all().iter().enumerate() {
            assert_eq!(color.index(), i);
        }
    }

    #[test]
    fn test_damage_multipliers() {
        assert!((Color::Red.damage_multiplier() - 2.0).abs() < f64::EPSILON);
        assert!((Color::Yellow.damage_multiplier() - 1.5).abs() < f64::EPSILON);
        assert!((Color::Green.damage_multiplier() - 1.0).abs() < f64::EPSILON);
        assert!((Color::White.damage_multiplier() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_case_insensitive_parsing() {
        assert_eq!(DamageCategory::from_str("ENERGY").unwrap(), DamageCategory::Energy);
        assert_eq!(Ability::from_str("Strength").unwrap(), Ability::Strength);
        assert_eq!(EffectKind::from_str("column_shift").unwrap(), EffectKind::ColumnShift);
    }

    #[test]
    fn test_damage_bearing_kinds() {
        assert!(EffectKind::Kill.inflicts_damage());
        assert!(!EffectKind::Miss.inflicts_damage());
        assert!(!EffectKind::Hold.inflicts_damage());
        assert!(!EffectKind::ColumnShift.inflicts_damage());
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&EffectKind::ColumnShift).unwrap();
        assert_eq!(json, "\"column_shift\"");
    }
}
