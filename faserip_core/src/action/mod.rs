//! Action types and the battle effects catalog

mod catalog;

pub use catalog::{ActionCatalog, ActionDefinition, ColorOutcome, EffectDescriptor};

use crate::error::CombatError;
use crate::types::{Ability, DamageCategory};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Every action code on the battle effects table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum ActionType {
    #[serde(rename = "BA")]
    #[strum(serialize = "BA")]
    BluntAttack,
    #[serde(rename = "EA")]
    #[strum(serialize = "EA")]
    EdgedAttack,
    #[serde(rename = "Sh")]
    #[strum(serialize = "Sh")]
    Shooting,
    #[serde(rename = "TE")]
    #[strum(serialize = "TE")]
    ThrowingEdged,
    #[serde(rename = "TB")]
    #[strum(serialize = "TB")]
    ThrowingBlunt,
    #[serde(rename = "En")]
    #[strum(serialize = "En")]
    Energy,
    #[serde(rename = "Fo")]
    #[strum(serialize = "Fo")]
    Force,
    #[serde(rename = "Gp")]
    #[strum(serialize = "Gp")]
    Grappling,
    #[serde(rename = "Gb")]
    #[strum(serialize = "Gb")]
    Grabbing,
    #[serde(rename = "Es")]
    #[strum(serialize = "Es")]
    Escaping,
    #[serde(rename = "Ch")]
    #[strum(serialize = "Ch")]
    Charging,
    #[serde(rename = "Do")]
    #[strum(serialize = "Do")]
    Dodging,
    #[serde(rename = "Ev")]
    #[strum(serialize = "Ev")]
    Evading,
    #[serde(rename = "Bl")]
    #[strum(serialize = "Bl")]
    Blocking,
    #[serde(rename = "Ca")]
    #[strum(serialize = "Ca")]
    Catching,
    #[serde(rename = "St")]
    #[strum(serialize = "St")]
    StunCheck,
    #[serde(rename = "Sl")]
    #[strum(serialize = "Sl")]
    SlamCheck,
    #[serde(rename = "Ki")]
    #[strum(serialize = "Ki")]
    KillCheck,
}

/// How an action is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCategory {
    BluntMelee,
    EdgedMelee,
    Charge,
    Ranged,
    Wrestling,
    Defensive,
    EnduranceCheck,
}

/// Where an action's base damage comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaseDamageRule {
    /// Attacker's Strength number
    Strength,
    /// Higher of Strength and the weapon's damage
    StrengthOrWeapon,
    /// Weapon (or power) damage alone
    Weapon,
    /// Action never deals damage
    None,
}

impl ActionType {
    /// Parse an action code, ignoring case
    pub fn from_code(code: &str) -> Result<Self, CombatError> {
        code.trim()
            .parse()
            .map_err(|_| CombatError::UnknownActionType(code.to_string()))
    }

    /// Short code as printed on the battle effects table
    pub fn code(self) -> String {
        self.to_string()
    }

    pub fn category(self) -> ActionCategory {
        use ActionType::*;
        match self {
            BluntAttack => ActionCategory::BluntMelee,
            EdgedAttack => ActionCategory::EdgedMelee,
            Charging => ActionCategory::Charge,
            Shooting | ThrowingEdged | ThrowingBlunt | Energy | Force => ActionCategory::Ranged,
            Grappling | Grabbing | Escaping => ActionCategory::Wrestling,
            Dodging | Evading | Blocking | Catching => ActionCategory::Defensive,
            StunCheck | SlamCheck | KillCheck => ActionCategory::EnduranceCheck,
        }
    }

    /// Ability rolled for this action
    pub fn ability(self) -> Ability {
        use ActionType::*;
        match self {
            BluntAttack | EdgedAttack | Evading => Ability::Fighting,
            Shooting | ThrowingEdged | ThrowingBlunt | Energy | Force | Dodging | Catching => {
                Ability::Agility
            }
            Grappling | Grabbing | Escaping | Blocking => Ability::Strength,
            Charging | StunCheck | SlamCheck | KillCheck => Ability::Endurance,
        }
    }

    pub fn base_damage_rule(self) -> BaseDamageRule {
        match self.category() {
            ActionCategory::BluntMelee | ActionCategory::Charge => BaseDamageRule::Strength,
            ActionCategory::EdgedMelee => BaseDamageRule::StrengthOrWeapon,
            ActionCategory::Ranged => BaseDamageRule::Weapon,
            ActionCategory::Wrestling
            | ActionCategory::Defensive
            | ActionCategory::EnduranceCheck => BaseDamageRule::None,
        }
    }

    /// Damage category the target resists with
    pub fn damage_category(self) -> DamageCategory {
        match self {
            ActionType::Energy => DamageCategory::Energy,
            ActionType::Force => DamageCategory::Force,
            _ => DamageCategory::Physical,
        }
    }

    pub fn is_wrestling(self) -> bool {
        self.category() == ActionCategory::Wrestling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_codes_parse_case_insensitively() {
        assert_eq!(ActionType::from_code("EA").unwrap(), ActionType::EdgedAttack);
        assert_eq!(ActionType::from_code("ea").unwrap(), ActionType::EdgedAttack);
        assert_eq!(ActionType::from_code("sh").unwrap(), ActionType::Shooting);
        assert_eq!(ActionType::from_code("GB").unwrap(), ActionType::Grabbing);
        assert_eq!(ActionType::from_code(" Gp ").unwrap(), ActionType::Grappling);
        assert_eq!(
            ActionType::from_code("Zz"),
            Err(CombatError::UnknownActionType("Zz".to_string()))
        );
    }

    #[test]
    fn test_codes_round_trip_display() {
        for action in ActionType::iter() {
            assert_eq!(ActionType::from_code(&action.code()).unwrap(), action);
        }
        assert_eq!(ActionType::Shooting.code(), "Sh");
    }

    #[test]
    fn test_wrestling_codes() {
        let wrestling: Vec<_> = ActionType::iter().filter(|a| a.is_wrestling()).collect();
        assert_eq!(
            wrestling,
            vec![ActionType::Grappling, ActionType::Grabbing, ActionType::Escaping]
        );
    }

    #[test]
    fn test_damage_categories() {
        assert_eq!(ActionType::Energy.damage_category(), DamageCategory::Energy);
        assert_eq!(ActionType::Force.damage_category(), DamageCategory::Force);
        assert_eq!(ActionType::BluntAttack.damage_category(), DamageCategory::Physical);
        assert_eq!(ActionType::Grappling.damage_category(), DamageCategory::Physical);
    }

    #[test]
    fn test_base_damage_rules() {
        assert_eq!(ActionType::BluntAttack.base_damage_rule(), BaseDamageRule::Strength);
        assert_eq!(ActionType::Charging.base_damage_rule(), BaseDamageRule::Strength);
        assert_eq!(ActionType::EdgedAttack.base_damage_rule(), BaseDamageRule::StrengthOrWeapon);
        assert_eq!(ActionType::ThrowingBlunt.base_damage_rule(), BaseDamageRule::Weapon);
        assert_eq!(ActionType::Dodging.base_damage_rule(), BaseDamageRule::None);
    }
}
