//! Resistance - Flat damage reduction by damage category
//!
//! A combatant lists any number of resistance entries. The entry used is the
//! first whose type matches the attack's damage category (case-insensitive);
//! no matching entry means no resistance.

use crate::action::ActionType;
use crate::combatant::Combatant;
use crate::error::CombatError;
use crate::types::DamageCategory;
use serde::{Deserialize, Serialize};

/// One resistance held by a combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResistanceEntry {
    /// Damage category name ("physical", "energy", "force")
    #[serde(rename = "type")]
    pub kind: String,
    pub number: u32,
}

impl ResistanceEntry {
    pub fn new(kind: &str, number: u32) -> Self {
        ResistanceEntry {
            kind: kind.to_string(),
            number,
        }
    }

    pub fn matches(&self, category: DamageCategory) -> bool {
        self.kind.trim().eq_ignore_ascii_case(category.as_ref())
    }
}

/// First matching resistance number for a category, or 0
pub fn resistance_against(entries: &[ResistanceEntry], category: DamageCategory) -> u32 {
    entries
        .iter()
        .find(|entry| entry.matches(category))
        .map_or(0, |entry| entry.number)
}

/// Resistance the target applies against an action
pub fn resistance_for(target: &(impl Combatant + ?Sized), action: ActionType) -> u32 {
    resistance_against(target.resistances(), action.damage_category())
}

/// Resistance the target applies against an action code
pub fn resistance_for_code(
    target: &(impl Combatant + ?Sized),
    action_code: &str,
) -> Result<u32, CombatError> {
    let action = ActionType::from_code(action_code)?;
    Ok(resistance_for(target, action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CombatantSheet;

    fn armored() -> CombatantSheet {
        let mut sheet = CombatantSheet::new("Iron Knight");
        sheet.resistances = vec![
            ResistanceEntry::new("Physical", 15),
            ResistanceEntry::new("energy", 10),
            ResistanceEntry::new("physical", 99),
        ];
        sheet
    }

    #[test]
    fn test_first_match_wins() {
        let target = armored();
        assert_eq!(resistance_for(&target, ActionType::BluntAttack), 15);
    }

    #[test]
    fn test_case_insensitive_match() {
        let target = armored();
        assert_eq!(resistance_for(&target, ActionType::Energy), 10);
        assert_eq!(resistance_for_code(&target, "en").unwrap(), 10);
    }

    #[test]
    fn test_no_matching_entry_is_zero() {
        let target = armored();
        assert_eq!(resistance_for(&target, ActionType::Force), 0);

        let bare = CombatantSheet::new("Civilian");
        assert_eq!(resistance_for(&bare, ActionType::Shooting), 0);
    }

    #[test]
    fn test_unknown_code_fails() {
        let target = armored();
        assert_eq!(
            resistance_for_code(&target, "Qq"),
            Err(CombatError::UnknownActionType("Qq".to_string()))
        );
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let target = armored();
        let first = resistance_for(&target, ActionType::EdgedAttack);
        let second = resistance_for(&target, ActionType::EdgedAttack);
        assert_eq!(first, second);
    }

    #[test]
    fn test_deserialize_entry() {
        let entry: ResistanceEntry = serde_json::from_str(r#"{"type": "Force", "number": 20}"#).unwrap();
        assert!(entry.matches(DamageCategory::Force));
        assert_eq!(entry.number, 20);
    }
}
