//! Battle effects catalog - What each color means for each action

use super::ActionType;
use crate::error::CombatError;
use crate::types::{Ability, Color, EffectKind};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Result of one color column for an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOutcome {
    /// Short label as printed on the table (e.g. "Slam", "-2 CS")
    pub label: String,
    pub kind: EffectKind,
    #[serde(default)]
    pub description: String,
    /// Numeric payload such as the column shift granted
    #[serde(default)]
    pub value: Option<i32>,
}

impl ColorOutcome {
    pub fn new(label: &str, kind: EffectKind, description: &str) -> Self {
        ColorOutcome {
            label: label.to_string(),
            kind,
            description: description.to_string(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: i32) -> Self {
        self.value = Some(value);
        self
    }

    fn miss() -> Self {
        ColorOutcome::new("Miss", EffectKind::Miss, "The action fails.")
    }
}

/// Catalog entry for one action type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDefinition {
    pub action: ActionType,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub white: ColorOutcome,
    pub green: ColorOutcome,
    pub yellow: ColorOutcome,
    pub red: ColorOutcome,
}

impl ActionDefinition {
    /// Governing ability, fixed by the action type
    pub fn ability(&self) -> Ability {
        self.action.ability()
    }

    pub fn outcome(&self, color: Color) -> &ColorOutcome {
        match color {
            Color::White => &self.white,
            Color::Green => &self.green,
            Color::Yellow => &self.yellow,
            Color::Red => &self.red,
        }
    }
}

/// Effect produced by an action at a given color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectDescriptor {
    /// `None` when the action code itself could not be resolved
    pub action: Option<ActionType>,
    pub color: Color,
    pub label: String,
    pub kind: EffectKind,
    pub description: String,
    pub value: Option<i32>,
}

impl EffectDescriptor {
    /// The effect of a failed or rejected action
    pub fn miss(action: Option<ActionType>) -> Self {
        let outcome = ColorOutcome::miss();
        EffectDescriptor {
            action,
            color: Color::White,
            label: outcome.label,
            kind: outcome.kind,
            description: outcome.description,
            value: None,
        }
    }

    pub fn is_miss(&self) -> bool {
        self.kind == EffectKind::Miss
    }
}

/// All action definitions, keyed by action type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCatalog {
    actions: Vec<ActionDefinition>,
}

impl ActionCatalog {
    pub fn new(mut actions: Vec<ActionDefinition>) -> Self {
        actions.sort_by_key(|a| a.action);
        ActionCatalog { actions }
    }

    pub fn definitions(&self) -> &[ActionDefinition] {
        &self.actions
    }

    pub fn get(&self, action: ActionType) -> Result<&ActionDefinition, CombatError> {
        self.actions
            .iter()
            .find(|a| a.action == action)
            .ok_or(CombatError::MissingActionDefinition(action))
    }

    /// Look up a definition by its (case-insensitive) code
    pub fn lookup(&self, code: &str) -> Result<&ActionDefinition, CombatError> {
        self.get(ActionType::from_code(code)?)
    }

    /// Effect of `action` at `color`; white is always a miss
    pub fn effect_for(&self, action: ActionType, color: Color) -> Result<EffectDescriptor, CombatError> {
        let definition = self.get(action)?;
        let outcome = definition.outcome(color);
        let kind = if color == Color::White {
            EffectKind::Miss
        } else {
            outcome.kind
        };

        Ok(EffectDescriptor {
            action: Some(action),
            color,
            label: outcome.label.clone(),
            kind,
            description: outcome.description.clone(),
            value: outcome.value,
        })
    }

    /// Action types without a definition
    pub fn missing_actions(&self) -> Vec<ActionType> {
        ActionType::iter()
            .filter(|action| self.get(*action).is_err())
            .collect()
    }

    /// The standard battle effects table
    pub fn standard() -> Self {
        use ActionType::*;
        use EffectKind as K;

        let hit = || ColorOutcome::new("Hit", K::Damage, "The attack connects for normal damage.");
        let slam = || ColorOutcome::new("Slam", K::Slam, "Target must make a Slam check.");
        let stun = || ColorOutcome::new("Stun", K::Stun, "Target must make a Stun check.");
        let kill = || ColorOutcome::new("Kill", K::Kill, "Target must make a Kill check.");
        let bullseye =
            || ColorOutcome::new("Bullseye", K::Bullseye, "The attack strikes exactly where aimed.");
        let no_effect = || ColorOutcome::new("No effect", K::None, "The target shrugs it off.");
        let shift = |n: i32| {
            let label = if n > 0 { format!("+{} CS", n) } else { format!("{} CS", n) };
            ColorOutcome::new(&label, K::ColumnShift, "Shifts the incoming attack's column.")
                .with_value(n)
        };

        let def = |action: ActionType,
                   name: &str,
                   description: &str,
                   green: ColorOutcome,
                   yellow: ColorOutcome,
                   red: ColorOutcome| ActionDefinition {
            action,
            name: name.to_string(),
            description: description.to_string(),
            white: ColorOutcome::miss(),
            green,
            yellow,
            red,
        };

        ActionCatalog::new(vec![
            def(BluntAttack, "Blunt Attack", "Fists, clubs and other blunt melee strikes.", hit(), slam(), stun()),
            def(EdgedAttack, "Edged Attack", "Knives, swords and claws in melee.", hit(), stun(), kill()),
            def(Shooting, "Shooting", "Guns, bows and other projectile weapons.", hit(), bullseye(), kill()),
            def(ThrowingEdged, "Throwing Edged", "Thrown knives, shuriken and spears.", hit(), stun(), kill()),
            def(ThrowingBlunt, "Throwing Blunt", "Thrown rocks, shields and other blunt objects.", hit(), bullseye(), stun()),
            def(Energy, "Energy", "Energy blasts such as lasers, fire and lightning.", hit(), bullseye(), kill()),
            def(Force, "Force", "Force bolts and concussive blasts.", hit(), bullseye(), stun()),
            def(
                Grappling,
                "Grappling",
                "Attempt to pin and hold the target.",
                ColorOutcome::new("Miss", K::Miss, "The target slips free."),
                ColorOutcome::new("Partial", K::Partial, "The target is partially held."),
                ColorOutcome::new("Hold", K::Hold, "The target is held fast."),
            ),
            def(
                Grabbing,
                "Grabbing",
                "Snatch an object from or off the target.",
                ColorOutcome::new("Take", K::Take, "Take an object that is not held."),
                ColorOutcome::new("Grab", K::Grab, "Grab an object the target is holding."),
                ColorOutcome::new("Break", K::Break, "Tear the object free, breaking the grip."),
            ),
            def(
                Escaping,
                "Escaping",
                "Break out of a hold.",
                ColorOutcome::new("Miss", K::Miss, "The hold stays in place."),
                ColorOutcome::new("Escape", K::Escape, "Break free of the hold."),
                ColorOutcome::new("Reverse", K::Reverse, "Break free and hold the attacker."),
            ),
            def(Charging, "Charging", "Run into the target with full momentum.", hit(), slam(), stun()),
            def(Dodging, "Dodging", "Spend the round avoiding ranged attacks.", shift(-2), shift(-4), shift(-6)),
            def(
                Evading,
                "Evading",
                "Spend the round avoiding melee attacks.",
                ColorOutcome::new("Evasion", K::Evade, "The attack is evaded."),
                shift(1),
                shift(2),
            ),
            def(Blocking, "Blocking", "Absorb a blow with Strength.", shift(-2), shift(-4), shift(-6)),
            def(
                Catching,
                "Catching",
                "Catch a thrown object or falling person.",
                ColorOutcome::new("Miss", K::Miss, "The catch is missed."),
                ColorOutcome::new("Damage", K::Damage, "Caught, but the catcher takes damage."),
                ColorOutcome::new("Catch", K::Catch, "A clean catch."),
            ),
            def(
                StunCheck,
                "Stun Check",
                "Endurance check against being stunned.",
                ColorOutcome::new("Stunned 1 round", K::Stun, "Stunned for one round."),
                no_effect(),
                no_effect(),
            ),
            def(
                SlamCheck,
                "Slam Check",
                "Endurance check against being knocked back.",
                ColorOutcome::new("1 area", K::Slam, "Knocked back one area."),
                ColorOutcome::new("Stagger", K::Stagger, "Staggered but stays in place."),
                no_effect(),
            ),
            def(
                KillCheck,
                "Kill Check",
                "Endurance check against lethal damage.",
                ColorOutcome::new("E/S", K::Partial, "Endurance loss stops."),
                no_effect(),
                no_effect(),
            ),
        ])
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_complete() {
        let catalog = ActionCatalog::standard();
        assert!(catalog.missing_actions().is_empty());
        assert_eq!(catalog.definitions().len(), 18);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = ActionCatalog::standard();
        assert_eq!(catalog.lookup("sh").unwrap().name, "Shooting");
        assert_eq!(catalog.lookup("BA").unwrap().ability(), Ability::Fighting);
        assert!(matches!(
            catalog.lookup("XX"),
            Err(CombatError::UnknownActionType(_))
        ));
    }

    #[test]
    fn test_white_is_always_a_miss() {
        let catalog = ActionCatalog::standard();
        for action in ActionType::iter() {
            let effect = catalog.effect_for(action, Color::White).unwrap();
            assert_eq!(effect.kind, EffectKind::Miss, "{} white is not a miss", action);
        }
    }

    #[test]
    fn test_white_miss_enforced_on_custom_data() {
        let mut catalog = ActionCatalog::standard();
        catalog.actions[0].white = ColorOutcome::new("Autohit", EffectKind::Damage, "");
        let effect = catalog.effect_for(catalog.actions[0].action, Color::White).unwrap();
        assert_eq!(effect.kind, EffectKind::Miss);
    }

    #[test]
    fn test_effect_for_colors() {
        let catalog = ActionCatalog::standard();
        assert_eq!(
            catalog.effect_for(ActionType::BluntAttack, Color::Yellow).unwrap().kind,
            EffectKind::Slam
        );
        assert_eq!(
            catalog.effect_for(ActionType::EdgedAttack, Color::Red).unwrap().kind,
            EffectKind::Kill
        );

        let dodge = catalog.effect_for(ActionType::Dodging, Color::Red).unwrap();
        assert_eq!(dodge.kind, EffectKind::ColumnShift);
        assert_eq!(dodge.value, Some(-6));
        assert_eq!(dodge.label, "-6 CS");

        let evade = catalog.effect_for(ActionType::Evading, Color::Yellow).unwrap();
        assert_eq!(evade.label, "+1 CS");
    }

    #[test]
    fn test_missing_definition() {
        let catalog = ActionCatalog::new(Vec::new());
        assert_eq!(
            catalog.effect_for(ActionType::Force, Color::Green),
            Err(CombatError::MissingActionDefinition(ActionType::Force))
        );
    }
}
