//! Damage resolution - Base damage, color multiplier, resistance
//!
//! Formula:
//! - base = strength, max(strength, weapon) or weapon, depending on the action
//! - multiplied = floor(base * color multiplier)  (red x2, yellow x1.5)
//! - final = max(0, multiplied - resistance)

use crate::action::{ActionType, BaseDamageRule};
use crate::types::{Color, DamageCategory};
use serde::{Deserialize, Serialize};

/// Damage breakdown for a single resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageBreakdown {
    /// Damage after the color multiplier, before resistance
    pub base: u32,
    /// Resistance subtracted
    pub resistance: u32,
    /// Damage actually dealt
    pub final_damage: u32,
    pub resistance_type: DamageCategory,
}

impl DamageBreakdown {
    /// Damage absorbed by resistance
    pub fn absorbed(&self) -> u32 {
        self.base - self.final_damage
    }
}

/// Base damage before any multiplier
pub fn base_damage(action: ActionType, attacker_strength: u32, weapon_damage: u32) -> u32 {
    match action.base_damage_rule() {
        BaseDamageRule::Strength => attacker_strength,
        BaseDamageRule::StrengthOrWeapon => attacker_strength.max(weapon_damage),
        BaseDamageRule::Weapon => weapon_damage,
        BaseDamageRule::None => 0,
    }
}

/// Compute damage for an action at a given color against a resistance
pub fn compute_damage(
    action: ActionType,
    attacker_strength: u32,
    weapon_damage: u32,
    color: Color,
    resistance: u32,
) -> DamageBreakdown {
    let raw = base_damage(action, attacker_strength, weapon_damage);
    let multiplied = (raw as f64 * color.damage_multiplier()).floor() as u32;

    DamageBreakdown {
        base: multiplied,
        resistance,
        final_damage: multiplied.saturating_sub(resistance),
        resistance_type: action.damage_category(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_edged_red_against_resistance() {
        // max(20, 10) * 2 = 40, minus 15 physical
        let damage = compute_damage(ActionType::EdgedAttack, 20, 10, Color::Red, 15);
        assert_eq!(damage.base, 40);
        assert_eq!(damage.resistance, 15);
        assert_eq!(damage.final_damage, 25);
        assert_eq!(damage.resistance_type, DamageCategory::Physical);
        assert_eq!(damage.absorbed(), 15);
    }

    #[test]
    fn test_blunt_uses_strength_only() {
        let damage = compute_damage(ActionType::BluntAttack, 10, 50, Color::Green, 0);
        assert_eq!(damage.base, 10);
    }

    #[test]
    fn test_ranged_uses_weapon_only() {
        let damage = compute_damage(ActionType::Shooting, 50, 10, Color::Green, 0);
        assert_eq!(damage.base, 10);

        let damage = compute_damage(ActionType::Energy, 50, 40, Color::Green, 0);
        assert_eq!(damage.resistance_type, DamageCategory::Energy);
        assert_eq!(damage.base, 40);
    }

    #[test]
    fn test_yellow_rounds_down() {
        // 15 * 1.5 = 22.5
        let damage = compute_damage(ActionType::Charging, 15, 0, Color::Yellow, 0);
        assert_eq!(damage.base, 22);
    }

    #[test]
    fn test_resistance_never_goes_negative() {
        let damage = compute_damage(ActionType::BluntAttack, 6, 0, Color::Green, 30);
        assert_eq!(damage.final_damage, 0);
    }

    #[test]
    fn test_non_damaging_actions() {
        let damage = compute_damage(ActionType::Grappling, 40, 20, Color::Red, 0);
        assert_eq!(damage.base, 0);
        assert_eq!(damage.final_damage, 0);
    }

    fn any_action() -> impl Strategy<Value = ActionType> {
        proptest::sample::select(ActionType::iter().collect::<Vec<_>>())
    }

    fn any_color() -> impl Strategy<Value = Color> {
        proptest::sample::select(Color::all().to_vec())
    }

    proptest! {
        #[test]
        fn prop_final_bounded_by_multiplied_base(
            action in any_action(),
            strength in 0u32..10_000,
            weapon in 0u32..10_000,
            color in any_color(),
            resistance in 0u32..20_000,
        ) {
            let damage = compute_damage(action, strength, weapon, color, resistance);
            let raw = base_damage(action, strength, weapon) as f64;
            prop_assert!(damage.final_damage <= damage.base);
            prop_assert!(damage.final_damage as f64 <= raw * color.damage_multiplier());
        }

        #[test]
        fn prop_compute_damage_is_pure(
            action in any_action(),
            strength in 0u32..1_000,
            weapon in 0u32..1_000,
            color in any_color(),
            resistance in 0u32..1_000,
        ) {
            let first = compute_damage(action, strength, weapon, color, resistance);
            let second = compute_damage(action, strength, weapon, color, resistance);
            prop_assert_eq!(first, second);
        }
    }
}
