//! Action resolution - Turn an action code and a percentile roll into an outcome
//!
//! Resolution runs through fixed stages:
//! 1. Validate the participants and the action code
//! 2. Look up the governing ability on the actor
//! 3. Apply any column shift
//! 4. Roll d100 and add karma to the total
//! 5. Classify the total on the Universal Table
//! 6. Wrestling actions produce a hold-state effect; everything else goes
//!    through the battle effects catalog and, for damaging effects, the
//!    damage pipeline
//!
//! Resolution never fails past its boundary. Any rejected stage produces an
//! error outcome that reads as a miss.

use super::result::{ActionOptions, CombatOutcome, ResolutionFailure, ResolutionStage};
use super::wrestling::WrestlingEffect;
use crate::action::{ActionType, BaseDamageRule};
use crate::combatant::{AbilityScore, Combatant, KarmaExpenditure};
use crate::config::{MissingDataPolicy, Rules};
use crate::damage::compute_damage;
use crate::defense::resistance_for;
use crate::env::{Clock, PercentileRoller, RngRoller, SystemClock};
use crate::error::CombatError;
use crate::rank::{RankName, ShiftedRank};
use crate::types::{Ability, Color};
use tracing::{debug, warn};

/// Resolve an action with the thread RNG and the system clock
pub fn resolve_action(
    rules: &Rules,
    actor: Option<&dyn Combatant>,
    target: Option<&dyn Combatant>,
    action_code: &str,
    options: &ActionOptions,
) -> CombatOutcome {
    ActionResolver::new(rules).resolve_action(
        actor,
        target,
        action_code,
        options,
        &mut RngRoller::thread(),
        &SystemClock,
    )
}

/// An error tagged with the stage that raised it
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StageError {
    pub stage: ResolutionStage,
    pub error: CombatError,
}

pub(crate) fn at(stage: ResolutionStage) -> impl Fn(CombatError) -> StageError {
    move |error| StageError { stage, error }
}

/// A classified percentile roll against one of the actor's abilities
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CheckRoll {
    pub score: AbilityScore,
    pub shifted: Option<ShiftedRank>,
    pub raw_roll: u32,
    pub adjusted_roll: u32,
    pub color: Color,
    pub karma: Option<KarmaExpenditure>,
}

/// Resolves actions and FEATs against a shared set of rules
#[derive(Debug, Clone, Copy)]
pub struct ActionResolver<'r> {
    rules: &'r Rules,
}

impl<'r> ActionResolver<'r> {
    pub fn new(rules: &'r Rules) -> Self {
        ActionResolver { rules }
    }

    pub fn rules(&self) -> &'r Rules {
        self.rules
    }

    /// Classify a roll total against a rank
    pub fn classify(&self, rank: RankName, roll_total: u32) -> Result<Color, CombatError> {
        self.rules.universal.classify(rank, roll_total)
    }

    /// Resolve an action by `actor` against `target`
    ///
    /// Always returns an outcome. Invalid participants, unknown codes,
    /// missing abilities and overspent karma produce an error outcome; missing
    /// table data follows the rules' [`MissingDataPolicy`].
    pub fn resolve_action(
        &self,
        actor: Option<&dyn Combatant>,
        target: Option<&dyn Combatant>,
        action_code: &str,
        options: &ActionOptions,
        roller: &mut dyn PercentileRoller,
        clock: &dyn Clock,
    ) -> CombatOutcome {
        match self.try_resolve_action(actor, target, action_code, options, roller, clock) {
            Ok(outcome) => {
                debug!(
                    action = action_code,
                    roll = outcome.raw_roll,
                    total = outcome.adjusted_roll,
                    color = %outcome.color,
                    effect = %outcome.effect.kind,
                    damage = outcome.final_damage(),
                    "Resolved action"
                );
                outcome
            }
            Err(failure) => {
                let action = ActionType::from_code(action_code).ok();
                self.degrade(action, failure)
            }
        }
    }

    fn try_resolve_action(
        &self,
        actor: Option<&dyn Combatant>,
        target: Option<&dyn Combatant>,
        action_code: &str,
        options: &ActionOptions,
        roller: &mut dyn PercentileRoller,
        clock: &dyn Clock,
    ) -> Result<CombatOutcome, StageError> {
        use ResolutionStage::*;

        let actor = actor.ok_or(CombatError::InvalidParticipant("actor")).map_err(at(Validating))?;
        let target = target
            .ok_or(CombatError::InvalidParticipant("target"))
            .map_err(at(Validating))?;
        let action = ActionType::from_code(action_code).map_err(at(Validating))?;
        let definition = self.rules.actions.get(action).map_err(at(Validating))?;

        let description = format!("{} against {}", definition.name, target.name());
        let check = self.roll_check(
            actor,
            action.ability(),
            options.column_shift,
            options.karma_points,
            description,
            roller,
            clock,
        )?;

        let effect = self
            .rules
            .actions
            .effect_for(action, check.color)
            .map_err(at(Classified))?;

        let mut outcome = CombatOutcome {
            action: Some(action),
            actor: Some(actor.name().to_string()),
            target: Some(target.name().to_string()),
            ability: Some(action.ability()),
            ability_rank: Some(check.score.rank),
            shifted: check.shifted,
            raw_roll: check.raw_roll,
            adjusted_roll: check.adjusted_roll,
            color: check.color,
            effect,
            damage: None,
            wrestling: None,
            karma: check.karma,
            failure: None,
        };

        if action.is_wrestling() {
            outcome.wrestling = Some(WrestlingEffect::from_effect(outcome.effect.kind));
            return Ok(outcome);
        }

        // Endurance checks and defensive actions name damaging effects but
        // have no damage source of their own
        if outcome.effect.kind.inflicts_damage() && action.base_damage_rule() != BaseDamageRule::None {
            let strength = match action.base_damage_rule() {
                BaseDamageRule::Strength | BaseDamageRule::StrengthOrWeapon => actor
                    .ability(Ability::Strength)
                    .map(|s| s.number)
                    .ok_or_else(|| CombatError::UnknownAbility {
                        actor: actor.name().to_string(),
                        ability: Ability::Strength,
                    })
                    .map_err(at(StandardBranch))?,
                BaseDamageRule::Weapon | BaseDamageRule::None => 0,
            };
            let resistance = resistance_for(target, action);
            outcome.damage = Some(compute_damage(
                action,
                strength,
                options.weapon_damage,
                check.color,
                resistance,
            ));
        }

        Ok(outcome)
    }

    /// Ability lookup, column shift, karma and classification shared by
    /// actions and FEATs
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn roll_check(
        &self,
        actor: &dyn Combatant,
        ability: Ability,
        column_shift: i32,
        karma_points: u32,
        description: String,
        roller: &mut dyn PercentileRoller,
        clock: &dyn Clock,
    ) -> Result<CheckRoll, StageError> {
        use ResolutionStage::*;

        let score = actor
            .ability(ability)
            .ok_or_else(|| CombatError::UnknownAbility {
                actor: actor.name().to_string(),
                ability,
            })
            .map_err(at(AbilityLookup))?;

        let shifted = if column_shift != 0 {
            Some(
                self.rules
                    .ranks
                    .shift(score.rank, column_shift)
                    .map_err(at(ShiftApplied))?,
            )
        } else {
            None
        };

        let available = actor.karma();
        if karma_points > available {
            return Err(StageError {
                stage: RollPending,
                error: CombatError::InsufficientKarma {
                    requested: karma_points,
                    available,
                },
            });
        }

        let raw_roll = roller.roll_percentile();
        let adjusted_roll = raw_roll.saturating_add(karma_points);

        let color_rank = match shifted {
            Some(shift) if self.rules.policy.classify_on_shifted_rank => shift.rank,
            _ => score.rank,
        };
        let color = self
            .rules
            .universal
            .classify(color_rank, adjusted_roll)
            .map_err(at(Classified))?;

        let karma = (karma_points > 0).then(|| {
            KarmaExpenditure::new(
                actor.name(),
                karma_points,
                format!("Spent {} karma on {}", karma_points, description),
                clock.now(),
            )
        });

        Ok(CheckRoll {
            score,
            shifted,
            raw_roll,
            adjusted_roll,
            color,
            karma,
        })
    }

    fn degrade(&self, action: Option<ActionType>, failure: StageError) -> CombatOutcome {
        if failure.error.is_data_error()
            && self.rules.policy.missing_data == MissingDataPolicy::FallbackToMiss
        {
            warn!(error = %failure.error, stage = ?failure.stage, "Missing rules data, resolving as a miss");
            return CombatOutcome::missed(action);
        }

        warn!(error = %failure.error, stage = ?failure.stage, "Action rejected");
        CombatOutcome::failed(action, ResolutionFailure::new(failure.stage, &failure.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::CombatantSheet;
    use crate::config::ResolutionPolicy;
    use crate::env::{FixedClock, FixedRolls};
    use crate::error::ErrorKind;
    use crate::table::UniversalTable;
    use crate::types::EffectKind;

    fn score(rank: RankName, number: u32) -> AbilityScore {
        AbilityScore::new(rank, number)
    }

    fn brawler() -> CombatantSheet {
        CombatantSheet::new("Brawler")
            .with_ability(Ability::Fighting, score(RankName::Good, 10))
            .with_ability(Ability::Agility, score(RankName::Typical, 6))
            .with_ability(Ability::Strength, score(RankName::Excellent, 20))
            .with_ability(Ability::Endurance, score(RankName::Remarkable, 30))
            .with_karma(30)
    }

    fn target() -> CombatantSheet {
        CombatantSheet::new("Target")
            .with_ability(Ability::Strength, score(RankName::Typical, 6))
            .with_resistance("physical", 15)
    }

    fn resolve(rules: &Rules, code: &str, options: ActionOptions, roll: u32) -> CombatOutcome {
        let actor = brawler();
        let target = target();
        ActionResolver::new(rules).resolve_action(
            Some(&actor),
            Some(&target),
            code,
            &options,
            &mut FixedRolls::new([roll]),
            &FixedClock(1_000),
        )
    }

    #[test]
    fn test_blunt_attack_green() {
        let rules = Rules::standard();
        // Good fighting: green 46-75
        let outcome = resolve(&rules, "BA", ActionOptions::default(), 60);

        assert!(!outcome.is_error());
        assert_eq!(outcome.color, Color::Green);
        assert_eq!(outcome.effect.kind, EffectKind::Damage);
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.base, 20);
        assert_eq!(damage.final_damage, 5);
    }

    #[test]
    fn test_white_has_no_damage() {
        let rules = Rules::standard();
        let outcome = resolve(&rules, "ba", ActionOptions::default(), 10);

        assert!(!outcome.is_error());
        assert_eq!(outcome.color, Color::White);
        assert!(outcome.effect.is_miss());
        assert!(outcome.damage.is_none());
    }

    #[test]
    fn test_edged_red_uses_higher_of_strength_and_weapon() {
        let rules = Rules::standard();
        let options = ActionOptions::default().with_weapon_damage(10);
        let outcome = resolve(&rules, "EA", options, 99);

        assert_eq!(outcome.color, Color::Red);
        assert_eq!(outcome.effect.kind, EffectKind::Kill);
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.base, 40);
        assert_eq!(damage.resistance, 15);
        assert_eq!(damage.final_damage, 25);
    }

    #[test]
    fn test_grappling_produces_hold_not_damage() {
        let rules = Rules::standard();
        // Excellent strength: red 95-100
        let outcome = resolve(&rules, "Gp", ActionOptions::default(), 96);

        assert_eq!(outcome.color, Color::Red);
        assert_eq!(outcome.wrestling, Some(WrestlingEffect::FullHold));
        assert!(outcome.damage.is_none());
    }

    #[test]
    fn test_escape_yellow() {
        let rules = Rules::standard();
        // Excellent strength: yellow 71-94
        let outcome = resolve(&rules, "es", ActionOptions::default(), 80);
        assert_eq!(outcome.wrestling, Some(WrestlingEffect::Escape));
        assert!(outcome.wrestling.unwrap().actor_freed());
    }

    #[test]
    fn test_dodging_reports_column_shift() {
        let rules = Rules::standard();
        // Typical agility: yellow 81-97
        let outcome = resolve(&rules, "Do", ActionOptions::default(), 85);
        assert_eq!(outcome.effect.kind, EffectKind::ColumnShift);
        assert_eq!(outcome.effect.value, Some(-4));
        assert!(outcome.damage.is_none());
    }

    #[test]
    fn test_column_shift_reports_representative_value() {
        let rules = Rules::standard();
        let options = ActionOptions::default().with_column_shift(2);
        let outcome = resolve(&rules, "BA", options, 50);

        let shifted = outcome.shifted.unwrap();
        assert_eq!(shifted.rank, RankName::Remarkable);
        assert_eq!(shifted.value, 30);
        // Classification stays on Good: 50 is green
        assert_eq!(outcome.ability_rank, Some(RankName::Good));
        assert_eq!(outcome.color, Color::Green);
    }

    #[test]
    fn test_classify_on_shifted_rank_policy() {
        let rules = Rules::standard().with_policy(ResolutionPolicy {
            classify_on_shifted_rank: true,
            ..ResolutionPolicy::default()
        });
        // Good +3 = Incredible: yellow 61-90
        let options = ActionOptions::default().with_column_shift(3);
        let outcome = resolve(&rules, "BA", options, 70);

        assert_eq!(outcome.shifted.unwrap().rank, RankName::Incredible);
        assert_eq!(outcome.color, Color::Yellow);
    }

    #[test]
    fn test_karma_added_to_roll() {
        let rules = Rules::standard();
        let outcome = resolve(&rules, "BA", ActionOptions::default().with_karma(20), 40);

        assert_eq!(outcome.raw_roll, 40);
        assert_eq!(outcome.adjusted_roll, 60);
        assert_eq!(outcome.color, Color::Green);
        let karma = outcome.karma.unwrap();
        assert_eq!(karma.amount, 20);
        assert_eq!(karma.entry.actor, "Brawler");
        assert_eq!(karma.entry.timestamp, 1_000);
        assert!(karma.entry.description.contains("Blunt Attack against Target"));
    }

    #[test]
    fn test_overspent_karma_is_rejected() {
        let rules = Rules::standard();
        let outcome = resolve(&rules, "BA", ActionOptions::default().with_karma(31), 40);

        assert!(outcome.is_error());
        let failure = outcome.failure.unwrap();
        assert_eq!(failure.kind, ErrorKind::InsufficientKarma);
        assert_eq!(failure.stage, ResolutionStage::RollPending);
        assert!(outcome.karma.is_none());
    }

    #[test]
    fn test_unknown_action_code() {
        let rules = Rules::standard();
        let outcome = resolve(&rules, "Xx", ActionOptions::default(), 50);

        assert!(outcome.is_error());
        assert_eq!(outcome.failure.as_ref().unwrap().kind, ErrorKind::UnknownActionType);
        assert!(outcome.action.is_none());
        assert!(outcome.effect.is_miss());
    }

    #[test]
    fn test_missing_target() {
        let rules = Rules::standard();
        let actor = brawler();
        let outcome = ActionResolver::new(&rules).resolve_action(
            Some(&actor),
            None,
            "BA",
            &ActionOptions::default(),
            &mut FixedRolls::new([50]),
            &FixedClock(0),
        );

        assert!(outcome.is_error());
        assert_eq!(outcome.message(), Some("Invalid participant: target is missing"));
    }

    #[test]
    fn test_missing_ability() {
        let rules = Rules::standard();
        let actor = CombatantSheet::new("Unarmed Citizen");
        let target = target();
        let outcome = ActionResolver::new(&rules).resolve_action(
            Some(&actor),
            Some(&target),
            "Sh",
            &ActionOptions::default(),
            &mut FixedRolls::new([50]),
            &FixedClock(0),
        );

        let failure = outcome.failure.unwrap();
        assert_eq!(failure.kind, ErrorKind::UnknownAbility);
        assert_eq!(failure.stage, ResolutionStage::AbilityLookup);
    }

    #[test]
    fn test_karma_at_u32_max_saturates() {
        let rules = Rules::standard();
        let actor = brawler().with_karma(u32::MAX);
        let target = target();
        let outcome = ActionResolver::new(&rules).resolve_action(
            Some(&actor),
            Some(&target),
            "BA",
            &ActionOptions::default().with_karma(u32::MAX),
            &mut FixedRolls::new([50]),
            &FixedClock(0),
        );

        assert!(!outcome.is_error());
        assert_eq!(outcome.raw_roll, 50);
        assert_eq!(outcome.adjusted_roll, u32::MAX);
        assert_eq!(outcome.color, Color::Red);
        assert_eq!(outcome.karma.unwrap().amount, u32::MAX);
    }

    #[test]
    fn test_resolve_action_with_thread_rng() {
        let rules = Rules::standard();
        let actor = brawler();
        let target = target();
        let outcome = resolve_action(
            &rules,
            Some(&actor),
            Some(&target),
            "BA",
            &ActionOptions::default(),
        );

        assert!(!outcome.is_error());
        assert!((1..=100).contains(&outcome.raw_roll));
        assert_eq!(outcome.adjusted_roll, outcome.raw_roll);
        assert!(outcome.karma.is_none());
    }

    #[test]
    fn test_classify_through_resolver() {
        let rules = Rules::standard();
        let resolver = ActionResolver::new(&rules);
        assert_eq!(resolver.classify(RankName::Good, 50), Ok(Color::Green));
        assert_eq!(resolver.classify(RankName::Typical, 102), Ok(Color::Red));
        assert!(std::ptr::eq(resolver.rules(), &rules));
    }

    fn rules_without_good_row(policy: MissingDataPolicy) -> Rules {
        let rows = UniversalTable::standard()
            .rows()
            .iter()
            .filter(|r| r.rank != RankName::Good)
            .cloned()
            .collect();
        Rules {
            universal: UniversalTable::new(rows),
            ..Rules::standard()
        }
        .with_policy(ResolutionPolicy {
            classify_on_shifted_rank: false,
            missing_data: policy,
        })
    }

    #[test]
    fn test_missing_row_fails_loudly() {
        let rules = rules_without_good_row(MissingDataPolicy::Fail);
        let outcome = resolve(&rules, "BA", ActionOptions::default(), 50);

        let failure = outcome.failure.unwrap();
        assert_eq!(failure.kind, ErrorKind::UnknownRank);
        assert_eq!(failure.stage, ResolutionStage::Classified);
    }

    #[test]
    fn test_missing_row_falls_back_to_miss() {
        let rules = rules_without_good_row(MissingDataPolicy::FallbackToMiss);
        let outcome = resolve(&rules, "BA", ActionOptions::default(), 50);

        assert!(!outcome.is_error());
        assert!(outcome.effect.is_miss());
        assert_eq!(outcome.action, Some(ActionType::BluntAttack));
        assert_eq!(outcome.final_damage(), 0);
    }
}
