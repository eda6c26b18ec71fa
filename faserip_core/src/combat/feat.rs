//! FEAT rolls - General ability checks against a required color

use super::resolution::{ActionResolver, StageError};
use super::result::{ResolutionFailure, ResolutionStage};
use crate::combatant::{apply_karma, Combatant, KarmaExpenditure, KarmaLedger};
use crate::env::{Clock, PercentileRoller};
use crate::error::CombatError;
use crate::rank::{RankName, ShiftedRank};
use crate::types::{Ability, Color};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Options recognized by FEAT rolls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatOptions {
    #[serde(default)]
    pub column_shift: i32,
    #[serde(default)]
    pub karma_points: u32,
}

impl FeatOptions {
    pub fn with_column_shift(mut self, shift: i32) -> Self {
        self.column_shift = shift;
        self
    }

    pub fn with_karma(mut self, karma: u32) -> Self {
        self.karma_points = karma;
        self
    }
}

/// Outcome of one FEAT roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatOutcome {
    pub actor: Option<String>,
    pub ability: Ability,
    pub ability_rank: Option<RankName>,
    pub shifted: Option<ShiftedRank>,
    pub raw_roll: u32,
    pub adjusted_roll: u32,
    pub color: Color,
    /// Lowest color that counts as a success
    pub required: Color,
    pub success: bool,
    pub karma: Option<KarmaExpenditure>,
    pub failure: Option<ResolutionFailure>,
}

impl FeatOutcome {
    fn failed(actor: Option<&dyn Combatant>, ability: Ability, required: Color, failure: StageError) -> Self {
        FeatOutcome {
            actor: actor.map(|a| a.name().to_string()),
            ability,
            ability_rank: None,
            shifted: None,
            raw_roll: 0,
            adjusted_roll: 0,
            color: Color::White,
            required,
            success: false,
            karma: None,
            failure: Some(ResolutionFailure::new(failure.stage, &failure.error)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.failure.is_some()
    }

    pub fn apply_karma(&self, ledger: &mut (impl KarmaLedger + ?Sized)) -> bool {
        match &self.karma {
            Some(expenditure) => {
                apply_karma(ledger, expenditure);
                true
            }
            None => false,
        }
    }
}

impl<'r> ActionResolver<'r> {
    /// Roll a FEAT for `actor` using `ability`
    ///
    /// Succeeds when the color reaches `required` (green when `None`). Errors
    /// come back as a failed outcome.
    pub fn resolve_feat(
        &self,
        actor: Option<&dyn Combatant>,
        ability: Ability,
        options: &FeatOptions,
        required: Option<Color>,
        roller: &mut dyn PercentileRoller,
        clock: &dyn Clock,
    ) -> FeatOutcome {
        let required = required.unwrap_or(Color::Green);

        let Some(who) = actor else {
            let failure = StageError {
                stage: ResolutionStage::Validating,
                error: CombatError::InvalidParticipant("actor"),
            };
            warn!(error = %failure.error, "FEAT rejected");
            return FeatOutcome::failed(None, ability, required, failure);
        };

        let description = format!("{} FEAT", ability);
        let check = match self.roll_check(
            who,
            ability,
            options.column_shift,
            options.karma_points,
            description,
            roller,
            clock,
        ) {
            Ok(check) => check,
            Err(failure) => {
                warn!(error = %failure.error, stage = ?failure.stage, "FEAT rejected");
                return FeatOutcome::failed(actor, ability, required, failure);
            }
        };

        let success = check.color.index() >= required.index();
        debug!(
            actor = who.name(),
            ability = %ability,
            total = check.adjusted_roll,
            color = %check.color,
            success,
            "Resolved FEAT"
        );

        FeatOutcome {
            actor: Some(who.name().to_string()),
            ability,
            ability_rank: Some(check.score.rank),
            shifted: check.shifted,
            raw_roll: check.raw_roll,
            adjusted_roll: check.adjusted_roll,
            color: check.color,
            required,
            success,
            karma: check.karma,
            failure: None,
        }
    }
}
