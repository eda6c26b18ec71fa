//! CombatOutcome - Result of resolving one action

use super::wrestling::WrestlingEffect;
use crate::action::{ActionType, EffectDescriptor};
use crate::combatant::{apply_karma, KarmaExpenditure, KarmaLedger};
use crate::damage::DamageBreakdown;
use crate::error::{CombatError, ErrorKind};
use crate::rank::{RankName, ShiftedRank};
use crate::types::{Ability, Color};
use serde::{Deserialize, Serialize};

/// Step of resolution at which an action was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStage {
    Validating,
    AbilityLookup,
    ShiftApplied,
    RollPending,
    Classified,
    StandardBranch,
}

/// Why an outcome is an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub kind: ErrorKind,
    pub stage: ResolutionStage,
    pub message: String,
}

impl ResolutionFailure {
    pub fn new(stage: ResolutionStage, error: &CombatError) -> Self {
        ResolutionFailure {
            kind: error.kind(),
            stage,
            message: error.to_string(),
        }
    }
}

/// Options recognized by action resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOptions {
    /// Signed rank steps applied to the ability rank
    #[serde(default)]
    pub column_shift: i32,
    /// Karma added directly to the roll total
    #[serde(default)]
    pub karma_points: u32,
    /// Weapon or power damage for edged and ranged attacks
    #[serde(default)]
    pub weapon_damage: u32,
}

impl ActionOptions {
    pub fn with_column_shift(mut self, shift: i32) -> Self {
        self.column_shift = shift;
        self
    }

    pub fn with_karma(mut self, karma: u32) -> Self {
        self.karma_points = karma;
        self
    }

    pub fn with_weapon_damage(mut self, damage: u32) -> Self {
        self.weapon_damage = damage;
        self
    }
}

/// Outcome of resolving one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub action: Option<ActionType>,
    pub actor: Option<String>,
    pub target: Option<String>,
    pub ability: Option<Ability>,
    /// Actor's rank in the governing ability
    pub ability_rank: Option<RankName>,
    /// Rank and representative value after a column shift
    pub shifted: Option<ShiftedRank>,
    pub raw_roll: u32,
    /// Roll total after karma
    pub adjusted_roll: u32,
    pub color: Color,
    pub effect: EffectDescriptor,
    pub damage: Option<DamageBreakdown>,
    pub wrestling: Option<WrestlingEffect>,
    /// Karma the actor's owner must debit and log
    pub karma: Option<KarmaExpenditure>,
    pub failure: Option<ResolutionFailure>,
}

impl CombatOutcome {
    /// A plain miss with no roll attached
    pub fn missed(action: Option<ActionType>) -> Self {
        CombatOutcome {
            action,
            actor: None,
            target: None,
            ability: None,
            ability_rank: None,
            shifted: None,
            raw_roll: 0,
            adjusted_roll: 0,
            color: Color::White,
            effect: EffectDescriptor::miss(action),
            damage: None,
            wrestling: None,
            karma: None,
            failure: None,
        }
    }

    /// An error outcome: a miss carrying the failure
    pub fn failed(action: Option<ActionType>, failure: ResolutionFailure) -> Self {
        CombatOutcome {
            failure: Some(failure),
            ..Self::missed(action)
        }
    }

    pub fn is_error(&self) -> bool {
        self.failure.is_some()
    }

    pub fn message(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.message.as_str())
    }

    /// Damage dealt, 0 when nothing landed
    pub fn final_damage(&self) -> u32 {
        self.damage.map_or(0, |d| d.final_damage)
    }

    /// Hand any karma spent on this roll to the actor's ledger
    pub fn apply_karma(&self, ledger: &mut (impl KarmaLedger + ?Sized)) -> bool {
        match &self.karma {
            Some(expenditure) => {
                apply_karma(ledger, expenditure);
                true
            }
            None => false,
        }
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        if let Some(failure) = &self.failure {
            return format!("Error: {} (Miss)", failure.message);
        }

        let mut parts = Vec::new();

        if let Some(action) = self.action {
            parts.push(format!("{}", action));
        }

        if self.adjusted_roll != self.raw_roll {
            parts.push(format!(
                "rolled {} (+{} karma = {})",
                self.raw_roll,
                self.adjusted_roll - self.raw_roll,
                self.adjusted_roll
            ));
        } else {
            parts.push(format!("rolled {}", self.raw_roll));
        }

        parts.push(format!("{}: {}", self.color, self.effect.label));

        if let Some(damage) = &self.damage {
            parts.push(format!(
                "{} damage ({} - {} {} resistance)",
                damage.final_damage, damage.base, damage.resistance, damage.resistance_type
            ));
        }

        if let Some(wrestling) = &self.wrestling {
            parts.push(format!("{}", wrestling));
        }

        parts.join(", ")
    }
}
