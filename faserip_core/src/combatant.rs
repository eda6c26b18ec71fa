//! Combatants - Read and write access to the participants of an action
//!
//! The engine never owns a combatant. It reads abilities, karma and
//! resistances through [`Combatant`] and hands karma spending back to the
//! owner through [`KarmaLedger`]. [`CombatantSheet`] is a plain data
//! implementation of both, loadable from TOML or JSON.

use crate::defense::ResistanceEntry;
use crate::error::CombatError;
use crate::rank::{RankName, RankTable};
use crate::types::Ability;
use serde::{Deserialize, Serialize};

/// An ability's rank and number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    pub rank: RankName,
    pub number: u32,
}

impl AbilityScore {
    pub fn new(rank: RankName, number: u32) -> Self {
        AbilityScore { rank, number }
    }

    /// Score at a rank's standard value
    pub fn at_rank(rank: RankName, table: &RankTable) -> Result<Self, CombatError> {
        Ok(AbilityScore {
            rank,
            number: table.standard_value(rank)?,
        })
    }

    /// Score for a rolled or advanced number, ranked by the table
    pub fn from_number(number: u32, table: &RankTable) -> Result<Self, CombatError> {
        Ok(AbilityScore {
            rank: table.rank_of(number)?,
            number,
        })
    }
}

/// One line of a combatant's karma log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmaHistoryEntry {
    /// Seconds since the Unix epoch
    pub timestamp: u64,
    pub actor: String,
    /// Signed change to the karma pool (negative when spent)
    pub change: i64,
    pub description: String,
}

/// Karma spent on a single roll, to be recorded by the combatant's owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KarmaExpenditure {
    pub amount: u32,
    pub entry: KarmaHistoryEntry,
}

impl KarmaExpenditure {
    pub fn new(actor: &str, amount: u32, description: String, timestamp: u64) -> Self {
        KarmaExpenditure {
            amount,
            entry: KarmaHistoryEntry {
                timestamp,
                actor: actor.to_string(),
                change: -(amount as i64),
                description,
            },
        }
    }
}

/// Read access to a participant
pub trait Combatant {
    fn name(&self) -> &str;
    fn ability(&self, ability: Ability) -> Option<AbilityScore>;
    fn karma(&self) -> u32;
    fn resistances(&self) -> &[ResistanceEntry];
}

/// Write access to a participant's karma pool and log
pub trait KarmaLedger {
    fn debit_karma(&mut self, amount: u32);
    fn append_karma_history(&mut self, entry: KarmaHistoryEntry);
}

/// Debit the pool and append the log entry for a karma expenditure
pub fn apply_karma(ledger: &mut (impl KarmaLedger + ?Sized), expenditure: &KarmaExpenditure) {
    ledger.debit_karma(expenditure.amount);
    ledger.append_karma_history(expenditure.entry.clone());
}

/// Plain data combatant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSheet {
    pub name: String,
    #[serde(default)]
    pub fighting: Option<AbilityScore>,
    #[serde(default)]
    pub agility: Option<AbilityScore>,
    #[serde(default)]
    pub strength: Option<AbilityScore>,
    #[serde(default)]
    pub endurance: Option<AbilityScore>,
    #[serde(default)]
    pub reason: Option<AbilityScore>,
    #[serde(default)]
    pub intuition: Option<AbilityScore>,
    #[serde(default)]
    pub psyche: Option<AbilityScore>,
    #[serde(default)]
    pub karma: u32,
    #[serde(default)]
    pub karma_history: Vec<KarmaHistoryEntry>,
    #[serde(default)]
    pub resistances: Vec<ResistanceEntry>,
}

impl CombatantSheet {
    /// Create a sheet with no abilities or karma
    pub fn new(name: &str) -> Self {
        CombatantSheet {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn slot(&self, ability: Ability) -> &Option<AbilityScore> {
        match ability {
            Ability::Fighting => &self.fighting,
            Ability::Agility => &self.agility,
            Ability::Strength => &self.strength,
            Ability::Endurance => &self.endurance,
            Ability::Reason => &self.reason,
            Ability::Intuition => &self.intuition,
            Ability::Psyche => &self.psyche,
        }
    }

    fn slot_mut(&mut self, ability: Ability) -> &mut Option<AbilityScore> {
        match ability {
            Ability::Fighting => &mut self.fighting,
            Ability::Agility => &mut self.agility,
            Ability::Strength => &mut self.strength,
            Ability::Endurance => &mut self.endurance,
            Ability::Reason => &mut self.reason,
            Ability::Intuition => &mut self.intuition,
            Ability::Psyche => &mut self.psyche,
        }
    }

    pub fn set_ability(&mut self, ability: Ability, score: AbilityScore) {
        *self.slot_mut(ability) = Some(score);
    }

    /// Builder-style ability setter
    pub fn with_ability(mut self, ability: Ability, score: AbilityScore) -> Self {
        self.set_ability(ability, score);
        self
    }

    pub fn with_karma(mut self, karma: u32) -> Self {
        self.karma = karma;
        self
    }

    pub fn with_resistance(mut self, kind: &str, number: u32) -> Self {
        self.resistances.push(ResistanceEntry::new(kind, number));
        self
    }

    fn sum_numbers(&self, abilities: &[Ability]) -> u32 {
        abilities
            .iter()
            .filter_map(|a| self.slot(*a).map(|s| s.number))
            .fold(0, u32::saturating_add)
    }

    /// Health: sum of Fighting, Agility, Strength and Endurance numbers
    pub fn health(&self) -> u32 {
        self.sum_numbers(Ability::physical())
    }

    /// Starting karma: sum of Reason, Intuition and Psyche numbers
    pub fn starting_karma(&self) -> u32 {
        self.sum_numbers(Ability::mental())
    }
}

impl Combatant for CombatantSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn ability(&self, ability: Ability) -> Option<AbilityScore> {
        *self.slot(ability)
    }

    fn karma(&self) -> u32 {
        self.karma
    }

    fn resistances(&self) -> &[ResistanceEntry] {
        &self.resistances
    }
}

impl KarmaLedger for CombatantSheet {
    fn debit_karma(&mut self, amount: u32) {
        self.karma = self.karma.saturating_sub(amount);
    }

    fn append_karma_history(&mut self, entry: KarmaHistoryEntry) {
        self.karma_history.push(entry);
    }
}
