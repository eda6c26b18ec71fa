//! faserip_core - Combat resolution rules for the FASERIP system
//!
//! This library provides:
//! - RankTable: Named ranks, their numeric ranges and column shifts
//! - UniversalTable: Percentile bands that turn a roll into a color
//! - ActionCatalog: What each color means for each action type
//! - Damage: Color multipliers and resistance
//! - ActionResolver: The full roll-to-outcome pipeline, plus FEAT rolls
//! - Rules: All of the above loaded once from code or TOML

pub mod action;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod defense;
pub mod env;
pub mod error;
pub mod prelude;
pub mod rank;
pub mod table;
pub mod types;

// Re-export core types for convenience
pub use action::{ActionCatalog, ActionDefinition, ActionType, EffectDescriptor};
pub use combat::{
    resolve_action, ActionOptions, ActionResolver, CombatOutcome, FeatOptions, FeatOutcome,
    ResolutionFailure, ResolutionStage, WrestlingEffect,
};
pub use combatant::{AbilityScore, Combatant, CombatantSheet, KarmaExpenditure, KarmaLedger};
pub use config::{load_rules, parse_rules, ConfigError, MissingDataPolicy, ResolutionPolicy, Rules};
pub use damage::{compute_damage, DamageBreakdown};
pub use defense::{resistance_for, ResistanceEntry};
pub use env::{Clock, FixedClock, FixedRolls, PercentileRoller, RngRoller, SystemClock};
pub use error::{CombatError, ErrorKind};
pub use rank::{RankName, RankTable, ShiftedRank};
pub use table::UniversalTable;
pub use types::{Ability, Color, DamageCategory, EffectKind};
