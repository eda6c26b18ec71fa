//! Prelude module for convenient imports
//!
//! ```rust
//! use faserip_core::prelude::*;
//! ```

// Core types
pub use crate::rank::{RankName, RankTable, ShiftedRank};
pub use crate::types::{Ability, Color, DamageCategory, EffectKind};

// Tables and catalog
pub use crate::action::{ActionCatalog, ActionType, EffectDescriptor};
pub use crate::table::UniversalTable;

// Combat
pub use crate::combat::{ActionOptions, ActionResolver, CombatOutcome, FeatOptions, FeatOutcome, WrestlingEffect};
pub use crate::damage::DamageBreakdown;

// Combatants
pub use crate::combatant::{AbilityScore, Combatant, CombatantSheet, KarmaLedger};
pub use crate::env::{Clock, PercentileRoller, RngRoller, SystemClock};

// Config
pub use crate::config::Rules;
