//! Wrestling - Hold-state results of grappling, grabbing and escaping
//!
//! Wrestling actions never deal damage. Their color result changes who is
//! holding whom (or what).

use crate::types::EffectKind;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Hold-state change produced by a wrestling action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum WrestlingEffect {
    /// Nothing changes
    #[strum(serialize = "no hold")]
    Failed,
    /// Target is held but may still act at a penalty
    #[strum(serialize = "partial hold")]
    PartialHold,
    /// Target is pinned
    #[strum(serialize = "full hold")]
    FullHold,
    /// An unheld object is taken
    #[strum(serialize = "object taken")]
    Take,
    /// A held object is wrested away
    #[strum(serialize = "object grabbed")]
    Grab,
    /// The object is torn free and the grip broken
    #[strum(serialize = "grip broken")]
    Break,
    /// The actor slips out of a hold
    #[strum(serialize = "escaped")]
    Escape,
    /// The actor breaks free and holds the attacker
    #[strum(serialize = "hold reversed")]
    Reverse,
}

impl WrestlingEffect {
    pub fn from_effect(kind: EffectKind) -> Self {
        match kind {
            EffectKind::Partial => WrestlingEffect::PartialHold,
            EffectKind::Hold => WrestlingEffect::FullHold,
            EffectKind::Take => WrestlingEffect::Take,
            EffectKind::Grab => WrestlingEffect::Grab,
            EffectKind::Break => WrestlingEffect::Break,
            EffectKind::Escape => WrestlingEffect::Escape,
            EffectKind::Reverse => WrestlingEffect::Reverse,
            _ => WrestlingEffect::Failed,
        }
    }

    /// Whether the other party ends up held by the actor
    pub fn target_held(self) -> bool {
        matches!(
            self,
            WrestlingEffect::PartialHold | WrestlingEffect::FullHold | WrestlingEffect::Reverse
        )
    }

    /// Whether the actor is free of a hold afterwards
    pub fn actor_freed(self) -> bool {
        matches!(self, WrestlingEffect::Escape | WrestlingEffect::Reverse)
    }

    /// Whether an object changes hands
    pub fn object_taken(self) -> bool {
        matches!(
            self,
            WrestlingEffect::Take | WrestlingEffect::Grab | WrestlingEffect::Break
        )
    }
}
