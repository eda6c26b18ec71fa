//! Combat resolution - Resolve actions and FEAT rolls against the rules tables

mod feat;
mod resolution;
mod result;
mod wrestling;

pub use feat::{FeatOptions, FeatOutcome};
pub use resolution::{resolve_action, ActionResolver};
pub use result::{ActionOptions, CombatOutcome, ResolutionFailure, ResolutionStage};
pub use wrestling::WrestlingEffect;
