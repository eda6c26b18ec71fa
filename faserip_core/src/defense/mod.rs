//! Defense system - Resistances

mod resistance;

pub use resistance::{resistance_against, resistance_for, resistance_for_code, ResistanceEntry};
