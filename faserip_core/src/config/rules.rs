//! Rules configuration - Tables, catalog and policy in one object
//!
//! A [`Rules`] value is built once at startup and shared by reference with
//! every resolver. Tables left out of a TOML file fall back to the standard
//! FASERIP data; whatever is loaded is validated before use.

use super::{ConfigError, ResolutionPolicy};
use crate::action::{ActionCatalog, ActionDefinition};
use crate::rank::{RankDef, RankTable};
use crate::table::{UniversalRow, UniversalTable};
use crate::types::EffectKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// On-disk layout of a rules file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub policy: ResolutionPolicy,
    #[serde(default)]
    pub ranks: Vec<RankDef>,
    #[serde(default)]
    pub universal: Vec<UniversalRow>,
    #[serde(default)]
    pub actions: Vec<ActionDefinition>,
}

/// Every table the engine consults, plus resolution policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    pub ranks: RankTable,
    pub universal: UniversalTable,
    pub actions: ActionCatalog,
    pub policy: ResolutionPolicy,
}

impl Rules {
    /// Standard FASERIP tables with the default policy
    pub fn standard() -> Self {
        Rules {
            ranks: RankTable::standard(),
            universal: UniversalTable::standard(),
            actions: ActionCatalog::standard(),
            policy: ResolutionPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build validated rules from a parsed file
    pub fn from_file(file: RulesFile) -> Result<Self, ConfigError> {
        let rules = Rules {
            ranks: if file.ranks.is_empty() {
                RankTable::standard()
            } else {
                RankTable::new(file.ranks)
            },
            universal: if file.universal.is_empty() {
                UniversalTable::standard()
            } else {
                UniversalTable::new(file.universal)
            },
            actions: if file.actions.is_empty() {
                ActionCatalog::standard()
            } else {
                ActionCatalog::new(file.actions)
            },
            policy: file.policy,
        };

        rules.validate()?;
        Ok(rules)
    }

    /// Check the table invariants the resolvers rely on
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_ranks()?;
        self.validate_universal()?;
        self.validate_actions()
    }

    fn validate_ranks(&self) -> Result<(), ConfigError> {
        let ranks = self.ranks.ranks();

        let mut seen = HashSet::new();
        for rank in ranks {
            if !seen.insert(rank.name) {
                return Err(invalid(format!("rank {} is defined twice", rank.name)));
            }
            if !rank.contains(rank.standard) {
                return Err(invalid(format!(
                    "rank {} standard value {} is outside its range",
                    rank.name, rank.standard
                )));
            }
        }

        let missing = self.ranks.missing_ranks();
        if !missing.is_empty() {
            return Err(invalid(format!("rank table is missing {:?}", missing)));
        }

        for pair in ranks.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            match lower.max {
                Some(max) if max.checked_add(1) == Some(upper.min) => {}
                Some(max) => {
                    return Err(invalid(format!(
                        "ranks {} (ends {}) and {} (starts {}) are not contiguous",
                        lower.name, max, upper.name, upper.min
                    )))
                }
                None => {
                    return Err(invalid(format!(
                        "rank {} is unbounded but is not the highest rank",
                        lower.name
                    )))
                }
            }
        }

        Ok(())
    }

    fn validate_universal(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for row in self.universal.rows() {
            if !seen.insert(row.rank) {
                return Err(invalid(format!("universal row {} is defined twice", row.rank)));
            }
            if !row.partitions_percentile() {
                return Err(invalid(format!(
                    "universal row {} does not partition 1..=100",
                    row.rank
                )));
            }
        }

        let missing = self.universal.missing_ranks();
        if !missing.is_empty() {
            return Err(invalid(format!("universal table is missing {:?}", missing)));
        }

        Ok(())
    }

    fn validate_actions(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for definition in self.actions.definitions() {
            if !seen.insert(definition.action) {
                return Err(invalid(format!("action {} is defined twice", definition.action)));
            }
            if definition.white.kind != EffectKind::Miss {
                return Err(invalid(format!(
                    "action {} white result must be a miss, found {}",
                    definition.action, definition.white.kind
                )));
            }
        }

        let missing = self.actions.missing_actions();
        if !missing.is_empty() {
            return Err(invalid(format!("action catalog is missing {:?}", missing)));
        }

        Ok(())
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::ValidationError(message)
}

/// Load rules from a TOML file
pub fn load_rules(path: &Path) -> Result<Rules, ConfigError> {
    let file: RulesFile = super::load_toml(path)?;
    Rules::from_file(file)
}

/// Load rules from a TOML string
pub fn parse_rules(content: &str) -> Result<Rules, ConfigError> {
    let file: RulesFile = super::parse_toml(content)?;
    Rules::from_file(file)
}
