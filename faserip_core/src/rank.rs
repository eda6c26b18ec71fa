//! Rank table - Named power ranks with numeric ranges
//!
//! Ranks form a single ordered ladder from "Shift 0" to "Beyond". Each rank
//! covers an inclusive band of ability numbers and has a standard value used
//! whenever a rank has to be turned back into a number (column shifts,
//! character generation).

use crate::error::CombatError;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Name of a rank on the power ladder, in ladder order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RankName {
    #[serde(rename = "Shift 0")]
    #[strum(serialize = "Shift 0")]
    Shift0,
    Feeble,
    Poor,
    Typical,
    Good,
    Excellent,
    Remarkable,
    Incredible,
    Amazing,
    Monstrous,
    Unearthly,
    #[serde(rename = "Shift X")]
    #[strum(serialize = "Shift X")]
    ShiftX,
    #[serde(rename = "Shift Y")]
    #[strum(serialize = "Shift Y")]
    ShiftY,
    #[serde(rename = "Shift Z")]
    #[strum(serialize = "Shift Z")]
    ShiftZ,
    #[serde(rename = "Class 1000")]
    #[strum(serialize = "Class 1000")]
    Class1000,
    #[serde(rename = "Class 3000")]
    #[strum(serialize = "Class 3000")]
    Class3000,
    #[serde(rename = "Class 5000")]
    #[strum(serialize = "Class 5000")]
    Class5000,
    Beyond,
}

impl RankName {
    /// Parse a rank from its display name, ignoring case
    pub fn parse(name: &str) -> Result<Self, CombatError> {
        name.parse()
            .map_err(|_| CombatError::UnknownRank(name.to_string()))
    }
}

/// Definition of one rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDef {
    pub name: RankName,
    /// Lowest ability number in this rank
    pub min: u32,
    /// Highest ability number in this rank (`None` = unbounded)
    #[serde(default)]
    pub max: Option<u32>,
    /// Representative value for the rank
    pub standard: u32,
}

impl RankDef {
    pub fn new(name: RankName, min: u32, max: Option<u32>, standard: u32) -> Self {
        RankDef {
            name,
            min,
            max,
            standard,
        }
    }

    /// Check whether a number falls inside this rank
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

/// A rank after a column shift, with its representative value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftedRank {
    pub rank: RankName,
    pub value: u32,
}

/// Ordered rank table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankTable {
    ranks: Vec<RankDef>,
}

impl RankTable {
    /// Build a table from definitions, sorted into ladder order
    pub fn new(mut ranks: Vec<RankDef>) -> Self {
        ranks.sort_by_key(|r| r.name);
        RankTable { ranks }
    }

    /// The standard FASERIP rank table
    pub fn standard() -> Self {
        use RankName::*;
        RankTable::new(vec![
            RankDef::new(Shift0, 0, Some(0), 0),
            RankDef::new(Feeble, 1, Some(2), 2),
            RankDef::new(Poor, 3, Some(5), 4),
            RankDef::new(Typical, 6, Some(7), 6),
            RankDef::new(Good, 8, Some(15), 10),
            RankDef::new(Excellent, 16, Some(25), 20),
            RankDef::new(Remarkable, 26, Some(35), 30),
            RankDef::new(Incredible, 36, Some(45), 40),
            RankDef::new(Amazing, 46, Some(62), 50),
            RankDef::new(Monstrous, 63, Some(87), 75),
            RankDef::new(Unearthly, 88, Some(125), 100),
            RankDef::new(ShiftX, 126, Some(175), 150),
            RankDef::new(ShiftY, 176, Some(350), 200),
            RankDef::new(ShiftZ, 351, Some(999), 500),
            RankDef::new(Class1000, 1000, Some(1000), 1000),
            RankDef::new(Class3000, 1001, Some(3000), 3000),
            RankDef::new(Class5000, 3001, Some(5000), 5000),
            RankDef::new(Beyond, 5001, None, 5001),
        ])
    }

    /// Rank definitions in ladder order
    pub fn ranks(&self) -> &[RankDef] {
        &self.ranks
    }

    pub fn get(&self, rank: RankName) -> Result<&RankDef, CombatError> {
        self.ranks
            .iter()
            .find(|r| r.name == rank)
            .ok_or_else(|| CombatError::UnknownRank(rank.to_string()))
    }

    pub fn standard_value(&self, rank: RankName) -> Result<u32, CombatError> {
        self.get(rank).map(|r| r.standard)
    }

    /// Find the rank whose range contains `value`
    pub fn rank_of(&self, value: u32) -> Result<RankName, CombatError> {
        self.ranks
            .iter()
            .find(|r| r.contains(value))
            .map(|r| r.name)
            .ok_or(CombatError::ValueOutOfRange(value))
    }

    /// Shift a rank `shift` steps along the table, clamped to both ends
    pub fn shift(&self, rank: RankName, shift: i32) -> Result<ShiftedRank, CombatError> {
        let position = self
            .ranks
            .iter()
            .position(|r| r.name == rank)
            .ok_or_else(|| CombatError::UnknownRank(rank.to_string()))?;

        let last = self.ranks.len() as i64 - 1;
        let target = (position as i64 + shift as i64).clamp(0, last) as usize;
        let def = &self.ranks[target];

        Ok(ShiftedRank {
            rank: def.name,
            value: def.standard,
        })
    }

    /// Ranks defined by the rank ladder but missing from this table
    pub fn missing_ranks(&self) -> Vec<RankName> {
        RankName::iter()
            .filter(|name| !self.ranks.iter().any(|r| r.name == *name))
            .collect()
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::standard()
    }
}
