//! Universal Table - Percentile bands per rank
//!
//! Every rank has four inclusive bands (white, green, yellow, red) that
//! together partition 1..=100. A roll total is classified by the first band
//! whose upper bound reaches it; totals above 100 (karma) land in red.

use crate::error::CombatError;
use crate::rank::RankName;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Inclusive band of percentile results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub low: u32,
    pub high: u32,
}

impl Band {
    pub fn new(low: u32, high: u32) -> Self {
        Band { low, high }
    }
}

/// One row of the Universal Table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalRow {
    pub rank: RankName,
    pub white: Band,
    pub green: Band,
    pub yellow: Band,
    pub red: Band,
}

impl UniversalRow {
    /// Build a row from the upper bounds of white, green and yellow
    pub fn from_bounds(rank: RankName, white_high: u32, green_high: u32, yellow_high: u32) -> Self {
        UniversalRow {
            rank,
            white: Band::new(1, white_high),
            green: Band::new(white_high + 1, green_high),
            yellow: Band::new(green_high + 1, yellow_high),
            red: Band::new(yellow_high + 1, 100),
        }
    }

    /// Bands in ascending color order
    pub fn bands(&self) -> [(Color, Band); 4] {
        [
            (Color::White, self.white),
            (Color::Green, self.green),
            (Color::Yellow, self.yellow),
            (Color::Red, self.red),
        ]
    }

    pub fn band(&self, color: Color) -> Band {
        match color {
            Color::White => self.white,
            Color::Green => self.green,
            Color::Yellow => self.yellow,
            Color::Red => self.red,
        }
    }

    /// Classify a roll total against this row
    pub fn classify(&self, roll_total: u32) -> Color {
        self.bands()
            .iter()
            .find(|(_, band)| band.high >= roll_total)
            .map(|(color, _)| *color)
            .unwrap_or(Color::Red)
    }

    /// Check that the bands partition 1..=100 in order with no gaps
    pub fn partitions_percentile(&self) -> bool {
        let mut expected_low = 1;
        for (_, band) in self.bands() {
            if band.low != expected_low || band.high < band.low {
                return false;
            }
            expected_low = match band.high.checked_add(1) {
                Some(next) => next,
                None => return false,
            };
        }
        expected_low == 101
    }
}

/// The Universal Table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalTable {
    rows: Vec<UniversalRow>,
}

impl UniversalTable {
    pub fn new(mut rows: Vec<UniversalRow>) -> Self {
        rows.sort_by_key(|r| r.rank);
        UniversalTable { rows }
    }

    /// The standard FASERIP Universal Table
    pub fn standard() -> Self {
        use RankName::*;
        let bounds = [
            (Shift0, 65, 94, 99),
            (Feeble, 60, 90, 99),
            (Poor, 55, 85, 99),
            (Typical, 50, 80, 97),
            (Good, 45, 75, 97),
            (Excellent, 40, 70, 94),
            (Remarkable, 35, 65, 94),
            (Incredible, 30, 60, 90),
            (Amazing, 25, 55, 90),
            (Monstrous, 20, 50, 85),
            (Unearthly, 15, 45, 85),
            (ShiftX, 10, 40, 80),
            (ShiftY, 6, 35, 75),
            (ShiftZ, 3, 30, 70),
            (Class1000, 1, 25, 65),
            (Class3000, 1, 20, 60),
            (Class5000, 1, 15, 55),
            (Beyond, 1, 10, 50),
        ];

        UniversalTable::new(
            bounds
                .iter()
                .map(|&(rank, w, g, y)| UniversalRow::from_bounds(rank, w, g, y))
                .collect(),
        )
    }

    pub fn rows(&self) -> &[UniversalRow] {
        &self.rows
    }

    pub fn row(&self, rank: RankName) -> Result<&UniversalRow, CombatError> {
        self.rows
            .iter()
            .find(|r| r.rank == rank)
            .ok_or_else(|| CombatError::UnknownRank(rank.to_string()))
    }

    /// Classify a roll total against a rank's row
    pub fn classify(&self, rank: RankName, roll_total: u32) -> Result<Color, CombatError> {
        self.row(rank).map(|row| row.classify(roll_total))
    }

    /// Ranks without a row in this table
    pub fn missing_ranks(&self) -> Vec<RankName> {
        RankName::iter()
            .filter(|name| !self.rows.iter().any(|r| r.rank == *name))
            .collect()
    }
}

impl Default for UniversalTable {
    fn default() -> Self {
        Self::standard()
    }
}
