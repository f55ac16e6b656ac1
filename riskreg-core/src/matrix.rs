//! Matrix aggregator - 3x3 probability/impact grid for the matrix view
//!
//! Computes derived buckets and band counts from a record collection
//! without modifying it.
//!
//! Global invariants enforced:
//! - Aggregates are strictly derived (never stored, always computed)
//! - Cell membership comes from the stored probability/impact fields,
//!   never from recomputing levels out of the risk score
//! - Cell display scores reproduce the same banding as the list view

use crate::risk::{Risk, RiskLevel};
use crate::scoring::Severity;
use serde::{Deserialize, Serialize};

/// Row order: probability High at the top, Low at the bottom
pub const PROBABILITY_ROWS: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

/// Column order: impact Low at the left, High at the right
pub const IMPACT_COLS: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

/// A record's presence in a cell (id plus title for display)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CellEntry {
    pub id: String,
    pub title: String,
}

/// One bucket of the probability/impact grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatrixCell {
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    /// Display score for the cell, probability rank x impact rank
    pub score: u8,
    pub band: Severity,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub entries: Vec<CellEntry>,
}

/// The aggregated matrix view: 3x3 grid plus severity band counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MatrixView {
    /// Rows indexed by [`PROBABILITY_ROWS`], columns by [`IMPACT_COLS`]
    pub cells: [[MatrixCell; 3]; 3],
    /// Records with score >= 6, counted from each record's stored score
    pub high_count: usize,
    /// Records with 3 <= score < 6
    pub medium_count: usize,
    /// Records with score < 3
    pub low_count: usize,
}

/// Grid position for a probability/impact pair
fn cell_position(probability: RiskLevel, impact: RiskLevel) -> (usize, usize) {
    let row = 3 - probability.rank() as usize;
    let col = impact.rank() as usize - 1;
    (row, col)
}

/// Bucket records into the 3x3 grid and compute band counts.
///
/// Band counts are taken over the input collection (which may already be
/// filtered upstream) directly from each record's stored `risk_score`;
/// they are independent of the per-cell bucketing. An empty input yields
/// empty cells and zeroed counts.
pub fn aggregate(risks: &[Risk]) -> MatrixView {
    let mut cells: [[MatrixCell; 3]; 3] = std::array::from_fn(|row| {
        std::array::from_fn(|col| {
            // display score reproduces rank product: (3 - row) * (col + 1)
            let score = (3 - row as u8) * (col as u8 + 1);
            MatrixCell {
                probability: PROBABILITY_ROWS[row],
                impact: IMPACT_COLS[col],
                score,
                band: Severity::of_score(score),
                entries: Vec::new(),
            }
        })
    });

    let mut high_count = 0;
    let mut medium_count = 0;
    let mut low_count = 0;

    for risk in risks {
        let (row, col) = cell_position(risk.probability, risk.impact);
        cells[row][col].entries.push(CellEntry {
            id: risk.id.clone(),
            title: risk.title.clone(),
        });

        match Severity::of_score(risk.risk_score) {
            Severity::High => high_count += 1,
            Severity::Medium => medium_count += 1,
            Severity::Low => low_count += 1,
        }
    }

    MatrixView {
        cells,
        high_count,
        medium_count,
        low_count,
    }
}
