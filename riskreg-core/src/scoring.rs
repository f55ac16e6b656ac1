//! Risk score calculation and severity banding
//!
//! Global invariants enforced:
//! - Deterministic scoring (pure product of level ranks)
//! - One shared banding predicate for list and matrix views

use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// Compute the risk score for a probability/impact pair.
///
/// Score = probability rank x impact rank, so the range is 1-9 and the
/// function is total over the three-level scale.
pub fn risk_score(probability: RiskLevel, impact: RiskLevel) -> u8 {
    probability.rank() * impact.rank()
}

/// Severity band derived from a risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,    // < 3
    Medium, // 3-5
    High,   // >= 6
}

impl Severity {
    /// Assign the severity band for a score.
    ///
    /// This is the single banding predicate; every severity decision
    /// (list color, matrix cell color, severity filter, band counts)
    /// must go through it.
    pub fn of_score(score: u8) -> Severity {
        if score >= 6 {
            Severity::High
        } else if score >= 3 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "low" => Some(Severity::Low),
            "medium" => Some(Severity::Medium),
            "high" => Some(Severity::High),
            _ => None,
        }
    }
}
