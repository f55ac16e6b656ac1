//! Sort engine - orders a record collection for the list view
//!
//! Global invariants enforced:
//! - Comparison is defined per field over a known-comparable set
//!   (numeric, text, ISO date string); no generic cross-type comparator
//! - Descending is the exact reverse of the ascending relation, so both
//!   directions share one transitive total order

use crate::risk::Risk;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sortable record fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    RiskScore,
    Title,
    RiskOwner,
    DateIdentified,
    DueDate,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::RiskScore => "risk_score",
            SortField::Title => "title",
            SortField::RiskOwner => "risk_owner",
            SortField::DateIdentified => "date_identified",
            SortField::DueDate => "due_date",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "risk_score" => Some(SortField::RiskScore),
            "title" => Some(SortField::Title),
            "risk_owner" => Some(SortField::RiskOwner),
            "date_identified" => Some(SortField::DateIdentified),
            "due_date" => Some(SortField::DueDate),
            _ => None,
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "asc" | "ascending" => Some(SortDirection::Ascending),
            "desc" | "descending" => Some(SortDirection::Descending),
            _ => None,
        }
    }
}

/// Compare two due dates, empty ("no due date") ordering after any
/// concrete date so undated records land last in an ascending sort.
fn cmp_due_date(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.cmp(b),
    }
}

/// Ascending ordering for one field. ISO date strings compare correctly
/// lexicographically, so `date_identified` needs no parsing.
fn cmp_field(a: &Risk, b: &Risk, field: SortField) -> Ordering {
    match field {
        SortField::RiskScore => a.risk_score.cmp(&b.risk_score),
        SortField::Title => a.title.cmp(&b.title),
        SortField::RiskOwner => a.risk_owner.cmp(&b.risk_owner),
        SortField::DateIdentified => a.date_identified.cmp(&b.date_identified),
        SortField::DueDate => cmp_due_date(&a.due_date, &b.due_date),
    }
}

/// Sort records by a field and direction.
///
/// Returns a new sequence; equal values retain no specified relative
/// order. Pure: the input collection is untouched.
pub fn sort_risks(risks: &[Risk], field: SortField, direction: SortDirection) -> Vec<Risk> {
    let mut sorted = risks.to_vec();
    sorted.sort_by(|a, b| {
        let ordering = cmp_field(a, b, field);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    sorted
}
