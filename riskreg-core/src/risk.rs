//! Risk entity model
//!
//! Global invariants enforced:
//! - `risk_score` is derived from probability and impact, never trusted
//!   from input (see [`Risk::normalize`])
//! - Attachments are opaque references, never dereferenced
//! - Dates are ISO 8601 date strings; an empty `due_date` means "no due date"

use crate::scoring;
use serde::{Deserialize, Serialize};

/// Risk category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Technical,
    Financial,
    Legal,
    Operational,
    Strategic,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Technical => "Technical",
            RiskCategory::Financial => "Financial",
            RiskCategory::Legal => "Legal",
            RiskCategory::Operational => "Operational",
            RiskCategory::Strategic => "Strategic",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Technical" => Some(RiskCategory::Technical),
            "Financial" => Some(RiskCategory::Financial),
            "Legal" => Some(RiskCategory::Legal),
            "Operational" => Some(RiskCategory::Operational),
            "Strategic" => Some(RiskCategory::Strategic),
            _ => None,
        }
    }
}

/// Workflow status of a risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Mitigated,
    Closed,
}

impl RiskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskStatus::Open => "Open",
            RiskStatus::InProgress => "In Progress",
            RiskStatus::Mitigated => "Mitigated",
            RiskStatus::Closed => "Closed",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Open" => Some(RiskStatus::Open),
            "In Progress" => Some(RiskStatus::InProgress),
            "Mitigated" => Some(RiskStatus::Mitigated),
            "Closed" => Some(RiskStatus::Closed),
            _ => None,
        }
    }
}

/// Chosen remediation posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStrategy {
    Mitigation,
    Contingency,
    Avoidance,
    Transfer,
    Accept,
}

impl ResponseStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStrategy::Mitigation => "Mitigation",
            ResponseStrategy::Contingency => "Contingency",
            ResponseStrategy::Avoidance => "Avoidance",
            ResponseStrategy::Transfer => "Transfer",
            ResponseStrategy::Accept => "Accept",
        }
    }
}

/// Ordered three-level scale used for both probability and impact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Numeric rank: Low=1, Medium=2, High=3
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// Opaque attachment reference (name plus content-addressable handle).
/// The core never reads, uploads, or persists the referenced content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AttachmentRef {
    pub name: String,
    pub handle: String,
}

/// A tracked risk record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Risk {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: RiskCategory,
    /// ISO 8601 date the risk was identified
    pub date_identified: String,
    pub risk_owner: String,
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    /// Derived severity, probability rank x impact rank (1-9).
    /// Recomputed on every create/edit; input values are discarded.
    #[serde(default)]
    pub risk_score: u8,
    pub status: RiskStatus,
    pub response_strategy: ResponseStrategy,
    /// ISO 8601 due date; empty string means no due date
    #[serde(default)]
    pub due_date: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contingency_plan: Option<String>,
}

impl Risk {
    /// Recompute the derived `risk_score` from probability and impact.
    ///
    /// Called at every boundary where a record enters the system so a stored
    /// or hand-edited score can never drift from its inputs.
    pub fn normalize(&mut self) {
        self.risk_score = scoring::risk_score(self.probability, self.impact);
    }

    /// Whether the risk is overdue as of `today` (ISO 8601 date string).
    ///
    /// A risk with no due date is never overdue, and closing a risk clears
    /// overdue regardless of its due date. ISO date strings order correctly
    /// under lexicographic comparison, so no date parsing is needed.
    pub fn is_overdue(&self, today: &str) -> bool {
        !self.due_date.is_empty()
            && self.status != RiskStatus::Closed
            && self.due_date.as_str() < today
    }
}
