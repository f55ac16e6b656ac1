//! Filter engine - narrows a record collection to the current view
//!
//! Global invariants enforced:
//! - Order-preserving (input sequence order survives filtering)
//! - Pure: input collection is never mutated
//! - Predicates combine with logical AND only

use crate::risk::{Risk, RiskCategory, RiskStatus};
use crate::scoring::Severity;

/// Filter criteria for the list and matrix views.
///
/// Each field defaults to unrestricted (`None`); the `"all"` wire token
/// maps to `None` at the config/CLI layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<RiskCategory>,
    pub status: Option<RiskStatus>,
    pub owner: Option<String>,
    pub severity: Option<Severity>,
}

impl FilterCriteria {
    /// True when no criterion restricts the view
    pub fn is_unrestricted(&self) -> bool {
        self.category.is_none()
            && self.status.is_none()
            && self.owner.is_none()
            && self.severity.is_none()
    }
}

/// Whether a single record passes the search term and every active criterion
fn matches(risk: &Risk, search_lower: &str, criteria: &FilterCriteria) -> bool {
    let matches_search = search_lower.is_empty()
        || risk.title.to_lowercase().contains(search_lower)
        || risk.description.to_lowercase().contains(search_lower);

    let matches_category = criteria.category.map_or(true, |c| risk.category == c);
    let matches_status = criteria.status.map_or(true, |s| risk.status == s);
    let matches_owner = criteria
        .owner
        .as_deref()
        .map_or(true, |o| risk.risk_owner == o);
    let matches_severity = criteria
        .severity
        .map_or(true, |sev| Severity::of_score(risk.risk_score) == sev);

    matches_search && matches_category && matches_status && matches_owner && matches_severity
}

/// Filter records by search term and criteria.
///
/// The search term is matched case-insensitively against title and
/// description; an empty term always passes. Returns a new collection in
/// the input order.
pub fn filter_risks(risks: &[Risk], search: &str, criteria: &FilterCriteria) -> Vec<Risk> {
    let search_lower = search.to_lowercase();
    risks
        .iter()
        .filter(|risk| matches(risk, &search_lower, criteria))
        .cloned()
        .collect()
}

/// Distinct owner values present in the full record collection,
/// first-seen order.
///
/// Always computed over the unfiltered collection so an active owner
/// restriction never removes other owners from future selection.
pub fn distinct_owners(risks: &[Risk]) -> Vec<String> {
    let mut owners: Vec<String> = Vec::new();
    for risk in risks {
        if !owners.iter().any(|o| o == &risk.risk_owner) {
            owners.push(risk.risk_owner.clone());
        }
    }
    owners
}
