//! Risk register core library - derived views over in-memory risk records

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Derived views are pure functions of an explicit record snapshot
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Deterministic ordering must be explicit
// - Identical input yields byte-for-byte identical output

pub mod config;
pub mod filter;
pub mod matrix;
pub mod register;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod sort;

pub use config::{ResolvedView, ViewConfig};
pub use filter::{distinct_owners, filter_risks, FilterCriteria};
pub use matrix::{aggregate, MatrixView};
pub use register::{load_records, RiskDraft, RiskRegister};
pub use report::{render_json, render_matrix_json, render_matrix_text, render_text};
pub use risk::{Risk, RiskCategory, RiskLevel, RiskStatus};
pub use scoring::Severity;
pub use sort::{sort_risks, SortDirection, SortField};

/// Options for deriving a list view from a record snapshot
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    pub search: String,
    pub criteria: FilterCriteria,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortDirection>,
    pub top: Option<usize>,
}

impl From<&ResolvedView> for ViewOptions {
    fn from(resolved: &ResolvedView) -> Self {
        ViewOptions {
            search: resolved.search.clone(),
            criteria: resolved.criteria.clone(),
            sort_by: Some(resolved.sort_by),
            sort_order: Some(resolved.sort_order),
            top: resolved.top,
        }
    }
}

/// Derive the list view: filter, then sort, then optionally truncate.
///
/// The caller owns the authoritative collection and re-invokes this after
/// any mutation; nothing is cached here.
pub fn derive_view(risks: &[Risk], options: &ViewOptions) -> Vec<Risk> {
    let filtered = filter_risks(risks, &options.search, &options.criteria);

    let sorted = match options.sort_by {
        Some(field) => sort_risks(
            &filtered,
            field,
            options.sort_order.unwrap_or(SortDirection::Descending),
        ),
        None => filtered,
    };

    match options.top {
        Some(top) => sorted.into_iter().take(top).collect(),
        None => sorted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::sample_records;

    #[test]
    fn test_derive_view_default_sorts_by_score_descending() {
        let risks = sample_records();
        let options = ViewOptions {
            sort_by: Some(SortField::RiskScore),
            sort_order: Some(SortDirection::Descending),
            ..Default::default()
        };
        let view = derive_view(&risks, &options);
        assert_eq!(view.len(), 3);
        assert!(view[0].risk_score >= view[1].risk_score);
        assert!(view[1].risk_score >= view[2].risk_score);
    }

    #[test]
    fn test_derive_view_filters_then_sorts_then_truncates() {
        let risks = sample_records();
        let options = ViewOptions {
            criteria: FilterCriteria {
                severity: Some(Severity::High),
                ..Default::default()
            },
            sort_by: Some(SortField::Title),
            sort_order: Some(SortDirection::Ascending),
            top: Some(1),
            ..Default::default()
        };
        let view = derive_view(&risks, &options);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].title, "Budget Overrun");
    }

    #[test]
    fn test_derive_view_without_sort_preserves_filter_order() {
        let risks = sample_records();
        let options = ViewOptions {
            search: "e".to_string(), // matches all three
            ..Default::default()
        };
        let view = derive_view(&risks, &options);
        assert_eq!(view, risks);
    }

    #[test]
    fn test_derive_view_empty_snapshot() {
        let view = derive_view(&[], &ViewOptions::default());
        assert!(view.is_empty());
    }
}
