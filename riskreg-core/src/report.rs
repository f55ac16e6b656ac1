//! Rendering for the list and matrix views
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Identical input yields byte-for-byte identical output

use crate::matrix::MatrixView;
use crate::risk::Risk;
use crate::scoring::Severity;

/// Render the list view as a fixed-width text table.
///
/// `today` (ISO 8601 date) enables the overdue marker; pass `None` to
/// skip overdue determination entirely.
pub fn render_text(risks: &[Risk], today: Option<&str>) -> String {
    if risks.is_empty() {
        return "No risks match the current filters.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6} {:<8} {:<30} {:<12} {:<12} {:<20} {}\n",
        "SCORE", "BAND", "TITLE", "CATEGORY", "STATUS", "OWNER", "DUE"
    ));

    for risk in risks {
        let band = Severity::of_score(risk.risk_score);
        let due = if risk.due_date.is_empty() {
            "-".to_string()
        } else if today.is_some_and(|t| risk.is_overdue(t)) {
            format!("{} (overdue)", risk.due_date)
        } else {
            risk.due_date.clone()
        };
        output.push_str(&format!(
            "{:<6} {:<8} {:<30} {:<12} {:<12} {:<20} {}\n",
            risk.risk_score,
            band.as_str(),
            truncate_or_pad(&risk.title, 30),
            risk.category.as_str(),
            risk.status.as_str(),
            truncate_or_pad(&risk.risk_owner, 20),
            due,
        ));
    }

    output
}

/// Render the list view as JSON
pub fn render_json(risks: &[Risk]) -> String {
    serde_json::to_string_pretty(risks).unwrap_or_else(|_| "[]".to_string())
}

/// Render the matrix view as a text grid with band totals
pub fn render_matrix_text(view: &MatrixView) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<20} {:<26} {:<26} {}\n",
        "", "Low Impact", "Medium Impact", "High Impact"
    ));

    for row in &view.cells {
        let label = format!("{} Probability", row[0].probability.as_str());
        let rendered: Vec<String> = row.iter().map(render_cell).collect();
        output.push_str(&format!(
            "{:<20} {:<26} {:<26} {}\n",
            label, rendered[0], rendered[1], rendered[2]
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "High risk (6-9): {}\nMedium risk (3-5): {}\nLow risk (1-2): {}\n",
        view.high_count, view.medium_count, view.low_count
    ));

    output
}

/// Render the matrix view as JSON
pub fn render_matrix_json(view: &MatrixView) -> String {
    serde_json::to_string_pretty(view).unwrap_or_else(|_| "{}".to_string())
}

/// One cell as "[score] title, title, +N more"
fn render_cell(cell: &crate::matrix::MatrixCell) -> String {
    let mut parts: Vec<String> = cell
        .entries
        .iter()
        .take(2)
        .map(|e| truncate_or_pad(&e.title, 12).trim_end().to_string())
        .collect();
    if cell.entries.len() > 2 {
        parts.push(format!("+{} more", cell.entries.len() - 2));
    }
    if parts.is_empty() {
        format!("[{}]", cell.score)
    } else {
        format!("[{}] {}", cell.score, parts.join(", "))
    }
}

/// Truncate or pad string to fixed width, truncating on char boundaries
/// so multi-byte text never splits mid-character
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let truncated: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        format!("{:<width$}", s, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::aggregate;
    use crate::register::sample_records;

    #[test]
    fn test_render_text_header_and_rows() {
        let risks = sample_records();
        let text = render_text(&risks, None);
        assert!(text.starts_with("SCORE"));
        assert!(text.contains("Server Infrastructure Failure"));
        assert!(text.contains("high"));
        assert_eq!(text.lines().count(), 4); // header + 3 rows
    }

    #[test]
    fn test_render_text_empty_state() {
        let text = render_text(&[], None);
        assert_eq!(text, "No risks match the current filters.\n");
    }

    #[test]
    fn test_render_text_overdue_marker() {
        let risks = sample_records();
        let text = render_text(&risks, Some("2024-06-01"));
        assert!(text.contains("2024-02-15 (overdue)"));

        // before any due date: no markers
        let text = render_text(&risks, Some("2024-01-01"));
        assert!(!text.contains("overdue"));
    }

    #[test]
    fn test_render_text_truncates_multibyte_title_without_splitting() {
        // a multi-byte character straddling the truncation point must not
        // split; titles are free text
        let mut risks = sample_records();
        risks[0].title = format!("{}étude of cascading failures", "x".repeat(26));
        risks[0].risk_owner = format!("{}émile", "y".repeat(18));
        let text = render_text(&risks, None);
        assert!(text.contains("..."));

        let padded = truncate_or_pad("café", 10);
        assert_eq!(padded, "café      ");
        let truncated = truncate_or_pad("éééééééééééé", 10);
        assert_eq!(truncated, "ééééééé...");
    }

    #[test]
    fn test_render_json_round_trips() {
        let risks = sample_records();
        let json = render_json(&risks);
        let back: Vec<crate::risk::Risk> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, risks);
    }

    #[test]
    fn test_render_matrix_text_grid_and_totals() {
        let view = aggregate(&sample_records());
        let text = render_matrix_text(&view);
        assert!(text.contains("High Probability"));
        assert!(text.contains("Low Impact"));
        assert!(text.contains("High risk (6-9): 2"));
        assert!(text.contains("Medium risk (3-5): 1"));
        assert!(text.contains("Low risk (1-2): 0"));
    }

    #[test]
    fn test_render_cell_truncates_entry_list() {
        let mut cell = crate::matrix::MatrixCell {
            probability: crate::risk::RiskLevel::High,
            impact: crate::risk::RiskLevel::High,
            score: 9,
            band: Severity::High,
            entries: vec![],
        };
        assert_eq!(render_cell(&cell), "[9]");

        for i in 0..4 {
            cell.entries.push(crate::matrix::CellEntry {
                id: i.to_string(),
                title: format!("R{}", i),
            });
        }
        let rendered = render_cell(&cell);
        assert!(rendered.contains("R0"));
        assert!(rendered.contains("R1"));
        assert!(rendered.contains("+2 more"));
        assert!(!rendered.contains("R2"));
    }
}
