//! Risk register - the mutable collection behind the derived views
//!
//! Owns record creation, wholesale edit, and deletion by id. The derived
//! view pipeline never touches this; it only reads the snapshot handed
//! out by [`RiskRegister::risks`].
//!
//! Global invariants enforced:
//! - Ids are assigned once at creation and never reused within a register
//! - `risk_score` is recomputed on every create, edit, and load
//! - No wall clock; ids come from a monotonic counter

use crate::risk::{AttachmentRef, ResponseStrategy, Risk, RiskCategory, RiskLevel, RiskStatus};
use anyhow::{Context, Result};
use std::path::Path;

/// User-settable fields of a risk; id and score are assigned by the register
#[derive(Debug, Clone)]
pub struct RiskDraft {
    pub title: String,
    pub description: String,
    pub category: RiskCategory,
    pub date_identified: String,
    pub risk_owner: String,
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    pub status: RiskStatus,
    pub response_strategy: ResponseStrategy,
    pub due_date: String,
    pub attachments: Vec<AttachmentRef>,
    pub mitigation_plan: Option<String>,
    pub contingency_plan: Option<String>,
}

impl RiskDraft {
    fn into_risk(self, id: String) -> Risk {
        let mut risk = Risk {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            date_identified: self.date_identified,
            risk_owner: self.risk_owner,
            probability: self.probability,
            impact: self.impact,
            risk_score: 0,
            status: self.status,
            response_strategy: self.response_strategy,
            due_date: self.due_date,
            attachments: self.attachments,
            mitigation_plan: self.mitigation_plan,
            contingency_plan: self.contingency_plan,
        };
        risk.normalize();
        risk
    }
}

/// In-memory risk collection with create/edit/delete by id
#[derive(Debug, Default)]
pub struct RiskRegister {
    risks: Vec<Risk>,
    next_id: u64,
}

impl RiskRegister {
    pub fn new() -> Self {
        RiskRegister {
            risks: Vec::new(),
            next_id: 1,
        }
    }

    /// Build a register from existing records, normalizing every score and
    /// seeding the id counter past the highest numeric id seen.
    pub fn from_records(mut risks: Vec<Risk>) -> Self {
        for risk in &mut risks {
            risk.normalize();
        }
        let next_id = risks
            .iter()
            .filter_map(|r| r.id.parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        RiskRegister { risks, next_id }
    }

    /// Snapshot of the current collection, in insertion order
    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    /// Create a record: assigns the next id and computes the score
    pub fn add(&mut self, draft: RiskDraft) -> &Risk {
        let id = self.next_id.to_string();
        self.next_id += 1;
        let index = self.risks.len();
        self.risks.push(draft.into_risk(id));
        &self.risks[index]
    }

    /// Replace a record wholesale, keeping its id and recomputing the score
    pub fn update(&mut self, id: &str, draft: RiskDraft) -> Result<()> {
        let slot = self
            .risks
            .iter_mut()
            .find(|r| r.id == id)
            .with_context(|| format!("no risk with id {}", id))?;
        *slot = draft.into_risk(id.to_string());
        Ok(())
    }

    /// Delete a record by id
    pub fn remove(&mut self, id: &str) -> Result<()> {
        let index = self
            .risks
            .iter()
            .position(|r| r.id == id)
            .with_context(|| format!("no risk with id {}", id))?;
        self.risks.remove(index);
        Ok(())
    }
}

/// Load a JSON array of risk records from a file.
///
/// Every record's `risk_score` is recomputed from its probability and
/// impact; a stored score is never trusted. A malformed record (unknown
/// enumeration token, missing field) is skipped with a warning rather
/// than failing the whole batch; only a file that is not a JSON array
/// fails the load.
pub fn load_records(path: &Path) -> Result<Vec<Risk>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read records file: {}", path.display()))?;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse records file: {}", path.display()))?;

    let mut risks = Vec::with_capacity(entries.len());
    let mut skipped: usize = 0;
    for entry in entries {
        match serde_json::from_value::<Risk>(entry) {
            Ok(mut risk) => {
                risk.normalize();
                risks.push(risk);
            }
            Err(e) => {
                eprintln!(
                    "warning: skipping malformed record in {}: {}",
                    path.display(),
                    e
                );
                skipped += 1;
            }
        }
    }
    if skipped > 0 {
        eprintln!("Skipped {} record(s) due to parse errors", skipped);
    }
    Ok(risks)
}

/// The three demo records the register seeds for first use
pub fn sample_records() -> Vec<Risk> {
    let mut register = RiskRegister::new();
    register.add(RiskDraft {
        title: "Server Infrastructure Failure".to_string(),
        description: "Critical server hardware failure could lead to system downtime".to_string(),
        category: RiskCategory::Technical,
        date_identified: "2024-01-15".to_string(),
        risk_owner: "John Smith".to_string(),
        probability: RiskLevel::Medium,
        impact: RiskLevel::High,
        status: RiskStatus::Open,
        response_strategy: ResponseStrategy::Mitigation,
        due_date: "2024-02-15".to_string(),
        attachments: vec![],
        mitigation_plan: None,
        contingency_plan: None,
    });
    register.add(RiskDraft {
        title: "Budget Overrun".to_string(),
        description: "Project costs exceeding allocated budget by 20%".to_string(),
        category: RiskCategory::Financial,
        date_identified: "2024-01-10".to_string(),
        risk_owner: "Sarah Johnson".to_string(),
        probability: RiskLevel::High,
        impact: RiskLevel::Medium,
        status: RiskStatus::InProgress,
        response_strategy: ResponseStrategy::Mitigation,
        due_date: "2024-01-30".to_string(),
        attachments: vec![],
        mitigation_plan: None,
        contingency_plan: None,
    });
    register.add(RiskDraft {
        title: "Regulatory Compliance".to_string(),
        description: "New data protection regulations may require system changes".to_string(),
        category: RiskCategory::Legal,
        date_identified: "2024-01-20".to_string(),
        risk_owner: "Mike Davis".to_string(),
        probability: RiskLevel::Low,
        impact: RiskLevel::High,
        status: RiskStatus::Open,
        response_strategy: ResponseStrategy::Avoidance,
        due_date: "2024-03-01".to_string(),
        attachments: vec![],
        mitigation_plan: None,
        contingency_plan: None,
    });
    register.risks().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn draft(title: &str, probability: RiskLevel, impact: RiskLevel) -> RiskDraft {
        RiskDraft {
            title: title.to_string(),
            description: String::new(),
            category: RiskCategory::Technical,
            date_identified: "2024-01-15".to_string(),
            risk_owner: "Owner".to_string(),
            probability,
            impact,
            status: RiskStatus::Open,
            response_strategy: ResponseStrategy::Mitigation,
            due_date: String::new(),
            attachments: vec![],
            mitigation_plan: None,
            contingency_plan: None,
        }
    }

    #[test]
    fn test_add_assigns_id_and_computes_score() {
        let mut register = RiskRegister::new();
        let risk = register.add(draft("First", RiskLevel::Medium, RiskLevel::High));
        assert_eq!(risk.id, "1");
        assert_eq!(risk.risk_score, 6);

        let risk = register.add(draft("Second", RiskLevel::Low, RiskLevel::Low));
        assert_eq!(risk.id, "2");
        assert_eq!(risk.risk_score, 1);
    }

    #[test]
    fn test_update_keeps_id_and_recomputes_score() {
        let mut register = RiskRegister::new();
        register.add(draft("First", RiskLevel::Low, RiskLevel::Low));

        register
            .update("1", draft("Renamed", RiskLevel::High, RiskLevel::High))
            .unwrap();
        let risk = &register.risks()[0];
        assert_eq!(risk.id, "1");
        assert_eq!(risk.title, "Renamed");
        assert_eq!(risk.risk_score, 9);
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut register = RiskRegister::new();
        let err = register
            .update("99", draft("Ghost", RiskLevel::Low, RiskLevel::Low))
            .unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_remove_by_id() {
        let mut register = RiskRegister::new();
        register.add(draft("First", RiskLevel::Low, RiskLevel::Low));
        register.add(draft("Second", RiskLevel::Low, RiskLevel::Low));

        register.remove("1").unwrap();
        assert_eq!(register.risks().len(), 1);
        assert_eq!(register.risks()[0].id, "2");

        assert!(register.remove("1").is_err());
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut register = RiskRegister::new();
        register.add(draft("First", RiskLevel::Low, RiskLevel::Low));
        register.remove("1").unwrap();
        let risk = register.add(draft("Second", RiskLevel::Low, RiskLevel::Low));
        assert_eq!(risk.id, "2");
    }

    #[test]
    fn test_from_records_seeds_counter_and_normalizes() {
        let mut records = sample_records();
        records[0].risk_score = 42; // tamper with the stored score
        let mut register = RiskRegister::from_records(records);
        assert_eq!(register.risks()[0].risk_score, 6);

        let risk = register.add(draft("Fourth", RiskLevel::Low, RiskLevel::Low));
        assert_eq!(risk.id, "4");
    }

    #[test]
    fn test_load_records_recomputes_scores() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // stored risk_score disagrees with Medium x High; the load fixes it
        write!(
            file,
            r#"[{{
                "id": "1",
                "title": "Server Failure",
                "description": "desc",
                "category": "Technical",
                "date_identified": "2024-01-15",
                "risk_owner": "John Smith",
                "probability": "Medium",
                "impact": "High",
                "risk_score": 2,
                "status": "In Progress",
                "response_strategy": "Mitigation",
                "due_date": ""
            }}]"#
        )
        .unwrap();

        let risks = load_records(file.path()).unwrap();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].risk_score, 6);
        assert_eq!(risks[0].status, RiskStatus::InProgress);
    }

    #[test]
    fn test_load_records_skips_malformed_record_keeps_rest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // first record carries an unknown probability level; only it is
        // dropped, the batch survives
        write!(
            file,
            r#"[{{
                "id": "1",
                "title": "Bad",
                "description": "",
                "category": "Technical",
                "date_identified": "2024-01-15",
                "risk_owner": "X",
                "probability": "Severe",
                "impact": "High",
                "status": "Open",
                "response_strategy": "Accept"
            }},
            {{
                "id": "2",
                "title": "Good",
                "description": "",
                "category": "Legal",
                "date_identified": "2024-01-20",
                "risk_owner": "Y",
                "probability": "Low",
                "impact": "High",
                "status": "Open",
                "response_strategy": "Avoidance"
            }}]"#
        )
        .unwrap();

        let risks = load_records(file.path()).unwrap();
        assert_eq!(risks.len(), 1);
        assert_eq!(risks[0].id, "2");
        assert_eq!(risks[0].risk_score, 3);
    }

    #[test]
    fn test_load_records_rejects_non_array_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"not": "an array"}}"#).unwrap();
        let err = load_records(file.path()).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_sample_records_match_seed_data() {
        let records = sample_records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].risk_score, 6);
        assert_eq!(records[1].risk_score, 6);
        assert_eq!(records[2].risk_score, 3);
        assert_eq!(records[2].id, "3");
    }
}
