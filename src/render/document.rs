use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{CorrectionStats, Report, RiskStats};
use crate::organize::{organize, LocationGroup, Weights};

/// One row of the revision-history table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionEntry {
    /// 1-based position in the chain; the root inspection is revision 1
    pub number: usize,
    pub report_id: String,
    pub created_date: DateTime<Utc>,
    pub is_reinspection: bool,
}

/// One report of the chain, organized for print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSection {
    pub report_id: String,
    pub revision_number: usize,
    pub is_reinspection: bool,
    pub inspection_date: Option<String>,
    pub groups: Vec<LocationGroup>,
    pub risk_stats: RiskStats,
    pub correction_stats: CorrectionStats,
}

/// A numbered heading in the document summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionHeading {
    pub number: usize,
    pub title: String,
}

/// Fully assembled, render-agnostic print document for one revision chain.
/// The terminal and JSON renderers both consume this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintDocument {
    pub client_name: String,
    pub engineer_name: String,
    pub engineer_registry: String,
    pub property_address: String,
    pub revisions: Vec<RevisionEntry>,
    pub reports: Vec<ReportSection>,
    pub summary: Vec<SectionHeading>,
}

// Headings 1-5 are fixed; trailing headings are numbered dynamically from 6,
// matching how the printed summary grows when optional sections appear.
const FIXED_HEADINGS: [&str; 5] = [
    "IDENTIFICATION OF PARTIES",
    "PROPERTY IDENTIFICATION",
    "INSPECTION SCOPE",
    "METHODOLOGY",
    "TECHNICAL FINDINGS",
];

const FIRST_DYNAMIC_SECTION: usize = 6;

/// Assemble a print document from a resolved chain (root first, as produced
/// by `lineage::resolve_chain`). Header metadata comes from the latest
/// revision. Returns None for an empty chain — nothing to display.
pub fn assemble(chain: &[Report], weights: &Weights) -> Option<PrintDocument> {
    let latest = chain.last()?;

    let revisions = chain
        .iter()
        .enumerate()
        .map(|(idx, report)| RevisionEntry {
            number: idx + 1,
            report_id: report.id.clone(),
            created_date: report.created_date,
            is_reinspection: report.is_reinspection,
        })
        .collect();

    let reports = chain
        .iter()
        .enumerate()
        .map(|(idx, report)| ReportSection {
            report_id: report.id.clone(),
            revision_number: idx + 1,
            is_reinspection: report.is_reinspection,
            inspection_date: report.inspection_date.clone(),
            groups: organize(&report.items, weights),
            risk_stats: report.risk_stats(),
            correction_stats: report.correction_stats(),
        })
        .collect();

    let mut summary: Vec<SectionHeading> = FIXED_HEADINGS
        .iter()
        .enumerate()
        .map(|(idx, title)| SectionHeading {
            number: idx + 1,
            title: title.to_string(),
        })
        .collect();

    let mut next = FIRST_DYNAMIC_SECTION;
    for title in ["TECHNICAL DOCUMENTATION", "FINAL CONSIDERATIONS", "SIGNATURE"] {
        summary.push(SectionHeading {
            number: next,
            title: title.to_string(),
        });
        next += 1;
    }

    Some(PrintDocument {
        client_name: latest.client_name.clone(),
        engineer_name: latest.engineer_name.clone(),
        engineer_registry: latest.engineer_registry.clone(),
        property_address: latest.property_address.clone(),
        revisions,
        reports,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CorrectionStatus, Finding, ReportStatus, RiskLevel};
    use chrono::TimeZone;

    fn finding(id: &str, location: &str, risk: RiskLevel) -> Finding {
        Finding {
            id: id.to_string(),
            location: location.to_string(),
            risk_level: risk,
            technical_description: String::new(),
            correction_notes: String::new(),
            photos: vec![],
            correction_photos: vec![],
            correction_status: CorrectionStatus::Pending,
        }
    }

    fn report(id: &str, parent: Option<&str>, day: u32, items: Vec<Finding>) -> Report {
        Report {
            id: id.to_string(),
            parent_report_id: parent.map(|p| p.to_string()),
            created_date: Utc.with_ymd_and_hms(2026, 4, day, 9, 0, 0).unwrap(),
            inspection_date: None,
            is_reinspection: parent.is_some(),
            status: ReportStatus::Draft,
            client_name: format!("client-of-{}", id),
            engineer_name: "J. Silva".to_string(),
            engineer_registry: "CREA-12345".to_string(),
            property_address: "12 Main St".to_string(),
            items,
        }
    }

    #[test]
    fn empty_chain_assembles_to_nothing() {
        assert!(assemble(&[], &Weights::default()).is_none());
    }

    #[test]
    fn revisions_number_chain_positions() {
        let chain = vec![
            report("r1", None, 1, vec![]),
            report("r2", Some("r1"), 5, vec![]),
            report("r3", Some("r2"), 9, vec![]),
        ];
        let doc = assemble(&chain, &Weights::default()).unwrap();

        let numbers: Vec<_> = doc.revisions.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert!(!doc.revisions[0].is_reinspection);
        assert!(doc.revisions[2].is_reinspection);
        assert_eq!(doc.reports[1].revision_number, 2);
    }

    #[test]
    fn header_comes_from_latest_revision() {
        let chain = vec![
            report("r1", None, 1, vec![]),
            report("r2", Some("r1"), 5, vec![]),
        ];
        let doc = assemble(&chain, &Weights::default()).unwrap();
        assert_eq!(doc.client_name, "client-of-r2");
    }

    #[test]
    fn sections_keep_every_finding() {
        let items = vec![
            finding("f1", "Kitchen", RiskLevel::Critical),
            finding("f2", "Bath", RiskLevel::Minimal),
            finding("f3", "", RiskLevel::Regular),
        ];
        let chain = vec![report("r1", None, 1, items)];
        let doc = assemble(&chain, &Weights::default()).unwrap();

        let total: usize = doc.reports[0].groups.iter().map(|g| g.findings.len()).sum();
        assert_eq!(total, 3);
        assert_eq!(doc.reports[0].risk_stats.total, 3);
        assert_eq!(doc.reports[0].correction_stats.pending, 3);
    }

    #[test]
    fn summary_numbering_is_contiguous() {
        let chain = vec![report("r1", None, 1, vec![])];
        let doc = assemble(&chain, &Weights::default()).unwrap();

        let numbers: Vec<_> = doc.summary.iter().map(|s| s.number).collect();
        assert_eq!(numbers, (1..=doc.summary.len()).collect::<Vec<_>>());
        assert_eq!(doc.summary[4].title, "TECHNICAL FINDINGS");
        assert_eq!(doc.summary[5].number, 6);
        assert_eq!(doc.summary.last().unwrap().title, "SIGNATURE");
    }
}
