use serde::{Deserialize, Serialize};

use crate::model::Finding;

/// Findings with no location land in this group.
pub const UNASSIGNED_LOCATION: &str = "Other";

/// Print-weight tuning. The values estimate rendered vertical size and only
/// matter relative to each other; they drive the tie-break between findings
/// of equal risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Fixed cost of a finding card (header, badges, margins)
    pub base: u32,
    /// Characters assumed to fit on one printed line
    pub chars_per_line: u32,
    /// Cost per line of technical description
    pub description_line: u32,
    /// Cost per line of correction notes (80% of a description line)
    pub notes_line: u32,
    /// Cost per photo row; photos print two to a row
    pub photo_row: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            base: 100,
            chars_per_line: 40,
            description_line: 10,
            notes_line: 8,
            photo_row: 150,
        }
    }
}

impl Weights {
    /// Estimate the rendered vertical size of one finding.
    pub fn estimate(&self, item: &Finding) -> u32 {
        let mut weight = self.base;
        weight += ceil_div(item.technical_description.chars().count() as u32, self.chars_per_line)
            * self.description_line;
        weight += ceil_div(item.correction_notes.chars().count() as u32, self.chars_per_line)
            * self.notes_line;
        weight += ceil_div(item.photos.len() as u32, 2) * self.photo_row;
        weight += ceil_div(item.correction_photos.len() as u32, 2) * self.photo_row;
        weight
    }
}

fn ceil_div(n: u32, d: u32) -> u32 {
    n.div_ceil(d.max(1))
}

/// One location section of the rendered report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationGroup {
    pub location: String,
    pub findings: Vec<Finding>,
}

/// Partition findings by location and order them for presentation.
///
/// Groups appear in first-seen order of their location (the order the
/// inspector walked the property), never re-sorted by severity. Within a
/// group, findings sort by descending risk rank, ties broken by descending
/// print weight so the heaviest cards of equal risk lead their section.
pub fn organize(findings: &[Finding], weights: &Weights) -> Vec<LocationGroup> {
    let mut groups: Vec<LocationGroup> = Vec::new();

    for finding in findings {
        let location = if finding.location.trim().is_empty() {
            UNASSIGNED_LOCATION
        } else {
            finding.location.as_str()
        };
        match groups.iter_mut().find(|g| g.location == location) {
            Some(group) => group.findings.push(finding.clone()),
            None => groups.push(LocationGroup {
                location: location.to_string(),
                findings: vec![finding.clone()],
            }),
        }
    }

    for group in &mut groups {
        group.findings.sort_by(|a, b| {
            b.risk_level
                .rank()
                .cmp(&a.risk_level.rank())
                .then_with(|| weights.estimate(b).cmp(&weights.estimate(a)))
        });
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CorrectionStatus, RiskLevel};

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

    #[test]
    fn groups_emit_in_first_seen_order() {
        let findings = vec![
            finding("f1", "Kitchen", RiskLevel::Minimal),
            finding("f2", "Bath", RiskLevel::Critical),
            finding("f3", "Kitchen", RiskLevel::Critical),
        ];
        let groups = organize(&findings, &Weights::default());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].location, "Kitchen");
        assert_eq!(groups[1].location, "Bath");
        // Critical sorts above minimal within Kitchen.
        assert_eq!(groups[0].findings[0].id, "f3");
        assert_eq!(groups[0].findings[1].id, "f1");
        assert_eq!(groups[1].findings[0].id, "f2");
    }

    #[test]
    fn every_finding_lands_in_exactly_one_group() {
        let findings = vec![
            finding("f1", "Kitchen", RiskLevel::Regular),
            finding("f2", "", RiskLevel::Regular),
            finding("f3", "Roof", RiskLevel::Minimal),
            finding("f4", "Kitchen", RiskLevel::Critical),
            finding("f5", "  ", RiskLevel::Minimal),
        ];
        let groups = organize(&findings, &Weights::default());

        let total: usize = groups.iter().map(|g| g.findings.len()).sum();
        assert_eq!(total, findings.len());

        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for f in &group.findings {
                assert!(seen.insert(f.id.clone()));
            }
        }
    }

    #[test]
    fn blank_location_maps_to_sentinel_group() {
        let findings = vec![
            finding("f1", "", RiskLevel::Regular),
            finding("f2", "   ", RiskLevel::Regular),
        ];
        let groups = organize(&findings, &Weights::default());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].location, UNASSIGNED_LOCATION);
        assert_eq!(groups[0].findings.len(), 2);
    }

    #[test]
    fn risk_rank_dominates_weight() {
        let mut heavy_minimal = finding("f1", "Hall", RiskLevel::Minimal);
        heavy_minimal.technical_description = "x".repeat(4000);
        heavy_minimal.photos = (0..10).map(|i| format!("p{}", i)).collect();
        let light_critical = finding("f2", "Hall", RiskLevel::Critical);

        let groups = organize(&[heavy_minimal, light_critical], &Weights::default());
        assert_eq!(groups[0].findings[0].id, "f2");
        assert_eq!(groups[0].findings[1].id, "f1");
    }

    #[test]
    fn equal_risk_breaks_ties_by_descending_weight() {
        let light = finding("light", "Hall", RiskLevel::Regular);
        let mut heavy = finding("heavy", "Hall", RiskLevel::Regular);
        heavy.technical_description = "long description ".repeat(20);
        heavy.photos = vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()];

        let groups = organize(&[light, heavy], &Weights::default());
        assert_eq!(groups[0].findings[0].id, "heavy");
        assert_eq!(groups[0].findings[1].id, "light");
    }

    #[test]
    fn adjacent_pairs_are_ordered_within_every_group() {
        let weights = Weights::default();
        let risks = [RiskLevel::Minimal, RiskLevel::Critical, RiskLevel::Regular];
        let rooms = ["Kitchen", "Bath", "Roof"];
        let mut findings = Vec::new();
        for i in 0..12 {
            let mut f = finding(&format!("f{}", i), rooms[i % 3], risks[i % 3]);
            f.technical_description = "d".repeat(i * 37);
            f.photos = (0..(i % 5)).map(|p| format!("p{}", p)).collect();
            findings.push(f);
        }

        for group in organize(&findings, &weights) {
            for pair in group.findings.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                assert!(a.risk_level.rank() >= b.risk_level.rank());
                if a.risk_level.rank() == b.risk_level.rank() {
                    assert!(weights.estimate(a) >= weights.estimate(b));
                }
            }
        }
    }

    #[test]
    fn weight_estimate_matches_reference_arithmetic() {
        let weights = Weights::default();

        let empty = finding("f1", "Hall", RiskLevel::Regular);
        assert_eq!(weights.estimate(&empty), 100);

        let mut f = finding("f2", "Hall", RiskLevel::Regular);
        f.technical_description = "x".repeat(41); // 2 lines
        f.correction_notes = "y".repeat(40); // 1 line
        f.photos = vec!["a".into(), "b".into(), "c".into()]; // 2 rows
        f.correction_photos = vec!["d".into()]; // 1 row
        assert_eq!(weights.estimate(&f), 100 + 2 * 10 + 8 + 2 * 150 + 150);
    }

    #[test]
    fn organize_does_not_mutate_input() {
        let findings = vec![
            finding("f1", "Kitchen", RiskLevel::Minimal),
            finding("f2", "Kitchen", RiskLevel::Critical),
        ];
        let _ = organize(&findings, &Weights::default());
        assert_eq!(findings[0].id, "f1");
        assert_eq!(findings[1].id, "f2");
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(organize(&[], &Weights::default()).is_empty());
    }
}
