use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Risk classification of a finding.
///
/// Anything outside the closed set deserializes as `Regular`, so every
/// downstream consumer (display labels, sort ranks) sees the same total
/// classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Critical,
    #[default]
    Regular,
    Minimal,
}

impl<'de> Deserialize<'de> for RiskLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(RiskLevel::from_str(&s))
    }
}

impl RiskLevel {
    pub fn from_str(s: &str) -> Self {
        match s {
            "critical" => RiskLevel::Critical,
            "minimal" => RiskLevel::Minimal,
            _ => RiskLevel::Regular,
        }
    }

    /// Severity ordering used to prioritize display: critical > regular > minimal.
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Critical => 3,
            RiskLevel::Regular => 2,
            RiskLevel::Minimal => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Critical => "CRITICAL",
            RiskLevel::Regular => "REGULAR",
            RiskLevel::Minimal => "MINIMAL",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Correction state of a finding, meaningful only on re-inspection reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionStatus {
    Corrected,
    PartiallyCorrected,
    NotCorrected,
    #[default]
    Pending,
}

impl<'de> Deserialize<'de> for CorrectionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CorrectionStatus::from_str(&s))
    }
}

impl CorrectionStatus {
    pub fn from_str(s: &str) -> Self {
        match s {
            "corrected" => CorrectionStatus::Corrected,
            "partially_corrected" => CorrectionStatus::PartiallyCorrected,
            "not_corrected" => CorrectionStatus::NotCorrected,
            _ => CorrectionStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionStatus::Corrected => "CORRECTED",
            CorrectionStatus::PartiallyCorrected => "PARTIAL",
            CorrectionStatus::NotCorrected => "NOT CORRECTED",
            CorrectionStatus::Pending => "PENDING",
        }
    }

    /// True unless the finding was fully corrected.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, CorrectionStatus::Corrected)
    }
}

impl std::fmt::Display for CorrectionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Draft,
    Finalized,
}

/// A single inspection finding: one anomaly observed at one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Deterministic ID (hash-based) e.g. "LDO-a1b2c3d4"
    pub id: String,

    /// Free-text room/area label. Empty means "not assigned to a location".
    #[serde(default)]
    pub location: String,

    /// Risk classification
    #[serde(default)]
    pub risk_level: RiskLevel,

    /// Technical prose describing the anomaly
    #[serde(default)]
    pub technical_description: String,

    /// Notes recorded when the correction was verified
    #[serde(default)]
    pub correction_notes: String,

    /// Attachment references for the anomaly itself
    #[serde(default)]
    pub photos: Vec<String>,

    /// Attachment references documenting the correction
    #[serde(default)]
    pub correction_photos: Vec<String>,

    /// Correction state (re-inspection reports only)
    #[serde(default)]
    pub correction_status: CorrectionStatus,
}

impl Finding {
    /// Generate a deterministic ID based on location, description, and creation time
    pub fn generate_id(location: &str, description: &str, created: DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(location.as_bytes());
        hasher.update(description.as_bytes());
        hasher.update(created.to_rfc3339().as_bytes());
        let result = hasher.finalize();
        let hex = format!("{:x}", result);
        format!("LDO-{}", &hex[..8])
    }
}

/// One inspection document: either an original inspection or a re-inspection
/// linked to its predecessor via `parent_report_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Opaque unique identifier, assigned at creation, immutable
    pub id: String,

    /// Set only when this report is a re-inspection of another
    #[serde(default)]
    pub parent_report_id: Option<String>,

    /// Creation timestamp; sole tie-breaker for chronological chain ordering
    pub created_date: DateTime<Utc>,

    /// Date the inspection visit took place (free-form, as entered)
    #[serde(default)]
    pub inspection_date: Option<String>,

    #[serde(default)]
    pub is_reinspection: bool,

    #[serde(default)]
    pub status: ReportStatus,

    #[serde(default)]
    pub client_name: String,

    #[serde(default)]
    pub engineer_name: String,

    /// Professional registry number of the responsible engineer
    #[serde(default)]
    pub engineer_registry: String,

    #[serde(default)]
    pub property_address: String,

    /// Findings in entry order. Display order is recomputed on render.
    #[serde(default)]
    pub items: Vec<Finding>,
}

impl Report {
    /// Append a finding to the report.
    pub fn add_item(&mut self, item: Finding) {
        self.items.push(item);
    }

    /// Replace the finding with the same id. Returns false if no finding matched.
    pub fn update_item(&mut self, id: &str, item: Finding) -> bool {
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Remove a finding by id. Returns false if no finding matched.
    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// True if any finding still needs a correction visit.
    pub fn has_pending_items(&self) -> bool {
        self.items.iter().any(|i| i.correction_status.needs_attention())
    }

    pub fn risk_stats(&self) -> RiskStats {
        RiskStats::from_items(&self.items)
    }

    pub fn correction_stats(&self) -> CorrectionStats {
        CorrectionStats::from_items(&self.items)
    }

    /// Create a fresh root inspection report.
    pub fn new_inspection(
        client_name: String,
        engineer_name: String,
        engineer_registry: String,
        property_address: String,
        now: DateTime<Utc>,
    ) -> Report {
        Report {
            id: Self::generate_id(&format!("{}|{}", client_name, property_address), now),
            parent_report_id: None,
            created_date: now,
            inspection_date: Some(now.format("%Y-%m-%d").to_string()),
            is_reinspection: false,
            status: ReportStatus::Draft,
            client_name,
            engineer_name,
            engineer_registry,
            property_address,
            items: vec![],
        }
    }

    /// Create a re-inspection of `latest`: same findings, correction state
    /// reset to pending for everything not already corrected.
    pub fn reinspection_of(latest: &Report, now: DateTime<Utc>) -> Report {
        let items = latest
            .items
            .iter()
            .map(|item| {
                let mut clone = item.clone();
                if clone.correction_status != CorrectionStatus::Corrected {
                    clone.correction_status = CorrectionStatus::Pending;
                }
                clone
            })
            .collect();

        Report {
            id: Self::generate_id(&latest.id, now),
            parent_report_id: Some(latest.id.clone()),
            created_date: now,
            inspection_date: Some(now.format("%Y-%m-%d").to_string()),
            is_reinspection: true,
            status: ReportStatus::Draft,
            client_name: latest.client_name.clone(),
            engineer_name: latest.engineer_name.clone(),
            engineer_registry: latest.engineer_registry.clone(),
            property_address: latest.property_address.clone(),
            items,
        }
    }

    /// Generate a deterministic report ID from the parent id and creation time
    pub fn generate_id(seed: &str, created: DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(seed.as_bytes());
        hasher.update(created.to_rfc3339().as_bytes());
        let result = hasher.finalize();
        let hex = format!("{:x}", result);
        format!("RPT-{}", &hex[..8])
    }
}

/// Finding counts per risk level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskStats {
    pub total: usize,
    pub critical: usize,
    pub regular: usize,
    pub minimal: usize,
}

impl RiskStats {
    pub fn from_items(items: &[Finding]) -> Self {
        let mut stats = RiskStats {
            total: items.len(),
            critical: 0,
            regular: 0,
            minimal: 0,
        };
        for item in items {
            match item.risk_level {
                RiskLevel::Critical => stats.critical += 1,
                RiskLevel::Regular => stats.regular += 1,
                RiskLevel::Minimal => stats.minimal += 1,
            }
        }
        stats
    }
}

/// Finding counts per correction state. `pending` folds in `not_corrected`:
/// both mean another visit is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionStats {
    pub total: usize,
    pub corrected: usize,
    pub partial: usize,
    pub pending: usize,
}

impl CorrectionStats {
    pub fn from_items(items: &[Finding]) -> Self {
        let mut stats = CorrectionStats {
            total: items.len(),
            corrected: 0,
            partial: 0,
            pending: 0,
        };
        for item in items {
            match item.correction_status {
                CorrectionStatus::Corrected => stats.corrected += 1,
                CorrectionStatus::PartiallyCorrected => stats.partial += 1,
                CorrectionStatus::NotCorrected | CorrectionStatus::Pending => stats.pending += 1,
            }
        }
        stats
    }
}
