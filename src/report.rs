use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A non-fatal data-quality problem found while reconciling
///
/// Each variant carries the raw offending value so it can be traced back to
/// the source row and fixed upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Filing row with a `CommitteeType` that is neither PAC nor candidate
    UnknownCategory { id: String, category: String },
    /// District text that matches none of the known formats
    UnrecognizedDistrict { id: String, district: String },
    /// District code built from the text but missing from the reference list
    UnknownDistrictCode {
        id: String,
        district: String,
        ocd_id: String,
    },
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::UnknownCategory { id, category } => {
                write!(f, "unknown group type \"{}\" (org {})", category, id)
            }
            Anomaly::UnrecognizedDistrict { id, district } => {
                write!(f, "unrecognized district format \"{}\" (org {})", district, id)
            }
            Anomaly::UnknownDistrictCode {
                id,
                district,
                ocd_id,
            } => write!(
                f,
                "unrecognizable district \"{}\" -> {} (org {})",
                district, ocd_id, id
            ),
        }
    }
}

/// Counts from the attribute merge stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Rows that matched an extracted organization
    pub matched: usize,
    /// Rows that created a new organization
    pub synthesized: usize,
}

impl MergeStats {
    pub fn touched(&self) -> usize {
        self.matched + self.synthesized
    }
}

/// Counts from merging a prior snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExistingStats {
    pub loaded: usize,
    pub duplicates: usize,
}

/// Everything a run observed, in stage order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub organizations_found: usize,
    pub attribute_merge: MergeStats,
    pub districts_assigned: usize,
    pub existing: ExistingStats,
    pub total_records: usize,
    pub anomalies: Vec<Anomaly>,
}

/// Collects anomalies as the stages run, logging each one as it arrives
#[derive(Debug, Default)]
pub struct AnomalyLog {
    entries: Vec<Anomaly>,
    seen: HashSet<Anomaly>,
}

impl AnomalyLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, anomaly: Anomaly) {
        tracing::warn!("{}", anomaly);
        self.seen.insert(anomaly.clone());
        self.entries.push(anomaly);
    }

    /// Record `anomaly` unless an identical one is already logged. Returns
    /// whether it was recorded.
    pub fn record_once(&mut self, anomaly: Anomaly) -> bool {
        if self.seen.contains(&anomaly) {
            return false;
        }
        self.record(anomaly);
        true
    }

    pub fn entries(&self) -> &[Anomaly] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Anomaly> {
        self.entries
    }
}
