//! Resolution of free-text district descriptions to OCD division ids.
//!
//! Each record's district text is classified against a closed set of
//! formats. The id built from a match is only kept when it appears in the
//! canonical district list produced upstream.

use crate::error::Result;
use crate::report::{Anomaly, AnomalyLog};
use crate::roster::Roster;
use crate::types::{DistrictEntry, OrganizationRecord};
use regex::Regex;
use std::collections::HashSet;

/// OCD id of the state every district belongs to
pub const STATE_OCD_ID: &str = "ocd-division/country:us/state:al";

/// District text stored for statewide offices
pub const STATE_NAME: &str = "Alabama";

/// Offices elected statewide, whatever district text they carry
const STATEWIDE_OFFICES: &[&str] = &["Governor", "Lt. Governor"];

/// Canonical set of valid OCD ids
#[derive(Debug, Clone, Default)]
pub struct DistrictReference {
    ids: HashSet<String>,
}

impl DistrictReference {
    pub fn from_entries(entries: impl IntoIterator<Item = DistrictEntry>) -> Self {
        Self {
            ids: entries.into_iter().map(|entry| entry.ocd_id).collect(),
        }
    }

    pub fn contains(&self, ocd_id: &str) -> bool {
        self.ids.contains(ocd_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for DistrictReference {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Legislative chamber of a state house or senate seat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chamber {
    Upper,
    Lower,
}

/// A recognized district description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistrictKind {
    /// Governor and Lt. Governor
    Statewide,
    /// "House District N" / "Senate District N"
    Legislative { chamber: Chamber, number: String },
    /// "Nth Judicial Circuit"
    JudicialCircuit { number: String, suffix: String },
    /// "<Name> County"
    County { name: String },
}

impl DistrictKind {
    /// Build the OCD id for this district
    pub fn ocd_id(&self) -> String {
        match self {
            DistrictKind::Statewide => STATE_OCD_ID.to_string(),
            DistrictKind::Legislative { chamber, number } => {
                let code = match chamber {
                    Chamber::Upper => "sldu",
                    Chamber::Lower => "sldl",
                };
                format!("{}/{}:{}", STATE_OCD_ID, code, number)
            }
            DistrictKind::JudicialCircuit { number, .. } => {
                format!("{}/circuit_court:{}", STATE_OCD_ID, number)
            }
            DistrictKind::County { name } => {
                let slug = name.to_lowercase().replace(' ', "_").replace('.', "");
                format!("{}/county:{}", STATE_OCD_ID, slug)
            }
        }
    }

    /// District text to store on the record once recognized, if it differs
    /// from the source text
    fn canonical_text(&self) -> Option<String> {
        match self {
            DistrictKind::Statewide => Some(STATE_NAME.to_string()),
            DistrictKind::JudicialCircuit { number, suffix } => Some(format!(
                "{}{} Judicial Circuit",
                number,
                suffix.to_lowercase()
            )),
            _ => None,
        }
    }
}

/// Classifies district text and validates the resulting ids
pub struct DistrictResolver {
    reference: DistrictReference,
    legislative: Regex,
    circuit: Regex,
    county: Regex,
}

impl DistrictResolver {
    pub fn new(reference: DistrictReference) -> Result<Self> {
        Ok(Self {
            reference,
            legislative: Regex::new(r"^(House|Senate) District (\d+)$")?,
            circuit: Regex::new(r"^(\d+)((?i:th|rd|nd|st)) Judicial Circuit$")?,
            county: Regex::new(r"^(.+) County$")?,
        })
    }

    pub fn reference(&self) -> &DistrictReference {
        &self.reference
    }

    /// Classify district text against the known formats, in precedence
    /// order: legislative seat, judicial circuit, county
    pub fn classify_text(&self, district: &str) -> Option<DistrictKind> {
        if let Some(caps) = self.legislative.captures(district) {
            let chamber = if &caps[1] == "Senate" {
                Chamber::Upper
            } else {
                Chamber::Lower
            };
            return Some(DistrictKind::Legislative {
                chamber,
                number: caps[2].to_string(),
            });
        }

        if let Some(caps) = self.circuit.captures(district) {
            return Some(DistrictKind::JudicialCircuit {
                number: caps[1].to_string(),
                suffix: caps[2].to_string(),
            });
        }

        self.county
            .captures(district)
            .map(|caps| DistrictKind::County {
                name: caps[1].to_string(),
            })
    }

    /// Classify a record. Statewide offices take precedence over any
    /// district text the record carries.
    pub fn classify(&self, record: &OrganizationRecord) -> Classification {
        if let Some(office) = record.office.as_deref() {
            if STATEWIDE_OFFICES.contains(&office) {
                return Classification::Recognized(DistrictKind::Statewide);
            }
        }

        match record.district.as_deref() {
            None | Some("") => Classification::NoDistrict,
            Some(text) => match self.classify_text(text) {
                Some(kind) => Classification::Recognized(kind),
                None => Classification::Unrecognized,
            },
        }
    }

    /// Assign OCD ids to every record in the roster whose district can be
    /// recognized and validated. Returns the number of records assigned.
    pub fn resolve(&self, roster: &mut Roster, anomalies: &mut AnomalyLog) -> usize {
        let mut assigned = 0;

        for record in roster.records_mut() {
            let kind = match self.classify(record) {
                Classification::Recognized(kind) => kind,
                Classification::NoDistrict => continue,
                Classification::Unrecognized => {
                    anomalies.record(Anomaly::UnrecognizedDistrict {
                        id: record.id.clone(),
                        district: record.district.clone().unwrap_or_default(),
                    });
                    continue;
                }
            };

            if let Some(text) = kind.canonical_text() {
                record.district = Some(text);
            }

            let ocd_id = kind.ocd_id();
            if self.reference.contains(&ocd_id) {
                record.ocd_id = Some(ocd_id);
                assigned += 1;
            } else {
                anomalies.record(Anomaly::UnknownDistrictCode {
                    id: record.id.clone(),
                    district: record.district.clone().unwrap_or_default(),
                    ocd_id,
                });
            }
        }

        assigned
    }
}

/// Outcome of classifying one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Recognized(DistrictKind),
    /// No district text; PACs and at-large offices
    NoDistrict,
    /// District text in a format we do not know
    Unrecognized,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::title_case;
    use crate::types::OrgType;

    fn resolver() -> DistrictResolver {
        let reference: DistrictReference = [
            "ocd-division/country:us/state:al",
            "ocd-division/country:us/state:al/sldu:7",
            "ocd-division/country:us/state:al/sldl:45",
            "ocd-division/country:us/state:al/circuit_court:15",
            "ocd-division/country:us/state:al/county:st_clair",
            "ocd-division/country:us/state:al/county:jefferson",
        ]
        .into_iter()
        .collect();
        DistrictResolver::new(reference).unwrap()
    }

    fn candidate(id: &str, office: Option<&str>, district: Option<&str>) -> OrganizationRecord {
        let mut record = OrganizationRecord::new(id, "2018", OrgType::Candidate, "Jane Doe");
        record.office = office.map(str::to_string);
        record.district = district.map(str::to_string);
        record
    }

    fn resolve_one(record: OrganizationRecord) -> (OrganizationRecord, usize, Vec<Anomaly>) {
        let resolver = resolver();
        let mut roster = Roster::new();
        roster.admit(record.clone());
        let mut anomalies = AnomalyLog::new();
        let assigned = resolver.resolve(&mut roster, &mut anomalies);
        let resolved = roster.get(&record.id).unwrap().clone();
        (resolved, assigned, anomalies.into_vec())
    }

    #[test]
    fn test_state_senate_district() {
        let district = title_case("senate district 7");
        assert_eq!(district, "Senate District 7");

        let (record, assigned, anomalies) =
            resolve_one(candidate("1", Some("State Senator"), Some(&district)));

        assert_eq!(assigned, 1);
        assert!(anomalies.is_empty());
        assert_eq!(
            record.ocd_id.as_deref(),
            Some("ocd-division/country:us/state:al/sldu:7")
        );
    }

    #[test]
    fn test_house_district_uses_lower_chamber() {
        let resolver = resolver();
        let kind = resolver.classify_text("House District 45").unwrap();
        assert_eq!(
            kind,
            DistrictKind::Legislative {
                chamber: Chamber::Lower,
                number: "45".to_string()
            }
        );
        assert_eq!(kind.ocd_id(), "ocd-division/country:us/state:al/sldl:45");
    }

    #[test]
    fn test_judicial_circuit_rewrites_suffix() {
        let (record, assigned, _) =
            resolve_one(candidate("2", Some("Circuit Judge"), Some("15Th Judicial Circuit")));

        assert_eq!(assigned, 1);
        assert_eq!(
            record.ocd_id.as_deref(),
            Some("ocd-division/country:us/state:al/circuit_court:15")
        );
        assert_eq!(record.district.as_deref(), Some("15th Judicial Circuit"));
    }

    #[test]
    fn test_circuit_suffixes_are_case_insensitive() {
        let resolver = resolver();
        for text in ["1St Judicial Circuit", "2nd Judicial Circuit", "3RD Judicial Circuit"] {
            assert!(
                matches!(
                    resolver.classify_text(text),
                    Some(DistrictKind::JudicialCircuit { .. })
                ),
                "{} should be a circuit",
                text
            );
        }
    }

    #[test]
    fn test_county_slug() {
        let resolver = resolver();
        let kind = resolver.classify_text("St. Clair County").unwrap();
        assert_eq!(kind.ocd_id(), "ocd-division/country:us/state:al/county:st_clair");
    }

    #[test]
    fn test_governor_overrides_district_text() {
        let (record, assigned, anomalies) =
            resolve_one(candidate("3", Some("Governor"), Some("Jefferson County")));

        assert_eq!(assigned, 1);
        assert!(anomalies.is_empty());
        assert_eq!(record.district.as_deref(), Some("Alabama"));
        assert_eq!(
            record.ocd_id.as_deref(),
            Some("ocd-division/country:us/state:al")
        );
    }

    #[test]
    fn test_lt_governor_without_district() {
        let (record, assigned, _) = resolve_one(candidate("4", Some("Lt. Governor"), None));
        assert_eq!(assigned, 1);
        assert_eq!(record.district.as_deref(), Some("Alabama"));
    }

    #[test]
    fn test_no_district_is_silent() {
        let pac = OrganizationRecord::new("5", "2018", OrgType::Pac, "Jones PAC");
        let (record, assigned, anomalies) = resolve_one(pac);

        assert_eq!(assigned, 0);
        assert!(anomalies.is_empty());
        assert!(record.ocd_id.is_none());
    }

    #[test]
    fn test_unrecognized_format_is_reported() {
        let (record, assigned, anomalies) =
            resolve_one(candidate("6", Some("Board Member"), Some("Place 3 At Large")));

        assert_eq!(assigned, 0);
        assert!(record.ocd_id.is_none());
        assert_eq!(
            anomalies,
            vec![Anomaly::UnrecognizedDistrict {
                id: "6".to_string(),
                district: "Place 3 At Large".to_string(),
            }]
        );
    }

    #[test]
    fn test_code_missing_from_reference_is_reported() {
        let (record, assigned, anomalies) =
            resolve_one(candidate("7", Some("Sheriff"), Some("Atlantis County")));

        assert_eq!(assigned, 0);
        assert!(record.ocd_id.is_none());
        assert_eq!(
            anomalies,
            vec![Anomaly::UnknownDistrictCode {
                id: "7".to_string(),
                district: "Atlantis County".to_string(),
                ocd_id: "ocd-division/country:us/state:al/county:atlantis".to_string(),
            }]
        );
    }

    #[test]
    fn test_resolution_is_stable_across_runs() {
        let (first, _, _) =
            resolve_one(candidate("8", Some("Circuit Judge"), Some("15Th Judicial Circuit")));
        let (second, _, _) = resolve_one(first.clone());
        assert_eq!(first, second);
    }
}
