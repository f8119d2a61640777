use serde::{Deserialize, Serialize};

/// Committee category as recorded on a filing
pub const PAC_CATEGORY: &str = "Political Action Committee";
pub const CANDIDATE_CATEGORY: &str = "Principal Campaign Committee";

/// Kind of organization a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrgType {
    #[serde(rename = "PAC")]
    Pac,
    Candidate,
}

impl OrgType {
    /// Map a filing's `CommitteeType` value to an organization type
    pub fn from_category(category: &str) -> Option<Self> {
        match category {
            PAC_CATEGORY => Some(OrgType::Pac),
            CANDIDATE_CATEGORY => Some(OrgType::Candidate),
            _ => None,
        }
    }

    /// Type assumed for a record read without one; party-info-only
    /// committees are candidate committees
    fn untyped_default() -> Self {
        OrgType::Candidate
    }
}

/// A reconciled PAC or candidate committee
///
/// Field names on the wire match the files consumed by the Civic Info
/// enrichment step, so `API_status` and `ocdID` keep their legacy spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    pub id: String,
    #[serde(default)]
    pub filed_year: String,
    /// Party-info-only records in older snapshots carry no type
    #[serde(rename = "type", default = "OrgType::untyped_default")]
    pub org_type: OrgType,
    pub name: String,
    #[serde(rename = "API_status", default)]
    pub api_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "ocdID", skip_serializing_if = "Option::is_none")]
    pub ocd_id: Option<String>,
}

impl OrganizationRecord {
    /// Create a freshly observed record with no secondary attributes
    pub fn new(
        id: impl Into<String>,
        filed_year: impl Into<String>,
        org_type: OrgType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            filed_year: filed_year.into(),
            org_type,
            name: name.into(),
            api_status: String::new(),
            party: None,
            office: None,
            district: None,
            place: None,
            status: None,
            ocd_id: None,
        }
    }
}

/// One row of a contributions/expenditures extract
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilingRow {
    #[serde(rename = "OrgID")]
    pub org_id: String,
    #[serde(rename = "CommitteeType", default)]
    pub committee_type: String,
    #[serde(rename = "CommitteeName", default)]
    pub committee_name: String,
    #[serde(rename = "CandidateName", default)]
    pub candidate_name: String,
}

/// One row of the committee party information extract
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartyInfoRow {
    #[serde(rename = "CommitteeID")]
    pub committee_id: String,
    /// Formatted as "Last, First"
    #[serde(rename = "CandidateName", default)]
    pub candidate_name: String,
    #[serde(rename = "Party", default)]
    pub party: String,
    #[serde(rename = "Office", default)]
    pub office: String,
    #[serde(rename = "District", default)]
    pub district: String,
    #[serde(rename = "Place", default)]
    pub place: String,
    #[serde(rename = "CommitteeStatus", default)]
    pub committee_status: String,
}

/// Entry in the canonical district list
#[derive(Debug, Clone, Deserialize)]
pub struct DistrictEntry {
    #[serde(rename = "ocdID")]
    pub ocd_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_type_from_category() {
        assert_eq!(
            OrgType::from_category("Political Action Committee"),
            Some(OrgType::Pac)
        );
        assert_eq!(
            OrgType::from_category("Principal Campaign Committee"),
            Some(OrgType::Candidate)
        );
        assert_eq!(OrgType::from_category("Ballot Question Committee"), None);
    }

    #[test]
    fn test_record_omits_absent_fields() {
        let record = OrganizationRecord::new("101", "2018", OrgType::Pac, "Jones PAC");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["type"], "PAC");
        assert_eq!(json["API_status"], "");
        assert!(json.get("district").is_none());
        assert!(json.get("ocdID").is_none());
    }

    #[test]
    fn test_record_reads_legacy_snapshot_without_year() {
        let json = r#"{
            "id": "7",
            "type": "Candidate",
            "name": "Jane Doe",
            "ocdID": "ocd-division/country:us/state:al"
        }"#;
        let record: OrganizationRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.filed_year, "");
        assert_eq!(record.api_status, "");
        assert_eq!(
            record.ocd_id.as_deref(),
            Some("ocd-division/country:us/state:al")
        );
    }

    #[test]
    fn test_record_without_type_reads_as_candidate() {
        let json = r#"{"id": "9", "name": "Jane Doe", "party": "Democrat", "office": "Sheriff"}"#;
        let record: OrganizationRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.org_type, OrgType::Candidate);
        assert_eq!(record.party.as_deref(), Some("Democrat"));
    }
}
