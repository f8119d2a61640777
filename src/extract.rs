use crate::names::{NameNormalizer, NameStyle};
use crate::report::{Anomaly, AnomalyLog};
use crate::roster::Roster;
use crate::types::{FilingRow, OrgType, OrganizationRecord};

/// Admit every organization first seen in `rows`
///
/// Streams are fed one at a time in file-list order, so the first filing for
/// an id across all extracts wins. A row with an unknown category is reported
/// once per id and category and never claims the id. Returns the number of
/// new organizations.
pub fn extract_organizations<I>(
    roster: &mut Roster,
    rows: I,
    year: &str,
    names: &NameNormalizer,
    anomalies: &mut AnomalyLog,
) -> usize
where
    I: IntoIterator<Item = FilingRow>,
{
    let mut admitted = 0;

    for row in rows {
        if roster.contains_id(&row.org_id) {
            tracing::debug!("Skipping repeated filing for org {}", row.org_id);
            continue;
        }

        let Some(org_type) = OrgType::from_category(&row.committee_type) else {
            anomalies.record_once(Anomaly::UnknownCategory {
                id: row.org_id,
                category: row.committee_type,
            });
            continue;
        };

        let name = match org_type {
            OrgType::Pac => names.normalize(&row.committee_name, NameStyle::Committee),
            OrgType::Candidate => names.normalize(&row.candidate_name, NameStyle::Candidate),
        };

        if roster.admit(OrganizationRecord::new(row.org_id, year, org_type, name)) {
            admitted += 1;
        }
    }

    admitted
}
