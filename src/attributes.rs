use crate::names::{reorder_last_first, title_case, NameNormalizer, NameStyle};
use crate::report::MergeStats;
use crate::roster::Roster;
use crate::types::{OrgType, OrganizationRecord, PartyInfoRow};

/// Overlay party, office, district and status from the committee info
/// extract onto the roster
///
/// Committees missing from the filing extracts are added as candidate
/// records built from the info row alone.
pub fn merge_party_info<I>(
    roster: &mut Roster,
    rows: I,
    year: &str,
    names: &NameNormalizer,
) -> MergeStats
where
    I: IntoIterator<Item = PartyInfoRow>,
{
    let mut stats = MergeStats::default();

    for row in rows {
        match roster.get_mut(&row.committee_id) {
            Some(record) => {
                apply_row(record, &row);
                stats.matched += 1;
            }
            None => {
                let name = names.normalize(
                    &reorder_last_first(&row.candidate_name),
                    NameStyle::Candidate,
                );
                let mut record = OrganizationRecord::new(
                    row.committee_id.clone(),
                    year,
                    OrgType::Candidate,
                    name,
                );
                apply_row(&mut record, &row);
                tracing::debug!("Added committee {} from party info only", record.id);
                roster.admit(record);
                stats.synthesized += 1;
            }
        }
    }

    stats
}

/// Copy the info row onto a record. Empty district and place values never
/// replace what is already there.
fn apply_row(record: &mut OrganizationRecord, row: &PartyInfoRow) {
    record.party = Some(row.party.clone());
    record.office = Some(title_case(&row.office));
    record.status = Some(row.committee_status.clone());

    if !row.district.is_empty() {
        record.district = Some(title_case(&row.district));
    }
    if !row.place.is_empty() {
        record.place = Some(row.place.trim().to_string());
    }
}
