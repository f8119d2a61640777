use crate::report::ExistingStats;
use crate::roster::Roster;
use crate::types::OrganizationRecord;

/// Fold a previously written output into the roster
///
/// A prior record is dropped only when an identical record (every field,
/// including absent ones) is already present. A prior record that shares an
/// id but differs anywhere, for example one that has since been enriched, is
/// kept alongside the new one.
pub fn merge_existing(roster: &mut Roster, existing: Vec<OrganizationRecord>) -> ExistingStats {
    let mut stats = ExistingStats {
        loaded: existing.len(),
        duplicates: 0,
    };

    for record in existing {
        if roster.contains_record(&record) {
            stats.duplicates += 1;
        } else {
            roster.append(record);
        }
    }

    stats
}
