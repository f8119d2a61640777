use crate::types::OrganizationRecord;
use std::collections::HashMap;

/// The working set of organizations for one run
///
/// Records keep insertion order. The id index always points at the first
/// record admitted for an id; records appended from a prior snapshot may
/// share an id with an earlier record and are not indexed.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    records: Vec<OrganizationRecord>,
    by_id: HashMap<String, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a record whose id has not been seen. Returns `false` and drops
    /// the record if the id is already present.
    pub fn admit(&mut self, record: OrganizationRecord) -> bool {
        if self.by_id.contains_key(&record.id) {
            return false;
        }
        self.by_id.insert(record.id.clone(), self.records.len());
        self.records.push(record);
        true
    }

    /// Append a record without the uniqueness check
    pub fn append(&mut self, record: OrganizationRecord) {
        self.by_id
            .entry(record.id.clone())
            .or_insert(self.records.len());
        self.records.push(record);
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&OrganizationRecord> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut OrganizationRecord> {
        match self.by_id.get(id) {
            Some(&idx) => self.records.get_mut(idx),
            None => None,
        }
    }

    /// Whether a record equal in every field is already present
    pub fn contains_record(&self, record: &OrganizationRecord) -> bool {
        self.records.iter().any(|existing| existing == record)
    }

    pub fn records(&self) -> &[OrganizationRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut OrganizationRecord> {
        self.records.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<OrganizationRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrgType;

    fn record(id: &str, name: &str) -> OrganizationRecord {
        OrganizationRecord::new(id, "2018", OrgType::Pac, name)
    }

    #[test]
    fn test_admit_keeps_first_occurrence() {
        let mut roster = Roster::new();
        assert!(roster.admit(record("1", "First PAC")));
        assert!(!roster.admit(record("1", "Second PAC")));

        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get("1").unwrap().name, "First PAC");
    }

    #[test]
    fn test_append_allows_shared_id_but_index_stays_on_first() {
        let mut roster = Roster::new();
        roster.admit(record("1", "First PAC"));
        roster.append(record("1", "Renamed PAC"));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("1").unwrap().name, "First PAC");
    }

    #[test]
    fn test_append_indexes_new_ids() {
        let mut roster = Roster::new();
        roster.append(record("9", "Old PAC"));
        assert!(roster.contains_id("9"));
    }

    #[test]
    fn test_get_mut_and_structural_lookup() {
        let mut roster = Roster::new();
        roster.admit(record("1", "First PAC"));
        roster.get_mut("1").unwrap().party = Some("Republican".to_string());

        let mut expected = record("1", "First PAC");
        assert!(!roster.contains_record(&expected));
        expected.party = Some("Republican".to_string());
        assert!(roster.contains_record(&expected));
    }
}
