use crate::attributes::merge_party_info;
use crate::config::Config;
use crate::districts::{DistrictReference, DistrictResolver};
use crate::error::Result;
use crate::existing::merge_existing;
use crate::extract::extract_organizations;
use crate::names::NameNormalizer;
use crate::report::{AnomalyLog, RunReport};
use crate::roster::Roster;
use crate::sources;
use crate::types::{FilingRow, OrganizationRecord, PartyInfoRow};

/// Everything one run consumes, already read into memory
#[derive(Debug, Clone, Default)]
pub struct RunInput {
    /// One row list per extract, in scan order
    pub filings: Vec<Vec<FilingRow>>,
    pub party_info: Vec<PartyInfoRow>,
    pub reference: DistrictReference,
    /// Output of a previous run, if any
    pub existing: Option<Vec<OrganizationRecord>>,
}

/// Final record set and what the run observed
#[derive(Debug, Clone)]
pub struct Reconciliation {
    pub records: Vec<OrganizationRecord>,
    pub report: RunReport,
}

/// Run the four reconciliation stages over in-memory input
pub fn reconcile(input: RunInput, year: &str) -> Result<Reconciliation> {
    let names = NameNormalizer::new()?;
    let resolver = DistrictResolver::new(input.reference)?;
    let mut roster = Roster::new();
    let mut anomalies = AnomalyLog::new();
    let mut report = RunReport::default();

    for rows in input.filings {
        extract_organizations(&mut roster, rows, year, &names, &mut anomalies);
    }
    report.organizations_found = roster.len();
    tracing::info!("Found {} unique parties", report.organizations_found);

    report.attribute_merge = merge_party_info(&mut roster, input.party_info, year, &names);
    tracing::info!(
        "Modified {} party records with additional info ({} matched, {} added)",
        report.attribute_merge.touched(),
        report.attribute_merge.matched,
        report.attribute_merge.synthesized
    );

    report.districts_assigned = resolver.resolve(&mut roster, &mut anomalies);
    tracing::info!("Added District IDs to {} records", report.districts_assigned);

    if let Some(existing) = input.existing {
        report.existing = merge_existing(&mut roster, existing);
        tracing::info!(
            "Merged with {} party records on the disk. There were {} duplicates",
            report.existing.loaded,
            report.existing.duplicates
        );
    }

    report.total_records = roster.len();
    report.anomalies = anomalies.into_vec();

    Ok(Reconciliation {
        records: roster.into_records(),
        report,
    })
}

/// Main processor for a configured data directory
pub struct PartyProcessor {
    config: Config,
}

impl PartyProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read every input named by the configuration
    ///
    /// The district list is read first so a missing list fails the run
    /// before any extract is touched.
    pub fn load_input(&self) -> Result<RunInput> {
        let reference = sources::read_district_reference(&self.config.districts_path())?;
        tracing::debug!("Loaded {} canonical districts", reference.len());

        let mut filings = Vec::with_capacity(self.config.data_files.len());
        for path in self.config.data_file_paths() {
            tracing::info!("Loading data from {}", path.display());
            filings.push(sources::read_csv_rows(&path)?);
        }

        let party_info = sources::read_csv_rows(&self.config.party_info_path())?;
        let existing = sources::read_snapshot(&self.config.output_path())?;

        Ok(RunInput {
            filings,
            party_info,
            reference,
            existing,
        })
    }

    /// Reconcile without writing anything
    pub fn process(&self) -> Result<Reconciliation> {
        let input = self.load_input()?;
        reconcile(input, &self.config.year)
    }

    /// Reconcile and write the result over the output file
    pub fn process_and_write(&self) -> Result<Reconciliation> {
        let result = self.process()?;
        let output = self.config.output_path();
        tracing::info!(
            "Writing {} records to {}",
            result.records.len(),
            output.display()
        );
        sources::write_records(&output, &result.records, self.config.pretty_print)?;
        Ok(result)
    }
}
