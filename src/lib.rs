//! Reconciliation of campaign finance organizations.
//!
//! Reads the contribution/expenditure extracts and the committee party
//! information extract, finds every unique PAC and candidate committee,
//! attaches party and office details, resolves districts to OCD ids, and
//! folds in the output of earlier runs so records from several election
//! years accumulate in one file.

pub mod attributes;
pub mod config;
pub mod districts;
pub mod error;
pub mod existing;
pub mod extract;
pub mod names;
pub mod processor;
pub mod report;
pub mod roster;
pub mod sources;
pub mod types;

pub use config::{Config, ConfigBuilder};
pub use districts::{DistrictKind, DistrictReference, DistrictResolver};
pub use error::{Error, Result};
pub use names::{NameNormalizer, NameStyle};
pub use processor::{reconcile, PartyProcessor, Reconciliation, RunInput};
pub use report::{Anomaly, ExistingStats, MergeStats, RunReport};
pub use roster::Roster;
pub use types::{FilingRow, OrgType, OrganizationRecord, PartyInfoRow};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::processor::{reconcile, PartyProcessor, Reconciliation, RunInput};
    pub use crate::report::{Anomaly, RunReport};
    pub use crate::types::{OrgType, OrganizationRecord};
}
