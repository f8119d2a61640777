//! Reading the CSV extracts and JSON lists, and writing the output file.

use crate::districts::DistrictReference;
use crate::error::{Error, Result};
use crate::types::{DistrictEntry, OrganizationRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse header-keyed CSV text into rows
///
/// Columns the row type does not name are ignored; missing optional columns
/// fall back to their defaults.
pub fn parse_csv_rows<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let text = text.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for row in reader.deserialize::<T>() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Read a CSV extract. Bytes that are not valid UTF-8 are replaced rather
/// than failing the whole file.
pub fn read_csv_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let bytes = read_bytes(path)?;
    let text = String::from_utf8_lossy(&bytes);
    parse_csv_rows(&text)
}

/// Load the canonical district list. A missing file is fatal.
pub fn read_district_reference(path: &Path) -> Result<DistrictReference> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(Error::MissingDistrictReference(path.to_path_buf()))
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let entries: Vec<DistrictEntry> = serde_json::from_str(&content)?;
    Ok(DistrictReference::from_entries(entries))
}

/// Load the output of a previous run, or nothing if there is none yet
pub fn read_snapshot(path: &Path) -> Result<Option<Vec<OrganizationRecord>>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Serialize records. Pretty output sorts keys and indents by four spaces;
/// compact output is a single line in field order.
pub fn render_records(records: &[OrganizationRecord], pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(serde_json::to_string(records)?);
    }

    let sorted: serde_json::Result<Vec<BTreeMap<String, serde_json::Value>>> = records
        .iter()
        .map(|record| serde_json::to_value(record).and_then(serde_json::from_value))
        .collect();
    let sorted = sorted?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    sorted.serialize(&mut serializer)?;

    String::from_utf8(buf).map_err(|e| Error::Io(std::io::Error::new(ErrorKind::InvalidData, e)))
}

/// Write the reconciled records to `path`
pub fn write_records(path: &Path, records: &[OrganizationRecord], pretty: bool) -> Result<()> {
    let rendered = render_records(records, pretty)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, rendered)?;
    Ok(())
}
