//! Bulk import parsing and column mapping.
//!
//! This module is the file-format half of bulk import: it parses CSV input,
//! normalizes headers (trim, case-fold) and enforces the per-entity required
//! column set. The database half lives in `services::imports`, which walks
//! the parsed rows with create-or-update semantics.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ServiceError;

/// Entity types that accept bulk import.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema,
    strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ImportTarget {
    Region,
    Department,
    Division,
    Section,
    ProcurementType,
    LoaStatus,
    ContractStatus,
    Employee,
}

impl ImportTarget {
    /// Columns that must be present in the file header.
    pub fn required_columns(self) -> &'static [&'static str] {
        match self {
            Self::Region
            | Self::Department
            | Self::ProcurementType
            | Self::LoaStatus
            | Self::ContractStatus => &["name"],
            Self::Division => &["name", "department_name"],
            Self::Section => &["name", "division_name"],
            Self::Employee => &["employee_id", "first_name", "last_name", "email"],
        }
    }

    /// Columns that are recognized when present but never required.
    pub fn optional_columns(self) -> &'static [&'static str] {
        match self {
            Self::Employee => &[
                "phone",
                "department_name",
                "division_name",
                "section_name",
                "job_title",
                "is_active",
            ],
            _ => &[],
        }
    }
}

/// One parsed data row, keyed by normalized header name. Blank cells are
/// treated as absent.
#[derive(Debug, Clone, Default)]
pub struct ImportRecord {
    values: HashMap<String, String>,
}

impl ImportRecord {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Parses a boolean-ish cell. Truthy spellings are "true", "1", "yes"
    /// and "active"; anything else reads as false.
    pub fn get_bool(&self, column: &str) -> Option<bool> {
        self.get(column).map(|v| {
            matches!(
                v.to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "active"
            )
        })
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Parsed tabular input: the normalized header set plus the data rows.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<ImportRecord>,
}

/// Outcome of one import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub warnings: Vec<String>,
}

impl ImportReport {
    pub fn skip(&mut self, row: usize, reason: impl fmt::Display) {
        self.skipped += 1;
        self.warnings.push(format!("row {}: {}", row, reason));
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Parses CSV text into a [`ParsedTable`] with normalized headers.
pub fn parse_csv(input: &str) -> Result<ParsedTable, ServiceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ServiceError::ImportRejected(format!("Unreadable CSV header: {}", e)))?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(ServiceError::ImportRejected(
            "File has no header row".to_string(),
        ));
    }

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            ServiceError::ImportRejected(format!("Unreadable CSV row {}: {}", i + 2, e))
        })?;

        let mut values = HashMap::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if !header.is_empty() {
                values.insert(header.clone(), cell.trim().to_string());
            }
        }
        rows.push(ImportRecord { values });
    }

    Ok(ParsedTable { headers, rows })
}

/// Rejects the whole file when any required column is missing, naming both
/// the expected and the found column sets.
pub fn validate_columns(target: ImportTarget, headers: &[String]) -> Result<(), ServiceError> {
    let missing: Vec<&str> = target
        .required_columns()
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .copied()
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(ServiceError::ImportRejected(format!(
        "Missing required column(s) [{}]; expected [{}], found [{}]",
        missing.join(", "),
        target.required_columns().join(", "),
        headers.join(", "),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn headers_are_trimmed_and_case_folded() {
        let table = parse_csv("  Name , DEPARTMENT_NAME\nICT,Corporate Services\n").unwrap();
        assert_eq!(table.headers, vec!["name", "department_name"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("name"), Some("ICT"));
        assert_eq!(
            table.rows[0].get("department_name"),
            Some("Corporate Services")
        );
    }

    #[test]
    fn blank_cells_read_as_absent() {
        let table = parse_csv("name,department_name\nICT,\n").unwrap();
        assert_eq!(table.rows[0].get("department_name"), None);
    }

    #[test]
    fn missing_required_column_rejects_file_naming_both_sets() {
        let table = parse_csv("name,notes\nNairobi,HQ\n").unwrap();
        let err = validate_columns(ImportTarget::Division, &table.headers).unwrap_err();
        assert_matches!(err, ServiceError::ImportRejected(msg) => {
            assert!(msg.contains("department_name"), "message was: {}", msg);
            assert!(msg.contains("expected [name, department_name]"), "message was: {}", msg);
            assert!(msg.contains("found [name, notes]"), "message was: {}", msg);
        });
    }

    #[test]
    fn employee_optional_columns_are_not_required() {
        let table = parse_csv("employee_id,first_name,last_name,email\nE001,Jane,Wanjiru,jw@example.com\n").unwrap();
        assert!(validate_columns(ImportTarget::Employee, &table.headers).is_ok());
    }

    #[test]
    fn bool_cells_accept_common_spellings() {
        let row = ImportRecord::from_pairs(&[("is_active", "Yes")]);
        assert_eq!(row.get_bool("is_active"), Some(true));
        let row = ImportRecord::from_pairs(&[("is_active", "Active")]);
        assert_eq!(row.get_bool("is_active"), Some(true));
        let row = ImportRecord::from_pairs(&[("is_active", "0")]);
        assert_eq!(row.get_bool("is_active"), Some(false));
        let row = ImportRecord::from_pairs(&[("is_active", "y")]);
        assert_eq!(row.get_bool("is_active"), Some(false));
    }

    #[test]
    fn empty_file_is_rejected() {
        assert_matches!(parse_csv(""), Err(ServiceError::ImportRejected(_)));
    }

    #[test]
    fn report_skip_collects_row_numbered_warning() {
        let mut report = ImportReport::default();
        report.skip(3, "department 'Unknown' not found");
        assert_eq!(report.skipped, 1);
        assert_eq!(report.warnings[0], "row 3: department 'Unknown' not found");
    }
}
