//! JSON record source and input validation.
//!
//! Retrieval is awaited once and completely; computation never starts
//! before the full record set is in memory.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::model::Record;

/// Field names every record is expected to carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["date", "holder_id", "holder_category", "kind", "operation"];

/// The record source could not produce data. Terminal, never retried.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read '{path}': {source}")]
    Unavailable {
        path: String,
        source: std::io::Error,
    },
}

/// The supplied payload is not a usable record collection.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("input is not a collection of records: {0}")]
    NotACollection(#[from] serde_json::Error),

    #[error("input contains no records")]
    Empty,

    #[error("first record is missing required field '{0}'")]
    MissingField(&'static str),
}

/// A record past the shallow shape check could not be materialized.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record {index} is malformed: {source}")]
    Malformed {
        index: usize,
        source: serde_json::Error,
    },
}

/// Read the raw payload from a local JSON document.
pub async fn fetch(path: impl AsRef<Path>) -> Result<Vec<u8>, SourceError> {
    let path = path.as_ref();
    tokio::fs::read(path)
        .await
        .map_err(|source| SourceError::Unavailable {
            path: path.display().to_string(),
            source,
        })
}

/// Check that a record exposes the required field names.
///
/// Only the FIRST record of a batch is ever passed here: the validator
/// deliberately does not inspect the rest of the collection, so a
/// malformed later record surfaces as [`RecordError::Malformed`] instead.
/// Full per-record validation would change that classification.
pub fn has_expected_shape(record: &Value) -> Result<(), ShapeError> {
    for field in REQUIRED_FIELDS {
        if record.get(field).is_none() {
            return Err(ShapeError::MissingField(field));
        }
    }
    Ok(())
}

/// Validate that the payload is a non-empty collection whose first record
/// has the expected shape.
pub fn validate(payload: &[u8]) -> Result<Vec<Value>, ShapeError> {
    let records: Vec<Value> = serde_json::from_slice(payload)?;
    let first = records.first().ok_or(ShapeError::Empty)?;
    has_expected_shape(first)?;
    Ok(records)
}

/// Materialize typed records from a validated collection.
///
/// Fails the whole batch on the first malformed record rather than
/// skipping it, so the output sequence can never be silently shorter
/// than the input.
pub fn materialize(values: Vec<Value>) -> Result<Vec<Record>, RecordError> {
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value(value).map_err(|source| RecordError::Malformed { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID: &str = r#"[
        {
            "date": "2016-01-05",
            "holder_id": 1,
            "holder_category": "individual",
            "kind": "deposit",
            "operation": { "amount": 200.00, "currency": "EUR" }
        }
    ]"#;

    fn write_json(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn fetch_reads_file() {
        let file = write_json(VALID);
        let bytes = fetch(file.path()).await.unwrap();
        assert_eq!(bytes, VALID.as_bytes());
    }

    #[tokio::test]
    async fn fetch_missing_file_is_unavailable() {
        let result = fetch("no/such/file.json").await;
        assert!(matches!(result, Err(SourceError::Unavailable { .. })));
    }

    #[test]
    fn validate_accepts_valid_payload() {
        let records = validate(VALID.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn validate_rejects_non_collection() {
        let result = validate(br#"{"date": "2016-01-05"}"#);
        assert!(matches!(result, Err(ShapeError::NotACollection(_))));

        let result = validate(b"not json at all");
        assert!(matches!(result, Err(ShapeError::NotACollection(_))));
    }

    #[test]
    fn validate_rejects_empty_collection() {
        let result = validate(b"[]");
        assert!(matches!(result, Err(ShapeError::Empty)));
    }

    #[test]
    fn validate_rejects_first_record_missing_field() {
        let result = validate(
            br#"[{"date": "2016-01-05", "holder_id": 1, "holder_category": "individual", "kind": "deposit"}]"#,
        );
        assert!(matches!(result, Err(ShapeError::MissingField("operation"))));
    }

    #[test]
    fn validate_only_checks_first_record() {
        // The second record is missing everything, yet the shallow check
        // passes; the failure belongs to materialize.
        let payload = format!(
            r#"[{}, {{"unexpected": true}}]"#,
            VALID.trim_start_matches('[').trim_end_matches(']')
        );
        let records = validate(payload.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let result = materialize(records);
        assert!(matches!(
            result,
            Err(RecordError::Malformed { index: 1, .. })
        ));
    }

    #[test]
    fn materialize_produces_typed_records() {
        let values = validate(VALID.as_bytes()).unwrap();
        let records = materialize(values).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].holder_id, 1);
    }

    #[test]
    fn materialize_reports_malformed_record_index() {
        let payload = r#"[
            {
                "date": "2016-01-05",
                "holder_id": 1,
                "holder_category": "individual",
                "kind": "deposit",
                "operation": { "amount": 200.00, "currency": "EUR" }
            },
            {
                "date": "2016-01-06",
                "holder_id": 2,
                "holder_category": "corporate",
                "kind": "withdrawal",
                "operation": { "currency": "EUR" }
            }
        ]"#;
        let values = validate(payload.as_bytes()).unwrap();
        let result = materialize(values);
        assert!(matches!(
            result,
            Err(RecordError::Malformed { index: 1, .. })
        ));
    }
}
