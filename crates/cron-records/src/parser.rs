//! Line-by-line classification of raw crontab text.
//!
//! Parsing never fails on input: a line no declared kind claims becomes
//! an unmatched passthrough record, so an admin's hand-edited file is
//! never corrupted or refused wholesale. The only error path is a schema
//! contract violation (a required field whose capture group is missing
//! from its own pattern).

use crate::error::{Error, Result};
use crate::field::FieldValue;
use crate::record::RawRecord;
use crate::schema::{KindSpec, RecordKind, Registry};

/// Parse raw file text into an ordered sequence of raw records.
pub fn parse(text: &str, registry: &Registry) -> Result<Vec<RawRecord>> {
    let mut records = Vec::new();
    for line in text.lines() {
        let record = match registry.classify(line) {
            Some((spec, caps)) => capture(spec, line, &caps)?,
            None => {
                tracing::debug!(line, "no kind claimed line, preserving as passthrough");
                RawRecord::passthrough(RecordKind::Unmatched, line)
            }
        };
        records.push(record);
    }
    Ok(records)
}

/// Build a raw record from a matched kind's capture groups.
fn capture(spec: &KindSpec, line: &str, caps: &regex::Captures<'_>) -> Result<RawRecord> {
    let mut record = RawRecord::passthrough(spec.kind, line);
    for (index, field) in spec.fields.iter().enumerate() {
        // Absent optional fields stay out of the map; accessors default
        // to Absent, so one record shape serves parsed and synthesized
        // records alike.
        match caps.get(index + 1) {
            Some(m) if spec.placeholder == Some(m.as_str()) && spec.is_optional(*field) => {}
            Some(m) => {
                record.fields.insert(*field, FieldValue::scalar(m.as_str()));
            }
            None if spec.is_optional(*field) => {}
            None => {
                return Err(Error::InvalidSchema {
                    kind: spec.kind,
                    message: format!("required field {field} has no capture group"),
                });
            }
        }
    }
    Ok(record)
}
