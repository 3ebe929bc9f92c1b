//! Regeneration of crontab text from logical records.
//!
//! The inverse of parsing + folding: each logical record re-expands into
//! its constituent lines (naming comment, environment block, schedule
//! line), fields serialize back to text in declared order, and a
//! platform-quirk post-pass de-duplicates `TZ=` lines that some systems
//! re-insert between write cycles.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::field::{Field, FieldValue};
use crate::record::{CronRecord, RawRecord};
use crate::schema::{NAME_MARKER, RecordKind, Registry};

/// Header prepended to every generated file. Static text, so repeated
/// generation of the same records is byte-identical.
pub const DEFAULT_HEADER: &str = "\
# HEADER: This file was autogenerated by cron-sync.
# HEADER: While it can still be managed manually, it is definitely not recommended.
# HEADER: Note particularly that the comments starting with 'Name:' should
# HEADER: not be deleted, as doing so could cause duplicate cron jobs.
";

static TZ_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TZ=.+$").expect("invalid TZ pattern"));

/// Serialize logical records back to file text, prefixed with `header`.
///
/// Fails with [`Error::MalformedRecord`] if a substantive record is
/// missing a field its kind requires; malformed internals must never be
/// coerced into something written to disk.
pub fn generate(header: &str, records: &[CronRecord], registry: &Registry) -> Result<String> {
    let mut lines = Vec::new();
    for record in records {
        if let Some(name) = &record.name {
            lines.push(format!("{NAME_MARKER} {name}"));
        }
        for env in &record.environment {
            lines.push(env.clone());
        }
        match record.kind {
            RecordKind::Entry | RecordKind::Special => {
                lines.push(entry_line(record, registry)?);
            }
            _ => lines.push(record.line.clone()),
        }
    }

    let lines = hoist_timezone(lines);
    let mut text = String::from(header);
    for line in &lines {
        text.push_str(line);
        text.push('\n');
    }
    Ok(text)
}

/// Serialize one substantive record to its schedule line.
fn entry_line(record: &CronRecord, registry: &Registry) -> Result<String> {
    let spec = registry.spec(record.kind).ok_or_else(|| Error::InvalidSchema {
        kind: record.kind,
        message: "kind is not declared in the registry".to_string(),
    })?;

    let mut raw = RawRecord::passthrough(record.kind, "");
    raw.fields = record.fields.clone();
    if let Some(hook) = spec.pre_gen {
        hook(spec, &mut raw);
    }

    // A record carrying a special keyword serializes as `@keyword command`
    // whatever its declared field layout.
    if let FieldValue::Scalar(keyword) = raw.field(Field::Special) {
        let FieldValue::Scalar(command) = raw.field(Field::Command) else {
            return Err(Error::MalformedRecord {
                kind: record.kind,
                field: Field::Command,
            });
        };
        return Ok(format!("@{keyword} {command}"));
    }

    let mut parts = Vec::with_capacity(spec.fields.len());
    for field in &spec.fields {
        match raw.field(*field) {
            FieldValue::Scalar(value) => parts.push(value.clone()),
            FieldValue::List(values) => parts.push(values.join(",")),
            FieldValue::Absent => match spec.placeholder {
                Some(placeholder) if spec.is_optional(*field) => {
                    parts.push(placeholder.to_string());
                }
                _ => {
                    return Err(Error::MalformedRecord {
                        kind: record.kind,
                        field: *field,
                    });
                }
            },
        }
    }
    Ok(parts.join(" "))
}

/// Collapse `TZ=` declarations to a single instance hoisted to the top
/// of the body, immediately after the header. Some platforms append a
/// fresh TZ line on every write cycle; without this the lines multiply.
fn hoist_timezone(lines: Vec<String>) -> Vec<String> {
    let mut timezone = None;
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if TZ_LINE.is_match(&line) {
            if timezone.is_none() {
                timezone = Some(line);
            } else {
                tracing::debug!(%line, "dropping redundant timezone declaration");
            }
        } else {
            out.push(line);
        }
    }
    if let Some(timezone) = timezone {
        out.insert(0, timezone);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn absent_fields_serialize_as_the_placeholder() {
        let record = CronRecord::entry("/bin/true");
        let text = generate("", &[record], Registry::standard()).unwrap();
        assert_eq!(text, "* * * * * /bin/true\n");
    }

    #[test]
    fn missing_command_is_a_malformed_record() {
        let mut record = CronRecord::entry("x");
        record.fields.clear();
        let err = generate("", &[record], Registry::standard()).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                kind: RecordKind::Entry,
                field: Field::Command,
            }
        ));
    }

    #[test]
    fn undeclared_kind_is_an_invalid_schema_error() {
        let record = CronRecord::entry("/bin/true").with_special("daily");
        let err = generate("", &[record], &Registry::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSchema {
                kind: RecordKind::Special,
                ..
            }
        ));
    }

    #[test]
    fn duplicate_timezone_lines_collapse_and_hoist() {
        let hoisted = hoist_timezone(vec![
            "* * * * * one".to_string(),
            "TZ=UTC".to_string(),
            "* * * * * two".to_string(),
            "TZ=UTC".to_string(),
        ]);
        assert_eq!(
            hoisted,
            vec!["TZ=UTC", "* * * * * one", "* * * * * two"]
        );
    }
}
