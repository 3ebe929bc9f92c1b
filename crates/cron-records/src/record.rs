//! Raw and logical record types, and the whole-file representation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::field::{Field, FieldValue};
use crate::generate;
use crate::normalize;
use crate::parser;
use crate::schema::{RecordKind, Registry};

/// One classified line, as produced by the parser.
///
/// Raw records exist only between parsing and folding; `skip` marks
/// records whose content has been absorbed into a following logical
/// record and which are dropped from the visible stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub kind: RecordKind,
    /// Original line text, kept verbatim for passthrough kinds.
    pub line: String,
    pub fields: BTreeMap<Field, FieldValue>,
    /// Name extracted from a naming comment by the comment kind's
    /// post-parse hook.
    pub name: Option<String>,
    pub skip: bool,
}

impl RawRecord {
    /// A record that carries nothing but its original text.
    pub fn passthrough(kind: RecordKind, line: impl Into<String>) -> Self {
        Self {
            kind,
            line: line.into(),
            fields: BTreeMap::new(),
            name: None,
            skip: false,
        }
    }

    pub fn field(&self, field: Field) -> &FieldValue {
        self.fields.get(&field).unwrap_or(&FieldValue::Absent)
    }
}

/// One logical resource record: a real-world entry that may have spanned
/// several physical lines (naming comment, environment block, schedule
/// line), folded back together.
///
/// Structural records (blank lines, bare comments, unmatched lines)
/// survive as passthrough records so regeneration loses nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronRecord {
    pub kind: RecordKind,
    /// `None` means unnamed, i.e. not managed by name.
    pub name: Option<String>,
    /// Environment lines folded from above; empty means absent.
    pub environment: Vec<String>,
    /// Substantive field map with list fields already split.
    pub fields: BTreeMap<Field, FieldValue>,
    /// Original line text, emitted verbatim for passthrough kinds.
    pub line: String,
}

impl CronRecord {
    /// A new substantive entry built from scratch (rather than parsed).
    pub fn entry(command: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(Field::Command, FieldValue::scalar(command));
        Self {
            kind: RecordKind::Entry,
            name: None,
            environment: Vec::new(),
            fields,
            line: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_field(mut self, field: Field, value: FieldValue) -> Self {
        self.fields.insert(field, value);
        self
    }

    pub fn with_special(mut self, keyword: impl Into<String>) -> Self {
        self.kind = RecordKind::Special;
        self.fields
            .insert(Field::Special, FieldValue::scalar(keyword));
        self
    }

    pub fn with_environment<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn field(&self, field: Field) -> &FieldValue {
        self.fields.get(&field).unwrap_or(&FieldValue::Absent)
    }

    /// The special-schedule keyword, without its `@` prefix.
    pub fn special(&self) -> Option<&str> {
        match self.field(Field::Special) {
            FieldValue::Scalar(kw) => Some(kw.as_str()),
            _ => None,
        }
    }

    pub fn command(&self) -> Option<&str> {
        match self.field(Field::Command) {
            FieldValue::Scalar(cmd) => Some(cmd.as_str()),
            _ => None,
        }
    }
}

/// The whole-file representation: the owning account plus the ordered
/// logical records. Constructed fresh on every read and discarded after
/// every write; the only identity that persists across invocations is
/// what the text itself encodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CronTab {
    pub target: String,
    pub records: Vec<CronRecord>,
}

impl CronTab {
    /// Parse and fold raw crontab text using the standard schema.
    pub fn parse(target: impl Into<String>, text: &str) -> Result<Self> {
        Self::parse_with(target, text, Registry::standard())
    }

    /// Parse and fold with a caller-supplied schema.
    pub fn parse_with(
        target: impl Into<String>,
        text: &str,
        registry: &Registry,
    ) -> Result<Self> {
        let raw = parser::parse(text, registry)?;
        Ok(Self {
            target: target.into(),
            records: normalize::normalize(raw, registry),
        })
    }

    /// Regenerate file text, prefixed with `header`, using the standard
    /// schema.
    pub fn render(&self, header: &str) -> Result<String> {
        generate::generate(header, &self.records, Registry::standard())
    }

    /// Substantive schedule entries, skipping structural passthroughs.
    pub fn entries(&self) -> impl Iterator<Item = &CronRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.kind, RecordKind::Entry | RecordKind::Special))
    }
}
