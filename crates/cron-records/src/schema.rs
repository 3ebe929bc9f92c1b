//! Line kind declarations and the ordered classification registry.
//!
//! Each recognized line shape is declared as a [`KindSpec`]: a regex
//! matcher, an ordered field list, the optional-field subset with its
//! absent placeholder, and optional post-parse / pre-generation hooks.
//! Classification runs the declarations in order and the first match
//! wins, so declaration order is the priority: `@keyword` lines must be
//! tried before the generic six-field rule (a line like
//! `@daily run one two three four` would otherwise satisfy it), and the
//! header marker must be tried before the bare comment rule.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::field::{Field, FieldValue};
use crate::record::RawRecord;

/// The recognized line kinds, plus `Unmatched` for verbatim passthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A line of the generated file header. Dropped during folding so a
    /// regenerated file never accumulates stale headers.
    Header,
    Comment,
    Blank,
    Environment,
    /// `@keyword command` schedule line.
    Special,
    /// Six-field schedule line.
    Entry,
    Unmatched,
}

impl RecordKind {
    /// Kinds that represent a schedulable entry and can absorb a pending
    /// name and environment block during folding.
    pub fn is_substantive(&self) -> bool {
        matches!(self, Self::Special | Self::Entry | Self::Unmatched)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Comment => "comment",
            Self::Blank => "blank",
            Self::Environment => "environment",
            Self::Special => "special",
            Self::Entry => "entry",
            Self::Unmatched => "unmatched",
        };
        f.write_str(name)
    }
}

/// A hook attached to a kind declaration, dispatched from the kind table.
pub type RecordHook = fn(&KindSpec, &mut RawRecord);

/// Declaration of one recognized line kind.
pub struct KindSpec {
    pub kind: RecordKind,
    pub pattern: Regex,
    /// Ordered field list, matched positionally against capture groups.
    pub fields: Vec<Field>,
    /// Fields that may be absent; their on-disk text is `placeholder`.
    pub optional: Vec<Field>,
    /// Absent placeholder text for optional fields.
    pub placeholder: Option<&'static str>,
    /// Fields taking comma-joined multiples. Computed once at
    /// construction as the declared fields minus the reserved command
    /// field, so schema changes never touch normalization logic.
    pub list_fields: Vec<Field>,
    pub post_parse: Option<RecordHook>,
    pub pre_gen: Option<RecordHook>,
}

impl KindSpec {
    /// A structural kind: matched and preserved, no fields captured.
    pub fn text(kind: RecordKind, pattern: &str) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern).expect("invalid kind pattern"),
            fields: Vec::new(),
            optional: Vec::new(),
            placeholder: None,
            list_fields: Vec::new(),
            post_parse: None,
            pre_gen: None,
        }
    }

    /// A record kind capturing `fields` from the pattern's groups.
    pub fn record(kind: RecordKind, pattern: &str, fields: &[Field]) -> Self {
        let list_fields = fields
            .iter()
            .copied()
            .filter(|f| *f != Field::Command)
            .collect();
        Self {
            kind,
            pattern: Regex::new(pattern).expect("invalid kind pattern"),
            fields: fields.to_vec(),
            optional: Vec::new(),
            placeholder: None,
            list_fields,
            post_parse: None,
            pre_gen: None,
        }
    }

    pub fn with_optional(mut self, fields: &[Field], placeholder: &'static str) -> Self {
        self.optional = fields.to_vec();
        self.placeholder = Some(placeholder);
        self
    }

    pub fn with_post_parse(mut self, hook: RecordHook) -> Self {
        self.post_parse = Some(hook);
        self
    }

    pub fn with_pre_gen(mut self, hook: RecordHook) -> Self {
        self.pre_gen = Some(hook);
        self
    }

    pub fn is_optional(&self, field: Field) -> bool {
        self.optional.contains(&field)
    }
}

/// Ordered set of kind declarations; first match wins.
pub struct Registry {
    kinds: Vec<KindSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    /// Append a kind declaration. Priority is insertion order.
    pub fn register(&mut self, spec: KindSpec) {
        self.kinds.push(spec);
    }

    /// Classify a line, returning the first declared kind whose pattern
    /// matches along with its captures. `None` means the line is
    /// preserved as an unmatched passthrough.
    pub fn classify<'t>(&self, line: &'t str) -> Option<(&KindSpec, regex::Captures<'t>)> {
        self.kinds
            .iter()
            .find_map(|spec| spec.pattern.captures(line).map(|caps| (spec, caps)))
    }

    /// Look up the declaration for a kind.
    pub fn spec(&self, kind: RecordKind) -> Option<&KindSpec> {
        self.kinds.iter().find(|spec| spec.kind == kind)
    }

    /// The built-in crontab schema.
    pub fn standard() -> &'static Registry {
        static STANDARD: LazyLock<Registry> = LazyLock::new(|| {
            let mut registry = Registry::new();
            registry.register(KindSpec::text(RecordKind::Header, r"^# HEADER: "));
            registry.register(
                KindSpec::text(RecordKind::Comment, r"^#").with_post_parse(comment_post_parse),
            );
            registry.register(KindSpec::text(RecordKind::Blank, r"^\s*$"));
            registry.register(KindSpec::text(RecordKind::Environment, r"^\w+="));
            registry.register(KindSpec::record(
                RecordKind::Special,
                r"^@(\w+)\s+(.+)$",
                &[Field::Special, Field::Command],
            ));
            registry.register(
                KindSpec::record(
                    RecordKind::Entry,
                    r"^\s*(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(.+)$",
                    &[
                        Field::Minute,
                        Field::Hour,
                        Field::Monthday,
                        Field::Month,
                        Field::Weekday,
                        Field::Command,
                    ],
                )
                .with_optional(
                    &[
                        Field::Minute,
                        Field::Hour,
                        Field::Monthday,
                        Field::Month,
                        Field::Weekday,
                    ],
                    "*",
                )
                .with_post_parse(entry_post_parse)
                .with_pre_gen(entry_pre_gen),
            );
            registry
        });
        &STANDARD
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Marker embedded in comments that name the following entry.
pub const NAME_MARKER: &str = "# Name:";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Name:\s*(.+?)\s*$").expect("invalid name marker pattern"));

/// Extract an embedded record name from a naming comment.
fn comment_post_parse(_spec: &KindSpec, record: &mut RawRecord) {
    if let Some(caps) = NAME_PATTERN.captures(&record.line) {
        record.name = Some(caps[1].to_string());
    }
}

/// Split comma-joined schedule fields into ordered value lists.
fn entry_post_parse(spec: &KindSpec, record: &mut RawRecord) {
    for field in &spec.list_fields {
        if let Some(FieldValue::Scalar(value)) = record.fields.get(field) {
            let values = value.split(',').map(str::to_string).collect();
            record.fields.insert(*field, FieldValue::List(values));
        }
    }
}

/// Join list-valued schedule fields back with `,` for serialization.
fn entry_pre_gen(spec: &KindSpec, record: &mut RawRecord) {
    for field in &spec.list_fields {
        if let Some(FieldValue::List(values)) = record.fields.get(field) {
            let joined = values.join(",");
            record.fields.insert(*field, FieldValue::Scalar(joined));
        }
    }
}
