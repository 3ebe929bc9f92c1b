//! Matching desired-state specifications against parsed records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::field::{Field, FieldValue};
use crate::record::{CronRecord, CronTab};
use crate::schema::Registry;

/// A desired-state specification supplied by the convergence caller.
///
/// Schedule fields missing from the map (or set to [`FieldValue::Absent`])
/// are unset. The `user`/`target` pair is bridged by the property mapper
/// accessors in [`crate::property`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub name: String,
    pub(crate) user: Option<String>,
    pub(crate) target: Option<String>,
    pub command: String,
    /// Special-schedule keyword, stored without its `@` prefix.
    pub special: Option<String>,
    pub schedule: BTreeMap<Field, FieldValue>,
}

impl ResourceSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            ..Self::default()
        }
    }

    pub fn with_special(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.special = Some(keyword.trim_start_matches('@').to_string());
        self
    }

    pub fn with_field(mut self, field: Field, value: FieldValue) -> Self {
        self.schedule.insert(field, value);
        self
    }

    pub fn field(&self, field: Field) -> &FieldValue {
        self.schedule.get(&field).unwrap_or(&FieldValue::Absent)
    }
}

/// Find the at-most-one record representing the same real-world entry as
/// `spec`, using the standard schema. `None` is the normal "no on-disk
/// counterpart, treat as new" outcome, never an error.
pub fn find_match<'a>(spec: &ResourceSpec, tab: &'a CronTab) -> Option<&'a CronRecord> {
    find_match_with(spec, tab, Registry::standard())
}

/// [`find_match`] against a caller-supplied schema; the field layout and
/// wildcard placeholder come from the same registry the tab was parsed
/// with.
pub fn find_match_with<'a>(
    spec: &ResourceSpec,
    tab: &'a CronTab,
    registry: &Registry,
) -> Option<&'a CronRecord> {
    if spec.target() != Some(tab.target.as_str()) {
        tracing::trace!(target = %tab.target, "spec targets a different account");
        return None;
    }
    tab.records
        .iter()
        .filter(|record| record.kind.is_substantive())
        .find(|record| matches(spec, record, registry))
}

fn matches(spec: &ResourceSpec, record: &CronRecord, registry: &Registry) -> bool {
    // Command first: it discriminates most, so mismatches stay cheap.
    if record.command() != Some(spec.command.as_str()) {
        return false;
    }

    if record.special() != spec.special.as_deref() {
        tracing::trace!(command = %spec.command, "special keyword differs");
        return false;
    }

    let Some(kind_spec) = registry.spec(record.kind) else {
        return false;
    };
    let placeholder = kind_spec.placeholder.unwrap_or("*");

    for field in &kind_spec.fields {
        if matches!(field, Field::Command | Field::Special) {
            continue;
        }
        let on_disk = record.field(*field);
        let wanted = spec.field(*field);
        let equivalent = match (on_disk.is_absent(), wanted.is_absent()) {
            // Unset on both sides, or a wildcard on disk against an
            // unset spec (the wildcard parsed to Absent).
            (true, true) => true,
            // The spec spells the wildcard out literally.
            (true, false) => wanted.is_wildcard(placeholder),
            // A concrete value on disk never satisfies an unset spec.
            (false, true) => false,
            (false, false) => on_disk.structural_eq(wanted),
        };
        if !equivalent {
            tracing::trace!(command = %spec.command, field = %field, "field differs");
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CronRecord;
    use crate::schema::RecordKind;

    fn tab(records: Vec<CronRecord>) -> CronTab {
        CronTab {
            target: "root".into(),
            records,
        }
    }

    #[test]
    fn structural_records_are_never_candidates() {
        let mut comment = CronRecord::entry("/bin/true");
        comment.kind = RecordKind::Comment;
        comment.line = "# /bin/true".into();
        let tab = tab(vec![comment]);
        let mut spec = ResourceSpec::new("job", "/bin/true");
        spec.set_target("root");
        assert!(find_match(&spec, &tab).is_none());
    }

    #[test]
    fn target_mismatch_rules_out_the_whole_file() {
        let tab = tab(vec![CronRecord::entry("/bin/true")]);
        let mut spec = ResourceSpec::new("job", "/bin/true");
        spec.set_target("daemon");
        assert!(find_match(&spec, &tab).is_none());
    }
}
