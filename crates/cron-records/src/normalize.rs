//! Post-parse normalization: kind hooks, then multi-line folding.
//!
//! A single logical entry can span three physically separate line groups
//! (naming comment, environment block, schedule line) that are not
//! syntactically distinguishable from arbitrary comments one line at a
//! time. Folding reassembles them in one forward pass by threading a
//! small explicit carry struct through the record stream.

use crate::record::{CronRecord, RawRecord};
use crate::schema::{RecordKind, Registry};

/// Carry state threaded through one folding pass. Both slots reset
/// together when a substantive record absorbs them.
#[derive(Debug, Default)]
struct Carry {
    pending_name: Option<String>,
    pending_env: Vec<String>,
}

/// Run kind post-parse hooks, then fold raw records into logical records.
pub fn normalize(mut records: Vec<RawRecord>, registry: &Registry) -> Vec<CronRecord> {
    for record in &mut records {
        if let Some(spec) = registry.spec(record.kind) {
            if let Some(hook) = spec.post_parse {
                hook(spec, record);
            }
        }
    }
    fold(records)
}

fn fold(records: Vec<RawRecord>) -> Vec<CronRecord> {
    let mut carry = Carry::default();
    let mut out = Vec::with_capacity(records.len());

    for mut record in records {
        let mut environment = Vec::new();
        match record.kind {
            // A stale header from a previous generation cycle; the fresh
            // header is prepended at render time.
            RecordKind::Header => record.skip = true,
            RecordKind::Comment => {
                if record.name.is_some() {
                    tracing::debug!(name = ?record.name, "naming comment opens a fold");
                    carry.pending_name = record.name.take();
                    carry.pending_env.clear();
                    record.skip = true;
                }
            }
            RecordKind::Environment => {
                // Environment collection is name-gated: without a pending
                // name the line is an ordinary passthrough.
                if carry.pending_name.is_some() {
                    carry.pending_env.push(record.line.clone());
                    record.skip = true;
                }
            }
            RecordKind::Blank => {}
            RecordKind::Special | RecordKind::Entry | RecordKind::Unmatched => {
                record.name = carry.pending_name.take();
                environment = std::mem::take(&mut carry.pending_env);
            }
        }

        if record.skip {
            continue;
        }
        out.push(CronRecord {
            kind: record.kind,
            name: record.name,
            environment,
            fields: record.fields,
            line: record.line,
        });
    }

    if carry.pending_name.is_some() || !carry.pending_env.is_empty() {
        tracing::debug!(
            name = ?carry.pending_name,
            env_lines = carry.pending_env.len(),
            "dangling fold carry with no following entry, dropped"
        );
    }

    out
}
