//! End-to-end synchronization cycles: parse, match, converge, regenerate.

use cron_formats::{decode_records, encode_records, Format};
use cron_records::{
    find_match, CronRecord, CronTab, DEFAULT_HEADER, Field, FieldValue, RecordKind, ResourceSpec,
};
use pretty_assertions::assert_eq;

const FIXTURE: &str = "\
# HEADER: This file was autogenerated by cron-sync.
# HEADER: While it can still be managed manually, it is definitely not recommended.
TZ=America/New_York
SHELL=/bin/sh
# kept by the admin, do not touch

# Name: nightly-backup
PATH=/usr/bin
MAILTO=ops@example.com
0 3 * * * /usr/local/bin/backup --all
@reboot /usr/local/bin/warm-cache
1,15 8-17 * * 1-5 /usr/bin/sync-mail
TZ=America/New_York
";

fn backup_spec() -> ResourceSpec {
    let mut spec = ResourceSpec::new("nightly-backup", "/usr/local/bin/backup --all")
        .with_field(Field::Minute, FieldValue::list(["0"]))
        .with_field(Field::Hour, FieldValue::list(["3"]));
    spec.set_user("root");
    spec
}

#[test]
fn parsing_reassembles_the_managed_entry() {
    let tab = CronTab::parse("root", FIXTURE).unwrap();

    let backup = find_match(&backup_spec(), &tab).expect("existing entry should match");
    assert_eq!(backup.name.as_deref(), Some("nightly-backup"));
    assert_eq!(
        backup.environment,
        vec!["PATH=/usr/bin", "MAILTO=ops@example.com"]
    );

    // Unmanaged structure survives as passthrough records.
    let lines: Vec<&str> = tab
        .records
        .iter()
        .filter(|r| !r.kind.is_substantive())
        .map(|r| r.line.as_str())
        .collect();
    assert_eq!(
        lines,
        vec![
            "TZ=America/New_York",
            "SHELL=/bin/sh",
            "# kept by the admin, do not touch",
            "",
            "TZ=America/New_York",
        ]
    );
}

#[test]
fn an_unmatched_spec_converges_by_appending_a_new_entry() {
    let mut tab = CronTab::parse("root", FIXTURE).unwrap();

    let mut spec = ResourceSpec::new("log-rotate", "/usr/sbin/logrotate /etc/logrotate.conf")
        .with_field(Field::Minute, FieldValue::list(["30"]));
    spec.set_user("root");
    assert!(find_match(&spec, &tab).is_none(), "new resource, no counterpart");

    tab.records.push(
        CronRecord::entry(spec.command.clone())
            .with_name(spec.name.clone())
            .with_field(Field::Minute, spec.field(Field::Minute).clone()),
    );
    let rendered = tab.render(DEFAULT_HEADER).unwrap();

    let reparsed = CronTab::parse("root", &rendered).unwrap();
    let found = find_match(&spec, &reparsed).expect("appended entry should now match");
    assert_eq!(found.name.as_deref(), Some("log-rotate"));
    assert!(rendered.ends_with("# Name: log-rotate\n30 * * * * /usr/sbin/logrotate /etc/logrotate.conf\n"));
}

#[test]
fn regeneration_normalizes_header_and_timezone_quirks() {
    let tab = CronTab::parse("root", FIXTURE).unwrap();
    let rendered = tab.render(DEFAULT_HEADER).unwrap();

    // Exactly one TZ line, hoisted to immediately after the header.
    assert_eq!(rendered.matches("TZ=America/New_York").count(), 1);
    let expected_start = format!("{DEFAULT_HEADER}TZ=America/New_York\nSHELL=/bin/sh\n");
    assert!(rendered.starts_with(&expected_start));

    // The stale two-line header was dropped, the fresh four-line one
    // prepended; nothing else about the admin's content moved.
    assert_eq!(rendered.matches("# HEADER:").count(), 4);
    assert!(rendered.contains("# kept by the admin, do not touch\n"));

    // A second cycle over engine output is byte-stable.
    let again = CronTab::parse("root", &rendered)
        .unwrap()
        .render(DEFAULT_HEADER)
        .unwrap();
    assert_eq!(again, rendered);
}

#[test]
fn parsed_records_survive_wire_transport() {
    let tab = CronTab::parse("root", FIXTURE).unwrap();
    let entries: Vec<CronRecord> = tab.entries().cloned().collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].kind, RecordKind::Special);

    let format = Format::negotiate(["yaml", "json"]).unwrap();
    assert_eq!(format, Format::Json);
    let wire = encode_records(format, &entries).unwrap();
    assert_eq!(decode_records(format, &wire).unwrap(), entries);
}
