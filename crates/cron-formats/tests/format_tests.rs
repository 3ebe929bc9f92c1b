//! Tests for the wire-format adapters

use cron_formats::{
    decode_record, decode_records, encode_record, encode_records, Error, Format, WireFormat,
};
use cron_records::{CronRecord, Field, FieldValue};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn sample() -> CronRecord {
    CronRecord::entry("/usr/local/bin/backup")
        .with_name("backup")
        .with_environment(["PATH=/usr/bin"])
        .with_field(Field::Minute, FieldValue::list(["1", "15"]))
}

#[rstest]
#[case(Format::Json)]
#[case(Format::Yaml)]
fn single_record_round_trips(#[case] format: Format) {
    let record = sample();
    let text = encode_record(format, &record).unwrap();
    assert_eq!(decode_record(format, &text).unwrap(), record);
}

#[rstest]
#[case(Format::Json)]
#[case(Format::Yaml)]
fn record_batches_round_trip_in_order(#[case] format: Format) {
    let records = vec![sample(), CronRecord::entry("/bin/true")];
    let text = encode_records(format, &records).unwrap();
    assert_eq!(decode_records(format, &text).unwrap(), records);
}

#[test]
fn yaml_decodes_legacy_unquoted_reserved_scalars() {
    let text = "\
kind: special
name: cleanup
environment: []
fields:
  special: daily
  command: /bin/cleanup
line: \"@daily /bin/cleanup\"
";
    let record = decode_record(Format::Yaml, text).unwrap();
    assert_eq!(record.special(), Some("daily"));

    // The same document with the line value left unquoted only parses
    // because of the compatibility fixup.
    let legacy = text.replace("\"@daily /bin/cleanup\"", "@daily /bin/cleanup");
    let record = decode_record(Format::Yaml, &legacy).unwrap();
    assert_eq!(record.line, "@daily /bin/cleanup");
}

#[test]
fn raw_passes_singular_text_through_unchanged() {
    let handler = Format::Raw.handler();
    let decoded = handler.decode("30 2 * * * /bin/job").unwrap();
    assert_eq!(handler.encode(&decoded).unwrap(), "30 2 * * * /bin/job");
}

#[test]
fn raw_refuses_collection_operations() {
    let handler = Format::Raw.handler();
    assert!(matches!(
        handler.encode_many(&[]),
        Err(Error::Unsupported { format: "raw", .. })
    ));
    assert!(matches!(
        handler.decode_many("anything"),
        Err(Error::Unsupported { format: "raw", .. })
    ));
}

#[test]
fn unknown_format_names_are_an_error() {
    assert!(matches!(
        Format::from_name("msgpack"),
        Err(Error::UnknownFormat(_))
    ));
}
