//! Wire-format adapters for transporting parsed records.
//!
//! Each adapter is a thin codec over an existing serde format: exactly
//! four operations (encode one, encode many, decode one, decode many)
//! against `serde_json::Value` as the interchange representation, plus a
//! declared applicability weight consumed by the caller's
//! content-negotiation step. The record engine has no dependency on any
//! of this; adapters treat records as opaque payloads.

pub mod error;
pub mod json;
pub mod raw;
pub mod yaml;

pub use error::{Error, Result};
pub use json::JsonFormat;
pub use raw::RawFormat;
pub use yaml::YamlFormat;

use cron_records::CronRecord;
use serde_json::Value;

/// A wire-format codec for record transport.
pub trait WireFormat {
    fn name(&self) -> &'static str;
    fn mime(&self) -> &'static str;
    /// Relative preference during content negotiation; higher wins.
    fn weight(&self) -> u32;

    fn encode(&self, value: &Value) -> Result<String>;
    fn encode_many(&self, values: &[Value]) -> Result<String>;
    fn decode(&self, text: &str) -> Result<Value>;
    fn decode_many(&self, text: &str) -> Result<Vec<Value>>;
}

/// The supported wire formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Json,
    Yaml,
    /// Pass-through for pre-serialized text. Weighted so low it is never
    /// chosen automatically against another candidate.
    Raw,
}

impl Format {
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "raw" => Ok(Self::Raw),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }

    pub fn handler(&self) -> Box<dyn WireFormat> {
        match self {
            Self::Json => Box::new(JsonFormat),
            Self::Yaml => Box::new(YamlFormat),
            Self::Raw => Box::new(RawFormat),
        }
    }

    /// Pick the highest-weight format among the acceptable names.
    /// Unknown names are skipped rather than refused; `None` means no
    /// acceptable name is supported.
    pub fn negotiate<'a, I>(acceptable: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        acceptable
            .into_iter()
            .filter_map(|name| Self::from_name(name).ok())
            .max_by_key(|format| format.handler().weight())
    }
}

/// Encode a single record for transport.
pub fn encode_record(format: Format, record: &CronRecord) -> Result<String> {
    format.handler().encode(&serde_json::to_value(record)?)
}

/// Decode a single record from transport text.
pub fn decode_record(format: Format, text: &str) -> Result<CronRecord> {
    Ok(serde_json::from_value(format.handler().decode(text)?)?)
}

/// Encode an ordered batch of records for transport.
pub fn encode_records(format: Format, records: &[CronRecord]) -> Result<String> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    format.handler().encode_many(&values)
}

/// Decode an ordered batch of records from transport text.
pub fn decode_records(format: Format, text: &str) -> Result<Vec<CronRecord>> {
    format
        .handler()
        .decode_many(text)?
        .into_iter()
        .map(|value| Ok(serde_json::from_value(value)?))
        .collect()
}
