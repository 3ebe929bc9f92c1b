//! YAML wire format, with a compatibility fixup for crontab payloads.
//!
//! Crontab field values routinely start with `@` (special keywords) or
//! `*` (wildcards). Hand-written or legacy-emitted YAML often leaves
//! such scalars unquoted, which YAML parsers reject: `@` is a reserved
//! indicator and a bare `*` reads as an alias reference. A single regex
//! pass quotes those scalars before decoding.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::Result;
use crate::WireFormat;

/// `key: @daily` or `key: * * * * * cmd` style mapping values that YAML
/// cannot parse unquoted. The capture runs to end of line (stopping
/// before a trailing comment), so multi-token commands are quoted whole.
static BARE_RESERVED_SCALAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(\s*[\w.-]+:\s+)([@*][^#\r\n]*?)\s*$").expect("invalid fixup pattern")
});

pub struct YamlFormat;

impl YamlFormat {
    /// Quote bare `@`/`*`-leading mapping values.
    fn fixup(text: &str) -> String {
        BARE_RESERVED_SCALAR
            .replace_all(text, |caps: &regex::Captures<'_>| {
                format!("{}\"{}\"", &caps[1], &caps[2])
            })
            .to_string()
    }
}

impl WireFormat for YamlFormat {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn mime(&self) -> &'static str {
        "text/yaml"
    }

    fn weight(&self) -> u32 {
        5
    }

    fn encode(&self, value: &Value) -> Result<String> {
        Ok(serde_yaml::to_string(value)?)
    }

    fn encode_many(&self, values: &[Value]) -> Result<String> {
        Ok(serde_yaml::to_string(values)?)
    }

    fn decode(&self, text: &str) -> Result<Value> {
        Ok(serde_yaml::from_str(&Self::fixup(text))?)
    }

    fn decode_many(&self, text: &str) -> Result<Vec<Value>> {
        Ok(serde_yaml::from_str(&Self::fixup(text))?)
    }
}
