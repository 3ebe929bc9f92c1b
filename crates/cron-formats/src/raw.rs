//! Raw pass-through format for pre-serialized text.
//!
//! Supports singular payloads only; the batch operations are refused
//! rather than guessed at.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::WireFormat;

pub struct RawFormat;

impl WireFormat for RawFormat {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn mime(&self) -> &'static str {
        "application/x-raw"
    }

    fn weight(&self) -> u32 {
        1
    }

    fn encode(&self, value: &Value) -> Result<String> {
        match value {
            Value::String(text) => Ok(text.clone()),
            _ => Err(Error::Unsupported {
                format: "raw",
                operation: "encoding structured values",
            }),
        }
    }

    fn encode_many(&self, _values: &[Value]) -> Result<String> {
        Err(Error::Unsupported {
            format: "raw",
            operation: "encoding collections",
        })
    }

    fn decode(&self, text: &str) -> Result<Value> {
        Ok(Value::String(text.to_string()))
    }

    fn decode_many(&self, _text: &str) -> Result<Vec<Value>> {
        Err(Error::Unsupported {
            format: "raw",
            operation: "decoding collections",
        })
    }
}
