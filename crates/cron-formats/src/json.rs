//! JSON wire format

use serde_json::Value;

use crate::error::Result;
use crate::WireFormat;

/// The preferred transport format.
pub struct JsonFormat;

impl WireFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn mime(&self) -> &'static str {
        "application/json"
    }

    fn weight(&self) -> u32 {
        10
    }

    fn encode(&self, value: &Value) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn encode_many(&self, values: &[Value]) -> Result<String> {
        Ok(serde_json::to_string(values)?)
    }

    fn decode(&self, text: &str) -> Result<Value> {
        Ok(serde_json::from_str(text)?)
    }

    fn decode_many(&self, text: &str) -> Result<Vec<Value>> {
        Ok(serde_json::from_str(text)?)
    }
}
