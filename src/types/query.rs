//! Permission query types exchanged with Claude Code and Banjo

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

fn empty_string() -> Value {
    Value::String(String::new())
}

/// Keep a field only if it is a JSON string
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// PermissionRequest hook input as sent by Claude Code on stdin
///
/// Every field is optional and none is type-checked: whatever Claude Code
/// sent is forwarded to Banjo as-is. Missing identifiers become `""` and a
/// missing `tool_input` becomes `{}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PermissionQuery {
    #[serde(default = "empty_string")]
    pub tool_name: Value,
    #[serde(default = "empty_object")]
    pub tool_input: Value,
    #[serde(default = "empty_string")]
    pub tool_use_id: Value,
    #[serde(default = "empty_string")]
    pub session_id: Value,
}

impl PermissionQuery {
    /// Decode hook input, which must be a single JSON object
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        if !value.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object"));
        }
        serde_json::from_value(value)
    }

    /// Tool name for log fields, empty when it is not a string
    pub fn tool_name_str(&self) -> &str {
        self.tool_name.as_str().unwrap_or_default()
    }
}

/// Request line sent to the approval authority
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayRequest {
    pub tool_name: Value,
    pub tool_input: Value,
    pub tool_use_id: Value,
    pub session_id: Value,
}

impl From<PermissionQuery> for RelayRequest {
    fn from(query: PermissionQuery) -> Self {
        Self {
            tool_name: query.tool_name,
            tool_input: query.tool_input,
            tool_use_id: query.tool_use_id,
            session_id: query.session_id,
        }
    }
}

/// Response line from the approval authority
///
/// `decision` is an open string: "allow", "deny" and "ask" are known,
/// anything else (or nothing) is treated like "ask". Non-string values of
/// either field are read as absent rather than rejecting the response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelayResponse {
    #[serde(default, deserialize_with = "string_or_none")]
    pub decision: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub message: Option<String>,
}
