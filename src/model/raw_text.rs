//! A text field that never fails to deserialize.
//!
//! The remote store does not guarantee the shape of every record. A single record with an object
//! where a date string should be must not fail deserialization of the whole list, so fields that
//! are known to arrive malformed are held as `RawText`.

use serde::de::{Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// The raw contents of a loosely typed field. Strings are kept as-is, `null` becomes the empty
/// string and any other JSON value keeps its JSON text, e.g. `{}`.
#[derive(Debug, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RawText(String);

impl RawText {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RawText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RawText {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for RawText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for RawText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for RawText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RawText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self(match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_any_value() {
        let parsed: Vec<RawText> =
            serde_json::from_str(r#"["2004-04-04", null, {}, 80, true]"#).unwrap();
        let strings: Vec<&str> = parsed.iter().map(|r| r.as_str()).collect();
        assert_eq!(strings, vec!["2004-04-04", "", "{}", "80", "true"]);
    }

    #[test]
    fn test_serializes_as_string() {
        let json = serde_json::to_string(&RawText::from("{}")).unwrap();
        assert_eq!(json, r#""{}""#);
    }
}
