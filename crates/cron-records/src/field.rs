//! Field names and values for substantive crontab records

use serde::{Deserialize, Serialize};

/// Substantive fields a schedule line can carry.
///
/// The five schedule fields plus the special keyword and the command.
/// `Command` is the reserved field: it is never list-valued and never
/// optional, and every derived field set excludes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Minute,
    Hour,
    Monthday,
    Month,
    Weekday,
    Special,
    Command,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Monthday => "monthday",
            Self::Month => "month",
            Self::Weekday => "weekday",
            Self::Special => "special",
            Self::Command => "command",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A captured field value.
///
/// The on-disk wildcard placeholder (`*`) is translated to `Absent` at
/// parse time and back at generation time, so no sentinel string ever
/// circulates through the engine and a legitimate literal value can never
/// collide with "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Absent,
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// View as an ordered value list. A scalar is a one-element list;
    /// `Absent` has no list form.
    pub fn as_list(&self) -> Option<Vec<&str>> {
        match self {
            Self::Absent => None,
            Self::Scalar(v) => Some(vec![v.as_str()]),
            Self::List(vs) => Some(vs.iter().map(String::as_str).collect()),
        }
    }

    /// Structural equality: scalar and one-element list compare as the
    /// same value, `Absent` only equals `Absent`.
    pub fn structural_eq(&self, other: &FieldValue) -> bool {
        self.as_list() == other.as_list()
    }

    /// True when this value is the literal wildcard for `placeholder`.
    ///
    /// Only the literal placeholder (scalar or one-element list) counts;
    /// an empty list is not an absence encoding.
    pub fn is_wildcard(&self, placeholder: &str) -> bool {
        self.as_list().is_some_and(|vs| vs == [placeholder])
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        Self::Absent
    }
}
