//! Field kinds: how a named control takes a configuration value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of control registered under a field name.
///
/// Derived from the control's `type` string. Every type without a dedicated
/// handler (`text`, `number`, `password`, `hidden`, `textarea`, …) is
/// [`FieldKind::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Radio,
    Checkbox,
    SelectMultiple,
    SelectOne,
    Date,
}

impl FieldKind {
    /// Classify a control `type` string.
    #[must_use]
    pub fn from_control_type(control_type: &str) -> Self {
        match control_type.trim().to_ascii_lowercase().as_str() {
            "radio" => Self::Radio,
            "checkbox" => Self::Checkbox,
            "select-multiple" => Self::SelectMultiple,
            "select" | "select-one" => Self::SelectOne,
            "date" => Self::Date,
            _ => Self::Text,
        }
    }

    /// Canonical `type` string of this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::SelectMultiple => "select-multiple",
            Self::SelectOne => "select-one",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for FieldKind {
    fn from(value: String) -> Self {
        Self::from_control_type(&value)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}
