//! Submission: a form flattened into a single-level JSON object.
//!
//! Control names are kept verbatim (`mqtt[port]` stays one key); no nested
//! object is rebuilt. When several entries share a name the last one wins.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::FormTarget;

/// Flat mapping from control name to submitted value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, String>);

impl Submission {
    /// Build from form-data entries; later entries overwrite earlier ones.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self(entries.into_iter().collect())
    }

    /// Flatten the current state of `form`.
    #[must_use]
    pub fn from_form<F: FormTarget + ?Sized>(form: &F) -> Self {
        Self::from_entries(form.entries())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The submission as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }
}
