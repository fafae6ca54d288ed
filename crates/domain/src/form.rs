//! Forms: the write surface populate works against, and an in-memory model.
//!
//! [`FormTarget`] is the narrow interface a form must offer: look up a control
//! by name, set its value, toggle its options, list its submission entries.
//! The browser adapter implements it over the DOM; [`FormModel`] implements it
//! in memory for host-side use and tests.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::field::FieldKind;

/// A form whose named controls can be read and written.
pub trait FormTarget {
    /// Kind of the control registered under `name`, or `None` if the form has
    /// no such control.
    fn field_kind(&self, name: &str) -> Option<FieldKind>;

    /// Set the value of a value-carrying control (text-like, select-one, date).
    fn set_value(&mut self, name: &str, value: &str);

    /// Values of the options under `name` in document order: the radio
    /// buttons of a group, the checkboxes sharing the name, or the options
    /// of a select.
    fn option_values(&self, name: &str) -> Vec<String>;

    /// Check (radio, checkbox) or select (select option) the option at
    /// `index` under `name`.
    fn set_option(&mut self, name: &str, index: usize, on: bool);

    /// Submission entries in document order, as a browser builds form data:
    /// one entry per value-carrying control, per checked box, per selected
    /// option.
    fn entries(&self) -> Vec<(String, String)>;
}

/// One option of a radio group, checkbox group, or select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub value: String,
    #[serde(default, alias = "selected")]
    pub checked: bool,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            checked: false,
        }
    }
}

/// State of a single named control, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Control {
    #[serde(
        alias = "number",
        alias = "password",
        alias = "email",
        alias = "hidden",
        alias = "textarea",
        alias = "url"
    )]
    Text {
        #[serde(default)]
        value: String,
    },
    Radio {
        options: Vec<Choice>,
    },
    Checkbox {
        options: Vec<Choice>,
    },
    SelectMultiple {
        options: Vec<Choice>,
    },
    #[serde(alias = "select")]
    SelectOne {
        #[serde(deserialize_with = "first_selected_by_default")]
        options: Vec<Choice>,
    },
    Date {
        #[serde(default)]
        value: String,
    },
}

fn choices<I, S>(values: I) -> Vec<Choice>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Choice::new).collect()
}

/// A select-one without a selected option shows, and submits, its first one.
fn select_first_if_none(options: &mut [Choice]) {
    if !options.iter().any(|c| c.checked)
        && let Some(first) = options.first_mut()
    {
        first.checked = true;
    }
}

fn first_selected_by_default<'de, D>(deserializer: D) -> Result<Vec<Choice>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut options = Vec::<Choice>::deserialize(deserializer)?;
    select_first_if_none(&mut options);
    Ok(options)
}

impl Control {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    #[must_use]
    pub fn date() -> Self {
        Self::Date {
            value: String::new(),
        }
    }

    /// A single checkbox carrying `value`.
    #[must_use]
    pub fn checkbox(value: impl Into<String>) -> Self {
        Self::Checkbox {
            options: vec![Choice::new(value)],
        }
    }

    /// Several checkboxes sharing one name.
    #[must_use]
    pub fn checkboxes<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Checkbox {
            options: choices(values),
        }
    }

    #[must_use]
    pub fn radio<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Radio {
            options: choices(values),
        }
    }

    /// A select with the first of `values` selected.
    #[must_use]
    pub fn select_one<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut options = choices(values);
        select_first_if_none(&mut options);
        Self::SelectOne { options }
    }

    #[must_use]
    pub fn select_multiple<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::SelectMultiple {
            options: choices(values),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Text { .. } => FieldKind::Text,
            Self::Radio { .. } => FieldKind::Radio,
            Self::Checkbox { .. } => FieldKind::Checkbox,
            Self::SelectMultiple { .. } => FieldKind::SelectMultiple,
            Self::SelectOne { .. } => FieldKind::SelectOne,
            Self::Date { .. } => FieldKind::Date,
        }
    }

    /// Current value of a value-carrying control. A select-one whose value
    /// was set to none of its options reads as empty.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Text { value } | Self::Date { value } => Some(value.as_str()),
            Self::SelectOne { options } => Some(
                options
                    .iter()
                    .find(|c| c.checked)
                    .map_or("", |c| c.value.as_str()),
            ),
            Self::Radio { .. } | Self::Checkbox { .. } | Self::SelectMultiple { .. } => None,
        }
    }

    /// Values of the checked or selected options.
    #[must_use]
    pub fn checked_values(&self) -> Vec<&str> {
        self.options()
            .iter()
            .filter(|c| c.checked)
            .map(|c| c.value.as_str())
            .collect()
    }

    fn options(&self) -> &[Choice] {
        match self {
            Self::Radio { options }
            | Self::Checkbox { options }
            | Self::SelectMultiple { options }
            | Self::SelectOne { options } => options,
            Self::Text { .. } | Self::Date { .. } => &[],
        }
    }

    fn options_mut(&mut self) -> &mut [Choice] {
        match self {
            Self::Radio { options }
            | Self::Checkbox { options }
            | Self::SelectMultiple { options }
            | Self::SelectOne { options } => options,
            Self::Text { .. } | Self::Date { .. } => &mut [],
        }
    }
}

/// A named control inside a [`FormModel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(flatten)]
    pub control: Control,
}

/// In-memory form: an ordered list of named controls.
///
/// Lookups by name return the first control registered under that name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormModel {
    #[serde(default, rename = "field")]
    fields: Vec<Field>,
}

impl FormModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a control, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, control: Control) -> Self {
        self.fields.push(Field {
            name: name.into(),
            control,
        });
        self
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] when a control has no name.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.fields.iter().any(|f| f.name.trim().is_empty()) {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn control(&self, name: &str) -> Option<&Control> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.control)
    }

    fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| &mut f.control)
    }

    /// Current value of the value-carrying control `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.control(name).and_then(Control::value)
    }

    /// Checked or selected option values of the control `name`.
    #[must_use]
    pub fn checked(&self, name: &str) -> Vec<&str> {
        self.control(name)
            .map(Control::checked_values)
            .unwrap_or_default()
    }
}

impl FormTarget for FormModel {
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.control(name).map(Control::kind)
    }

    fn set_value(&mut self, name: &str, value: &str) {
        match self.control_mut(name) {
            Some(Control::Text { value: current } | Control::Date { value: current }) => {
                *current = value.to_string();
            }
            Some(Control::SelectOne { options }) => {
                // An unknown value leaves the select with nothing selected.
                for choice in options.iter_mut() {
                    choice.checked = choice.value == value;
                }
            }
            Some(_) | None => {}
        }
    }

    fn option_values(&self, name: &str) -> Vec<String> {
        self.control(name)
            .map(|c| c.options().iter().map(|o| o.value.clone()).collect())
            .unwrap_or_default()
    }

    fn set_option(&mut self, name: &str, index: usize, on: bool) {
        let Some(control) = self.control_mut(name) else {
            return;
        };
        let exclusive = matches!(control, Control::SelectOne { .. }) && on;
        let options = control.options_mut();
        if index >= options.len() {
            return;
        }
        if exclusive {
            for choice in options.iter_mut() {
                choice.checked = false;
            }
        }
        options[index].checked = on;
    }

    fn entries(&self) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        for field in &self.fields {
            match &field.control {
                Control::Text { value } | Control::Date { value } => {
                    entries.push((field.name.clone(), value.clone()));
                }
                other => {
                    for value in other.checked_values() {
                        entries.push((field.name.clone(), value.to_string()));
                    }
                }
            }
        }
        entries
    }
}
