//! Populate: write a configuration object into the matching form controls.
//!
//! Walks the object recursively, building a [`FieldPath`] per leaf. Nested
//! objects extend the path; arrays mark it with `[]` and become the value
//! list of a multi-option control. Each leaf is bound to the control whose
//! name equals the rendered path, dispatched on the control's [`FieldKind`].
//! Leaves without a control are skipped.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::date::calendar_date;
use crate::error::PanelError;
use crate::field::FieldKind;
use crate::form::FormTarget;
use crate::path::FieldPath;
use crate::value::{contains_number, contains_string, display_string, numeric, value_list};

/// What a populate pass did, by rendered field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Names of the controls that received a value.
    pub bound: Vec<String>,
    /// Names computed for leaves the form has no control for.
    pub skipped: Vec<String>,
}

/// Populate `form` from the configuration object `data`.
///
/// # Errors
///
/// Returns [`PanelError::Date`] when a date control receives a value that is
/// not a date. Controls bound before the failure keep their new values; the
/// remaining keys are not visited.
pub fn populate<F>(form: &mut F, data: &Map<String, Value>) -> Result<PopulateReport, PanelError>
where
    F: FormTarget + ?Sized,
{
    let mut report = PopulateReport::default();
    populate_under(form, data, &FieldPath::default(), &mut report)?;
    Ok(report)
}

fn populate_under<F>(
    form: &mut F,
    data: &Map<String, Value>,
    prefix: &FieldPath,
    report: &mut PopulateReport,
) -> Result<(), PanelError>
where
    F: FormTarget + ?Sized,
{
    for (key, raw) in data {
        let path = prefix.child(key.as_str());
        let (path, value) = match raw {
            Value::Object(nested) => {
                populate_under(form, nested, &path, report)?;
                continue;
            }
            Value::Array(_) => (path.array(), Cow::Borrowed(raw)),
            Value::Null => (path, Cow::Owned(Value::String(String::new()))),
            _ => (path, Cow::Borrowed(raw)),
        };

        let name = path.to_string();
        if bind(form, &name, &value)? {
            report.bound.push(name);
        } else {
            report.skipped.push(name);
        }
    }
    Ok(())
}

/// Bind one leaf value to the control named `name`. Returns `false` when the
/// form has no such control.
fn bind<F>(form: &mut F, name: &str, value: &Value) -> Result<bool, PanelError>
where
    F: FormTarget + ?Sized,
{
    let Some(kind) = form.field_kind(name) else {
        return Ok(false);
    };
    match kind {
        FieldKind::Text => set_text(form, name, value),
        FieldKind::Radio | FieldKind::Checkbox => check_numeric(form, name, value),
        FieldKind::SelectMultiple => select_strings(form, name, value),
        FieldKind::SelectOne => select_value(form, name, value),
        FieldKind::Date => set_date(form, name, value)?,
    }
    Ok(true)
}

fn set_text<F: FormTarget + ?Sized>(form: &mut F, name: &str, value: &Value) {
    form.set_value(name, &display_string(value));
}

/// Radio buttons and checkboxes: an option is checked iff its value, read as
/// a number, is among the numbers of the value list.
fn check_numeric<F: FormTarget + ?Sized>(form: &mut F, name: &str, value: &Value) {
    let list = value_list(value);
    for (index, option) in form.option_values(name).iter().enumerate() {
        let on = numeric(option).is_some_and(|n| contains_number(&list, n));
        form.set_option(name, index, on);
    }
}

/// Multi-selects: an option is selected iff its value is among the strings
/// of the value list.
fn select_strings<F: FormTarget + ?Sized>(form: &mut F, name: &str, value: &Value) {
    let list = value_list(value);
    for (index, option) in form.option_values(name).iter().enumerate() {
        form.set_option(name, index, contains_string(&list, option));
    }
}

fn select_value<F: FormTarget + ?Sized>(form: &mut F, name: &str, value: &Value) {
    form.set_value(name, &display_string(value));
}

fn set_date<F: FormTarget + ?Sized>(
    form: &mut F,
    name: &str,
    value: &Value,
) -> Result<(), PanelError> {
    let date = calendar_date(value)?;
    form.set_value(name, &date);
    Ok(())
}
