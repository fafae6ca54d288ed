//! `FormTarget` over live `<form>` elements.

use js_sys::{Array, Object, Reflect};
use panelweb_app::ports::FormHost;
use panelweb_domain::field::FieldKind;
use panelweb_domain::form::FormTarget;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, FormData, HtmlFormElement, HtmlSelectElement, RadioNodeList};

fn property(target: &JsValue, key: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(key)).unwrap_or(JsValue::UNDEFINED)
}

fn set_property(target: &JsValue, key: &str, value: &JsValue) {
    let _ = Reflect::set(target, &JsValue::from_str(key), value);
}

/// The `type` of a named control; for a group, the type of its first member.
fn control_type(control: &JsValue) -> String {
    if let Some(group) = control.dyn_ref::<RadioNodeList>() {
        return group
            .item(0)
            .and_then(|node| property(&node, "type").as_string())
            .unwrap_or_default();
    }
    property(control, "type").as_string().unwrap_or_default()
}

/// The toggleable members under a name, with the property that toggles them.
fn options(control: &JsValue) -> Vec<(JsValue, &'static str)> {
    if let Some(select) = control.dyn_ref::<HtmlSelectElement>() {
        let list = select.options();
        return (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|option| (JsValue::from(option), "selected"))
            .collect();
    }
    if let Some(group) = control.dyn_ref::<RadioNodeList>() {
        return (0..group.length())
            .filter_map(|i| group.item(i))
            .map(|node| (JsValue::from(node), "checked"))
            .collect();
    }
    vec![(control.clone(), "checked")]
}

/// One form of the document.
pub struct DomForm {
    element: HtmlFormElement,
}

impl DomForm {
    #[must_use]
    pub fn new(element: HtmlFormElement) -> Self {
        Self { element }
    }

    fn named(&self, name: &str) -> Option<Object> {
        self.element.elements().named_item(name)
    }
}

impl FormTarget for DomForm {
    fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.named(name)
            .map(|control| FieldKind::from_control_type(&control_type(&control)))
    }

    fn set_value(&mut self, name: &str, value: &str) {
        if let Some(control) = self.named(name) {
            set_property(&control, "value", &JsValue::from_str(value));
        }
    }

    fn option_values(&self, name: &str) -> Vec<String> {
        self.named(name)
            .map(|control| {
                options(&control)
                    .iter()
                    .map(|(node, _)| property(node, "value").as_string().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_option(&mut self, name: &str, index: usize, on: bool) {
        let Some(control) = self.named(name) else {
            return;
        };
        if let Some((node, toggle)) = options(&control).get(index) {
            set_property(node, toggle, &JsValue::from_bool(on));
        }
    }

    fn entries(&self) -> Vec<(String, String)> {
        let Ok(data) = FormData::new_with_form(&self.element) else {
            return Vec::new();
        };
        let data = JsValue::from(data);
        let Ok(Some(iter)) = js_sys::try_iter(&data) else {
            return Vec::new();
        };
        // File inputs yield blobs; only text entries are kept.
        iter.filter_map(Result::ok)
            .filter_map(|entry| {
                let pair = Array::from(&entry);
                Some((pair.get(0).as_string()?, pair.get(1).as_string()?))
            })
            .collect()
    }
}

/// Every form of the document, in document order.
pub struct DomForms {
    forms: Vec<DomForm>,
}

impl DomForms {
    #[must_use]
    pub fn of(document: &Document) -> Self {
        let collection = document.forms();
        let forms = (0..collection.length())
            .filter_map(|i| collection.item(i))
            .filter_map(|element| element.dyn_into::<HtmlFormElement>().ok())
            .map(DomForm::new)
            .collect();
        Self { forms }
    }
}

impl FormHost for DomForms {
    fn form_count(&self) -> usize {
        self.forms.len()
    }

    fn form_mut(&mut self, index: usize) -> Option<&mut dyn FormTarget> {
        self.forms
            .get_mut(index)
            .map(|form| form as &mut dyn FormTarget)
    }
}
