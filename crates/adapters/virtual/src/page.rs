//! A page held in memory.
//!
//! Described in TOML: an optional list of element ids, then the forms in
//! document order.
//!
//! ```toml
//! elements = ["bmp", "lic", "pkg", "info"]
//!
//! [[form]]
//! [[form.field]]
//! name = "ssid"
//! type = "text"
//! ```
//!
//! When `elements` is empty every id is accepted.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use panelweb_app::ports::{FormHost, PageView};
use panelweb_domain::error::PanelError;
use panelweb_domain::form::{FormModel, FormTarget};
use serde::{Deserialize, Serialize};

use crate::error::VirtualError;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Description {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    elements: Vec<String>,
    #[serde(default, rename = "form")]
    forms: Vec<FormModel>,
}

#[derive(Debug, Default)]
struct Writes {
    images: BTreeMap<String, String>,
    html: BTreeMap<String, String>,
}

/// Forms plus a record of what the services wrote into the page.
#[derive(Debug, Default)]
pub struct VirtualPage {
    elements: Vec<String>,
    forms: Vec<FormModel>,
    writes: Mutex<Writes>,
}

impl VirtualPage {
    /// A page with the given forms that accepts every element id.
    #[must_use]
    pub fn new(forms: Vec<FormModel>) -> Self {
        Self {
            forms,
            ..Self::default()
        }
    }

    /// Restrict the page to the given element ids.
    #[must_use]
    pub fn with_elements<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a page description.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualError::Parse`] for malformed TOML or
    /// [`VirtualError::Domain`] if a form has a nameless control.
    pub fn from_toml(text: &str) -> Result<Self, VirtualError> {
        let description: Description = toml::from_str(text)?;
        for form in &description.forms {
            form.validate().map_err(VirtualError::Domain)?;
        }
        Ok(Self {
            elements: description.elements,
            forms: description.forms,
            writes: Mutex::default(),
        })
    }

    /// Read a page description from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualError::Io`] if the file cannot be read, otherwise
    /// see [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, VirtualError> {
        let text = std::fs::read_to_string(path)?;
        let page = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), forms = page.forms.len(), "page loaded");
        Ok(page)
    }

    /// The page description with the current form state.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualError::Serialize`] if the forms cannot be written as TOML.
    pub fn to_toml(&self) -> Result<String, VirtualError> {
        let description = Description {
            elements: self.elements.clone(),
            forms: self.forms.clone(),
        };
        Ok(toml::to_string(&description)?)
    }

    #[must_use]
    pub fn forms(&self) -> &[FormModel] {
        &self.forms
    }

    #[must_use]
    pub fn form(&self, index: usize) -> Option<&FormModel> {
        self.forms.get(index)
    }

    /// Last source written to the image `element_id`.
    #[must_use]
    pub fn image_src(&self, element_id: &str) -> Option<String> {
        self.lock().images.get(element_id).cloned()
    }

    /// Last markup written into `container`.
    #[must_use]
    pub fn inner_html(&self, container: &str) -> Option<String> {
        self.lock().html.get(container).cloned()
    }

    fn check_element(&self, id: &str) -> Result<(), VirtualError> {
        if self.elements.is_empty() || self.elements.iter().any(|e| e == id) {
            Ok(())
        } else {
            Err(VirtualError::MissingElement(id.to_string()))
        }
    }

    fn lock(&self) -> MutexGuard<'_, Writes> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormHost for VirtualPage {
    fn form_count(&self) -> usize {
        self.forms.len()
    }

    fn form_mut(&mut self, index: usize) -> Option<&mut dyn FormTarget> {
        self.forms
            .get_mut(index)
            .map(|form| form as &mut dyn FormTarget)
    }
}

impl PageView for VirtualPage {
    fn set_image_src(&self, element_id: &str, src: &str) -> Result<(), PanelError> {
        self.check_element(element_id)?;
        self.lock()
            .images
            .insert(element_id.to_string(), src.to_string());
        Ok(())
    }

    fn set_inner_html(&self, container: &str, html: &str) -> Result<(), PanelError> {
        self.check_element(container)?;
        self.lock()
            .html
            .insert(container.to_string(), html.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelweb_domain::form::Control;
    use panelweb_domain::populate::populate;
    use serde_json::json;

    const PAGE: &str = r#"
        elements = ["bmp", "info"]

        [[form]]
        [[form.field]]
        name = "ssid"
        type = "text"

        [[form.field]]
        name = "dns[]"
        type = "checkbox"
        options = [{ value = "1" }, { value = "2" }]

        [[form]]
        [[form.field]]
        name = "since"
        type = "date"
    "#;

    #[test]
    fn should_load_forms_in_document_order() {
        let page = VirtualPage::from_toml(PAGE).unwrap();
        assert_eq!(page.form_count(), 2);
        assert_eq!(page.form(0).unwrap().value("ssid"), Some(""));
        assert_eq!(page.form(1).unwrap().value("since"), Some(""));
    }

    #[test]
    fn should_reject_nameless_control() {
        let err = VirtualPage::from_toml(
            r#"
            [[form]]
            [[form.field]]
            name = ""
            type = "text"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, VirtualError::Domain(_)));
    }

    #[test]
    fn should_reject_malformed_description() {
        let err = VirtualPage::from_toml("[[form]\n").unwrap_err();
        assert!(matches!(err, VirtualError::Parse(_)));
    }

    #[test]
    fn should_record_writes_to_declared_elements() {
        let page = VirtualPage::from_toml(PAGE).unwrap();

        page.set_image_src("bmp", "?a=&q=1").unwrap();
        page.set_inner_html("info", "<table></table>").unwrap();

        assert_eq!(page.image_src("bmp").as_deref(), Some("?a=&q=1"));
        assert_eq!(page.inner_html("info").as_deref(), Some("<table></table>"));
    }

    #[test]
    fn should_fail_on_undeclared_element() {
        let page = VirtualPage::from_toml(PAGE).unwrap();

        let err = page.set_inner_html("lic", "x").unwrap_err();

        assert!(matches!(err, PanelError::Page(_)));
        assert!(page.inner_html("lic").is_none());
    }

    #[test]
    fn should_accept_any_element_when_none_declared() {
        let page = VirtualPage::new(Vec::new());
        page.set_inner_html("doc", "<p>hi</p>").unwrap();
        assert_eq!(page.inner_html("doc").as_deref(), Some("<p>hi</p>"));
    }

    #[test]
    fn should_restrict_elements_when_asked() {
        let page = VirtualPage::new(Vec::new()).with_elements(["doc"]);
        assert!(page.set_inner_html("lic", "x").is_err());
        assert!(page.set_inner_html("doc", "x").is_ok());
    }

    #[test]
    fn should_write_populated_state_back_to_toml() {
        let mut page = VirtualPage::from_toml(PAGE).unwrap();
        let data = json!({"ssid": "home", "dns": [2]});
        let form = page.form_mut(0).unwrap();
        populate(form, data.as_object().unwrap()).unwrap();

        let reloaded = VirtualPage::from_toml(&page.to_toml().unwrap()).unwrap();

        let form = reloaded.form(0).unwrap();
        assert_eq!(form.value("ssid"), Some("home"));
        assert_eq!(form.checked("dns[]"), vec!["2"]);
    }

    #[test]
    fn should_read_page_from_file() {
        let path = std::env::temp_dir().join(format!("panelweb-page-{}.toml", std::process::id()));
        std::fs::write(&path, PAGE).unwrap();

        let page = VirtualPage::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(page.forms().len(), 2);
    }

    #[test]
    fn should_fail_on_missing_file() {
        let err = VirtualPage::load(Path::new("/nonexistent/panelweb.toml")).unwrap_err();
        assert!(matches!(err, VirtualError::Io(_)));
    }

    #[test]
    fn should_build_from_models() {
        let page = VirtualPage::new(vec![FormModel::new().with("ssid", Control::text("x"))]);
        assert_eq!(page.form(0).unwrap().value("ssid"), Some("x"));
    }
}
