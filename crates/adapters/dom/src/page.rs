//! `PageView` over the live document.

use panelweb_app::ports::PageView;
use panelweb_domain::error::PanelError;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement};

use crate::error::DomError;
use crate::form::DomForms;

/// The document of the current window.
#[derive(Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    /// # Errors
    ///
    /// Returns [`DomError::NoDocument`] outside a browser window.
    pub fn current() -> Result<Self, DomError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(DomError::NoDocument)?;
        Ok(Self { document })
    }

    #[must_use]
    pub fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    #[must_use]
    pub fn forms(&self) -> DomForms {
        DomForms::of(&self.document)
    }

    fn element(&self, id: &str) -> Result<Element, DomError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| DomError::MissingElement(id.to_string()))
    }
}

impl PageView for DomPage {
    fn set_image_src(&self, element_id: &str, src: &str) -> Result<(), PanelError> {
        let image = self
            .element(element_id)?
            .dyn_into::<HtmlImageElement>()
            .map_err(|_| DomError::WrongElement {
                id: element_id.to_string(),
                expected: "an image",
            })?;
        image.set_src(src);
        Ok(())
    }

    fn set_inner_html(&self, container: &str, html: &str) -> Result<(), PanelError> {
        self.element(container)?.set_inner_html(html);
        Ok(())
    }
}
