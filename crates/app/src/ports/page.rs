//! Page ports: the parts of the document the services write to.

use panelweb_domain::error::PanelError;
use panelweb_domain::form::{FormModel, FormTarget};

/// Elements of the page addressed by id.
pub trait PageView {
    /// Point the image element `element_id` at `src`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Page`] if the element is missing or not an image.
    fn set_image_src(&self, element_id: &str, src: &str) -> Result<(), PanelError>;

    /// Replace the markup inside the element `container`.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Page`] if the element is missing.
    fn set_inner_html(&self, container: &str, html: &str) -> Result<(), PanelError>;
}

/// The forms of a page, in document order.
pub trait FormHost {
    fn form_count(&self) -> usize;

    fn form_mut(&mut self, index: usize) -> Option<&mut dyn FormTarget>;
}

impl FormHost for Vec<FormModel> {
    fn form_count(&self) -> usize {
        self.len()
    }

    fn form_mut(&mut self, index: usize) -> Option<&mut dyn FormTarget> {
        self.get_mut(index).map(|form| form as &mut dyn FormTarget)
    }
}

impl<T: PageView + ?Sized> PageView for &T {
    fn set_image_src(&self, element_id: &str, src: &str) -> Result<(), PanelError> {
        (**self).set_image_src(element_id, src)
    }

    fn set_inner_html(&self, container: &str, html: &str) -> Result<(), PanelError> {
        (**self).set_inner_html(container, html)
    }
}
