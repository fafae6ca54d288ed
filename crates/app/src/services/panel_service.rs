//! About and info panels: render markup and inject it into the page.

use panelweb_domain::about::AboutPanel;
use panelweb_domain::error::PanelError;
use panelweb_domain::info::{INFO_CONTAINER, render_info_table};
use serde_json::Value;

use crate::ports::{HttpClient, Method, PageView};

/// Injects the about panel.
pub struct AboutService<P> {
    page: P,
    panel: AboutPanel,
}

impl<P: PageView> AboutService<P> {
    pub fn new(page: P, panel: AboutPanel) -> Self {
        Self { page, panel }
    }

    /// Write every block of the panel into its container.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Page`] if a container is missing.
    #[tracing::instrument(skip(self), fields(layout = ?self.panel.layout))]
    pub fn show(&self) -> Result<(), PanelError> {
        for block in self.panel.render() {
            self.page.set_inner_html(block.container, &block.html)?;
        }
        Ok(())
    }
}

/// Loads the device status report into the info table.
pub struct InfoService<H, P> {
    http: H,
    page: P,
}

impl<H: HttpClient, P: PageView> InfoService<H, P> {
    pub fn new(http: H, page: P) -> Self {
        Self { http, page }
    }

    /// GET `uri`, render the sections and inject the table; returns the markup.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Transport`] if the request fails,
    /// [`PanelError::Payload`] if the body is not JSON, or
    /// [`PanelError::Page`] if the `info` container is missing.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, uri: &str) -> Result<String, PanelError> {
        let response = self.http.send(Method::Get, uri).await?;
        if !response.ok() {
            tracing::warn!(status = response.status, "info request not ok");
        }
        let sections: Value = serde_json::from_str(&response.body)?;
        let html = render_info_table(&sections);
        self.page.set_inner_html(INFO_CONTAINER, &html)?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{PageWrite, RecordingPage, ScriptedHttp};
    use panelweb_domain::about::AboutLayout;
    use panelweb_domain::info::DEFAULT_INFO_URI;

    #[test]
    fn should_fill_lic_and_pkg_in_split_layout() {
        let svc = AboutService::new(RecordingPage::default(), AboutPanel::default());

        svc.show().unwrap();

        let writes = svc.page.writes.lock().unwrap();
        let containers: Vec<&str> = writes
            .iter()
            .map(|w| match w {
                PageWrite::InnerHtml { container, .. } => container.as_str(),
                PageWrite::ImageSrc { element, .. } => element.as_str(),
            })
            .collect();
        assert_eq!(containers, vec!["lic", "pkg"]);
    }

    #[test]
    fn should_fill_doc_in_single_layout() {
        let svc = AboutService::new(
            RecordingPage::default(),
            AboutPanel::new(AboutLayout::Single, false),
        );

        svc.show().unwrap();

        let html = svc.page.html_of("doc").unwrap();
        assert!(html.contains("<h3>TFT_eSPI</h3>"));
    }

    #[test]
    fn should_show_identical_markup_twice() {
        let svc = AboutService::new(RecordingPage::default(), AboutPanel::default());
        svc.show().unwrap();
        let first = svc.page.html_of("lic").unwrap();
        svc.show().unwrap();
        assert_eq!(svc.page.html_of("lic").unwrap(), first);
    }

    #[tokio::test]
    async fn should_render_info_into_container() {
        let http = ScriptedHttp::default().reply(200, r#"{"Wifi":{"SSID":"home"}}"#);
        let svc = InfoService::new(http, RecordingPage::default());

        let html = svc.load(DEFAULT_INFO_URI).await.unwrap();

        assert_eq!(svc.page.html_of("info"), Some(html.clone()));
        assert!(html.contains("<tr><td>SSID: </td><td>home</td></tr>"));
        assert_eq!(svc.http.uris(), vec!["/api/info/"]);
    }

    #[tokio::test]
    async fn should_leave_info_untouched_on_bad_payload() {
        let http = ScriptedHttp::default().reply(404, "Not found");
        let svc = InfoService::new(http, RecordingPage::default());

        let err = svc.load(DEFAULT_INFO_URI).await.unwrap_err();

        assert!(matches!(err, PanelError::Payload(_)));
        assert!(svc.page.html_of("info").is_none());
    }
}
