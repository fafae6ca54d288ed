//! One function per subcommand, each wiring adapters into a service.
//!
//! A [`VirtualPage`] stands in for the browser page so the services run
//! unchanged; whatever they write into it is what the command reports.

use std::path::Path;

use anyhow::Context;
use panelweb_adapter_http_reqwest::{ReqwestHttpClient, ReqwestSubmitTransport};
use panelweb_adapter_virtual::{SystemClock, TokioTimer, VirtualPage};
use panelweb_app::ports::Method;
use panelweb_app::services::{
    AboutService, ConfigBinder, FormScope, InfoService, LiveViewService, RefreshOutcome,
    SubmitService,
};
use panelweb_domain::about::{
    AboutPanel, DOCUMENT_CONTAINER, LICENSE_CONTAINER, PACKAGES_CONTAINER,
};
use panelweb_domain::info::INFO_CONTAINER;
use panelweb_domain::live_view::{IMAGE_ELEMENT_ID, PageAction, SCREENSHOT_PATH};
use panelweb_domain::populate::PopulateReport;
use panelweb_domain::submission::Submission;
use panelweb_domain::time::Millis;

use crate::config::Config;

/// Path of the configuration endpoint for `section` (`wifi`, `mqtt`, ...).
#[must_use]
pub fn section_uri(section: &str) -> String {
    format!("/api/config/{section}/")
}

/// HTTP client for the configured device.
///
/// # Errors
///
/// Fails if the configured base address is not an absolute URL.
pub fn connect(config: &Config) -> anyhow::Result<ReqwestHttpClient> {
    ReqwestHttpClient::new(&config.device.base_url, config.timeout())
        .with_context(|| format!("cannot connect to {}", config.device.base_url))
}

/// A screenshot fetched after a successful probe.
#[derive(Debug)]
pub struct Screenshot {
    /// Cache-busting timestamp of the image request.
    pub ts: Millis,
    pub bitmap: Vec<u8>,
}

fn live_view<'p>(
    config: &Config,
    http: ReqwestHttpClient,
    page: &'p VirtualPage,
) -> LiveViewService<ReqwestHttpClient, SystemClock, TokioTimer, &'p VirtualPage> {
    LiveViewService::new(http, SystemClock, TokioTimer, page)
        .with_policy(config.retry_policy())
        .with_auto_refresh(config.auto_refresh())
}

fn screenshot_page() -> VirtualPage {
    VirtualPage::default().with_elements([IMAGE_ELEMENT_ID])
}

/// Fetch the bitmap the image element currently points at.
async fn fetch_image(http: &ReqwestHttpClient, page: &VirtualPage) -> anyhow::Result<Vec<u8>> {
    let src = page
        .image_src(IMAGE_ELEMENT_ID)
        .context("image source was never set")?;
    // Image sources are relative to the screenshot page.
    let url = http.resolve(SCREENSHOT_PATH)?.join(&src)?;
    Ok(http.download(url.as_str()).await?)
}

/// Apply `action`, wait for the device to answer, then download the screen.
///
/// # Errors
///
/// Fails if every probe failed or the bitmap cannot be downloaded.
pub async fn screenshot(config: &Config, action: PageAction) -> anyhow::Result<Screenshot> {
    let http = connect(config)?;
    let page = screenshot_page();
    let service = live_view(config, http.clone(), &page);

    let RefreshOutcome::Updated { ts } = service.refresh(action).await? else {
        anyhow::bail!("{} did not answer the screenshot probe", http.base());
    };
    let bitmap = fetch_image(&http, &page).await?;
    Ok(Screenshot { ts, bitmap })
}

/// Keep the screenshot live for `frames` images, handing each to `on_frame`.
///
/// After every image the refresh re-arms with the configured after-load or
/// after-error delay. Stops early once a refresh gives up. Returns the number
/// of frames delivered.
///
/// # Errors
///
/// Fails if the image element cannot be updated or `on_frame` fails.
pub async fn watch<F>(
    config: &Config,
    action: PageAction,
    frames: usize,
    mut on_frame: F,
) -> anyhow::Result<usize>
where
    F: FnMut(&Screenshot) -> anyhow::Result<()>,
{
    let http = connect(config)?;
    let page = screenshot_page();
    let service = live_view(config, http.clone(), &page);

    let mut delivered = 0;
    let mut outcome = service.refresh(action).await?;
    while delivered < frames {
        let RefreshOutcome::Updated { ts } = outcome else {
            tracing::warn!(delivered, "device stopped answering");
            break;
        };
        let loaded = match fetch_image(&http, &page).await {
            Ok(bitmap) => {
                on_frame(&Screenshot { ts, bitmap })?;
                delivered += 1;
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "screenshot did not load");
                false
            }
        };
        if delivered == frames {
            break;
        }
        outcome = service.rearm(loaded).await?;
    }
    Ok(delivered)
}

/// Fetch the status report and render it as the info table.
///
/// # Errors
///
/// Fails if the request fails or the body is not JSON.
pub async fn info(config: &Config, uri: &str) -> anyhow::Result<String> {
    let page = VirtualPage::default().with_elements([INFO_CONTAINER]);
    let html = InfoService::new(connect(config)?, &page).load(uri).await?;
    Ok(html)
}

/// Render the about panel, returning the markup per container.
///
/// # Errors
///
/// Fails only if the page rejects a container.
pub fn about(panel: AboutPanel) -> anyhow::Result<Vec<(&'static str, String)>> {
    let page = VirtualPage::default();
    AboutService::new(&page, panel).show()?;
    Ok([LICENSE_CONTAINER, PACKAGES_CONTAINER, DOCUMENT_CONTAINER]
        .into_iter()
        .filter_map(|container| page.inner_html(container).map(|html| (container, html)))
        .collect())
}

/// Load the page described at `page_path` and populate its forms from `uri`.
///
/// # Errors
///
/// Fails if the page description cannot be loaded, the request fails, or
/// the payload cannot be bound.
pub async fn fill(
    config: &Config,
    page_path: &Path,
    method: Method,
    uri: &str,
    scope: FormScope,
) -> anyhow::Result<(VirtualPage, Vec<PopulateReport>)> {
    let mut page = VirtualPage::load(page_path)
        .with_context(|| format!("cannot load page {}", page_path.display()))?;
    let reports = ConfigBinder::new(connect(config)?)
        .load(method, uri, &mut page, scope)
        .await?;
    Ok((page, reports))
}

/// Flatten form `form_index` of the page at `page_path` and submit it.
///
/// With a `uri` the submission is posted to the device, otherwise it is
/// only logged.
///
/// # Errors
///
/// Fails if the page cannot be loaded, has no such form, or the device
/// rejects the submission.
pub async fn submit(
    config: &Config,
    page_path: &Path,
    form_index: usize,
    uri: Option<&str>,
) -> anyhow::Result<Submission> {
    let page = VirtualPage::load(page_path)
        .with_context(|| format!("cannot load page {}", page_path.display()))?;
    let form = page
        .form(form_index)
        .with_context(|| format!("page has no form #{form_index}"))?;
    let submission = match uri {
        Some(uri) => {
            let transport = ReqwestSubmitTransport::new(connect(config)?, uri);
            SubmitService::new(transport).submit(form).await?
        }
        None => SubmitService::default().submit(form).await?,
    };
    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelweb_domain::about::AboutLayout;

    #[test]
    fn should_build_section_uri() {
        assert_eq!(section_uri("mqtt"), "/api/config/mqtt/");
    }

    #[test]
    fn should_render_split_about_into_two_containers() {
        let blocks = about(AboutPanel::new(AboutLayout::Split, false)).unwrap();
        let containers: Vec<&str> = blocks.iter().map(|(c, _)| *c).collect();
        assert_eq!(containers, vec![LICENSE_CONTAINER, PACKAGES_CONTAINER]);
        assert!(blocks[1].1.contains("TFT_eSPI"));
    }

    #[test]
    fn should_render_single_about_into_document() {
        let blocks = about(AboutPanel::new(AboutLayout::Single, true)).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].0, DOCUMENT_CONTAINER);
        assert!(blocks[0].1.contains("LovyanGFX"));
    }

    #[test]
    fn should_refuse_relative_device_address() {
        let mut config = Config::default();
        config.device.base_url = "plate01".to_string();
        assert!(connect(&config).is_err());
    }
}
