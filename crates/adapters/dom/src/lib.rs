//! # panelweb-adapter-dom
//!
//! Runs the panelweb services inside the device's configuration pages.
//! Compiled to wasm and loaded by the pages in place of their control
//! script; the exported names match the handlers the page markup calls.
//!
//! | Export | Markup usage |
//! |--------|--------------|
//! | `ref(action)` | `onclick="return ref('next')"` |
//! | `upd(action)` | `onclick="return upd('')"` |
//! | `aref(seconds)` | `onload="aref(5)" onerror="aref(15)"` |
//! | `imageLoaded(ok)` | re-arm with the configured intervals |
//! | `about(lovyangfx)` | about page |
//! | `info(uri)` | info page |
//! | `filler(method, uri)` / `filler2(method, uri)` | configuration pages |
//! | `handleSubmit(event)` | `onsubmit` |
//!
//! ## Dependency rule
//! Depends on `panelweb-app` (port traits, services) and `panelweb-domain`.

mod error;
mod form;
mod page;
mod runtime;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use panelweb_app::ports::Method;
use panelweb_app::services::{
    AboutService, ConfigBinder, FormScope, InfoService, LiveViewService, SubmitService,
};
use panelweb_domain::about::{AboutLayout, AboutPanel, LICENSE_CONTAINER};
use panelweb_domain::error::PanelError;
use panelweb_domain::info::DEFAULT_INFO_URI;
use panelweb_domain::live_view::PageAction;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlFormElement;

pub use error::DomError;
pub use form::{DomForm, DomForms};
pub use page::DomPage;
pub use runtime::{ConsoleTransport, GlooHttp, GlooTimer, JsClock};

use runtime::log_error;

type LiveView = LiveViewService<GlooHttp, JsClock, GlooTimer, DomPage>;

thread_local! {
    static LIVE_VIEW: RefCell<Option<Rc<LiveView>>> = const { RefCell::new(None) };
}

/// The page's live view, created on first use so timestamps keep
/// increasing across handler calls.
fn live_view() -> Result<Rc<LiveView>, PanelError> {
    LIVE_VIEW.with(|cell| {
        if let Some(service) = cell.borrow().as_ref() {
            return Ok(Rc::clone(service));
        }
        let service = Rc::new(LiveViewService::new(
            GlooHttp,
            JsClock,
            GlooTimer,
            DomPage::current()?,
        ));
        *cell.borrow_mut() = Some(Rc::clone(&service));
        Ok(service)
    })
}

fn page_action(action: Option<String>) -> PageAction {
    action
        .and_then(|text| text.parse().ok())
        .unwrap_or_default()
}

fn seconds(value: f64) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or_default()
}

/// Run `task` once the window has finished loading.
fn on_load<F>(task: F)
where
    F: FnOnce() + 'static,
{
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(task);
    if let Err(err) = window.add_event_listener_with_callback("load", callback.unchecked_ref()) {
        log_error("on_load", &DomError::from(err).into_domain());
    }
}

/// Probe the screenshot, then swap the image. Always `false`.
#[wasm_bindgen(js_name = "ref")]
pub fn refresh(action: Option<String>) -> bool {
    let action = page_action(action);
    spawn_local(async move {
        let result = match live_view() {
            Ok(service) => service.refresh(action).await.map(drop),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            log_error("ref", &err);
        }
    });
    false
}

/// Point the image at a fresh screenshot. Always `false`.
#[wasm_bindgen(js_name = "upd")]
pub fn update_image(action: Option<String>) -> bool {
    let result = live_view().and_then(|service| service.update_image(page_action(action)));
    if let Err(err) = result {
        log_error("upd", &err);
    }
    false
}

/// Refresh after `delay` seconds.
#[wasm_bindgen(js_name = "aref")]
pub fn request_refresh(delay: f64) {
    spawn_local(async move {
        let result = match live_view() {
            Ok(service) => service
                .request_refresh(seconds(delay), PageAction::Refresh)
                .await
                .map(drop),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            log_error("aref", &err);
        }
    });
}

/// Re-arm the live image after it loaded or failed to load.
#[wasm_bindgen(js_name = "imageLoaded")]
pub fn image_loaded(loaded: bool) {
    spawn_local(async move {
        let result = match live_view() {
            Ok(service) => service.rearm(loaded).await.map(drop),
            Err(err) => Err(err),
        };
        if let Err(err) = result {
            log_error("imageLoaded", &err);
        }
    });
}

/// Inject the about panel; the layout follows the containers on the page.
#[wasm_bindgen]
pub fn about(lovyangfx: Option<bool>) {
    let result = DomPage::current()
        .map_err(DomError::into_domain)
        .and_then(|page| {
            let layout = if page.has_element(LICENSE_CONTAINER) {
                AboutLayout::Split
            } else {
                AboutLayout::Single
            };
            let panel = AboutPanel::new(layout, lovyangfx.unwrap_or(false));
            AboutService::new(page, panel).show()
        });
    if let Err(err) = result {
        log_error("about", &err);
    }
}

/// Load the status report into the `info` table once the page has loaded.
#[wasm_bindgen]
pub fn info(uri: Option<String>) {
    let uri = uri.unwrap_or_else(|| DEFAULT_INFO_URI.to_string());
    on_load(move || {
        spawn_local(async move {
            let result = match DomPage::current() {
                Ok(page) => InfoService::new(GlooHttp, page).load(&uri).await.map(drop),
                Err(err) => Err(err.into_domain()),
            };
            if let Err(err) = result {
                log_error("info", &err);
            }
        });
    });
}

async fn fill_forms(method: String, uri: String) {
    let result = async {
        let method: Method = method.parse()?;
        let mut forms = DomPage::current()?.forms();
        ConfigBinder::new(GlooHttp)
            .load(method, &uri, &mut forms, FormScope::All)
            .await
            .map(drop)
    }
    .await;
    if let Err(err) = result {
        log_error("filler", &err);
    }
}

/// Populate every form from `uri` once the page has loaded.
#[wasm_bindgen]
pub fn filler(method: String, uri: String) {
    on_load(move || spawn_local(fill_forms(method, uri)));
}

/// Populate every form from `uri` right away.
#[wasm_bindgen(js_name = "filler2")]
pub fn filler_now(method: String, uri: String) {
    spawn_local(fill_forms(method, uri));
}

/// Intercept a form submission and log the flattened form.
#[wasm_bindgen(js_name = "handleSubmit")]
pub fn handle_submit(event: web_sys::Event) {
    event.prevent_default();
    let Some(form) = event
        .target()
        .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
    else {
        return;
    };
    spawn_local(async move {
        let service = SubmitService::new(ConsoleTransport);
        if let Err(err) = service.submit(&DomForm::new(form)).await {
            log_error("handleSubmit", &err);
        }
    });
}
