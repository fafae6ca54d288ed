//! End-to-end tests for the panelctl commands.
//!
//! Each test binds a fake panel (axum) on an ephemeral local port and runs
//! a command against it with real adapters and services.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use panelctl::commands;
use panelctl::config::Config;
use panelweb_app::ports::Method;
use panelweb_app::services::FormScope;
use panelweb_domain::live_view::PageAction;
use serde_json::{Value, json};

const BITMAP: &[u8] = b"BM\x36\x00\x00\x00";

#[derive(Default)]
struct Panel {
    /// Probes to answer with `503` before the panel is ready.
    busy_probes: AtomicUsize,
    probe_actions: Mutex<Vec<String>>,
    image_requests: AtomicUsize,
    submissions: Mutex<Vec<Value>>,
}

async fn screenshot(
    State(panel): State<Arc<Panel>>,
    Query(params): Query<Vec<(String, String)>>,
) -> (StatusCode, Vec<u8>) {
    if params.iter().any(|(k, _)| k == "q") {
        panel.image_requests.fetch_add(1, Ordering::SeqCst);
        return (StatusCode::OK, BITMAP.to_vec());
    }
    let action = params
        .iter()
        .find(|(k, _)| k == "a")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    panel.probe_actions.lock().unwrap().push(action);
    let busy = panel
        .busy_probes
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok();
    if busy {
        (StatusCode::SERVICE_UNAVAILABLE, Vec::new())
    } else {
        (StatusCode::OK, b"<img id=\"bmp\">".to_vec())
    }
}

async fn config(Path(section): Path<String>) -> (StatusCode, String) {
    match section.as_str() {
        "mqtt" => (
            StatusCode::OK,
            json!({"name": "plate01", "mqtt": {"host": "broker", "port": 1883}}).to_string(),
        ),
        _ => (StatusCode::BAD_REQUEST, "Bad Request".to_string()),
    }
}

async fn info() -> Json<Value> {
    Json(json!({
        "openHASP": {"Version": "0.7.0", "Uptime": "42s"},
        "Wifi": {"SSID": "home & garden"}
    }))
}

async fn submit(State(panel): State<Arc<Panel>>, Json(body): Json<Value>) -> StatusCode {
    panel.submissions.lock().unwrap().push(body);
    StatusCode::OK
}

async fn spawn_panel(busy_probes: usize) -> (SocketAddr, Arc<Panel>) {
    let panel = Arc::new(Panel {
        busy_probes: AtomicUsize::new(busy_probes),
        ..Panel::default()
    });
    let app = Router::new()
        .route("/screenshot", get(screenshot))
        .route("/api/info/", get(info))
        .route("/api/config/{section}/", get(config))
        .route("/api/config/submit/", post(submit))
        .with_state(panel.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, panel)
}

fn config_for(addr: SocketAddr) -> Config {
    let mut config = Config::default();
    config.device.base_url = format!("http://{addr}/");
    config.device.timeout_secs = 5;
    config.live_view.retry_delay_ms = 10;
    config.live_view.after_load_secs = 0;
    config.live_view.after_error_secs = 0;
    config
}

fn page_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("panelctl-{}-{name}.toml", std::process::id()));
    std::fs::write(&path, content).unwrap();
    path
}

const MQTT_PAGE: &str = r#"
    [[form]]
    [[form.field]]
    name = "name"
    type = "text"

    [[form.field]]
    name = "mqtt[host]"
    type = "text"

    [[form.field]]
    name = "mqtt[port]"
    type = "text"
"#;

#[tokio::test]
async fn should_save_screenshot_once_panel_answers() {
    let (addr, panel) = spawn_panel(0).await;

    let shot = commands::screenshot(&config_for(addr), PageAction::Next)
        .await
        .unwrap();

    assert_eq!(shot.bitmap, BITMAP);
    assert_eq!(*panel.probe_actions.lock().unwrap(), vec!["next"]);
    assert_eq!(panel.image_requests.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn should_retry_busy_panel_without_repeating_navigation() {
    let (addr, panel) = spawn_panel(1).await;

    let shot = commands::screenshot(&config_for(addr), PageAction::Prev)
        .await
        .unwrap();

    assert_eq!(shot.bitmap, BITMAP);
    assert_eq!(*panel.probe_actions.lock().unwrap(), vec!["prev", ""]);
}

#[tokio::test]
async fn should_give_up_when_panel_stays_busy() {
    let (addr, panel) = spawn_panel(5).await;

    let err = commands::screenshot(&config_for(addr), PageAction::Refresh)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("did not answer"));
    assert_eq!(panel.probe_actions.lock().unwrap().len(), 2);
    assert_eq!(panel.image_requests.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn should_keep_screenshot_live_for_requested_frames() {
    let (addr, panel) = spawn_panel(0).await;
    let mut stamps = Vec::new();

    let delivered = commands::watch(&config_for(addr), PageAction::Refresh, 3, |shot| {
        stamps.push(shot.ts);
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(delivered, 3);
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(panel.probe_actions.lock().unwrap().len(), 3);
    assert_eq!(panel.image_requests.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn should_render_info_table_with_escaped_values() {
    let (addr, _) = spawn_panel(0).await;

    let html = commands::info(&config_for(addr), "/api/info/")
        .await
        .unwrap();

    assert!(html.starts_with("<table>"));
    assert!(html.contains("<tr><th colspan=2>openHASP</th></tr>"));
    assert!(html.contains("<tr><td>Version: </td><td>0.7.0</td></tr>"));
    assert!(html.contains("home &amp; garden"));
}

#[tokio::test]
async fn should_fill_page_from_section() {
    let (addr, _) = spawn_panel(0).await;
    let path = page_file("fill", MQTT_PAGE);

    let (page, reports) = commands::fill(
        &config_for(addr),
        &path,
        Method::Get,
        &commands::section_uri("mqtt"),
        FormScope::All,
    )
    .await
    .unwrap();
    std::fs::remove_file(&path).unwrap();

    let form = page.form(0).unwrap();
    assert_eq!(form.value("name"), Some("plate01"));
    assert_eq!(form.value("mqtt[host]"), Some("broker"));
    assert_eq!(form.value("mqtt[port]"), Some("1883"));
    assert_eq!(reports.len(), 1);
    assert!(page.to_toml().unwrap().contains("broker"));
}

#[tokio::test]
async fn should_fail_fill_on_unknown_section() {
    let (addr, _) = spawn_panel(0).await;
    let path = page_file("unknown", MQTT_PAGE);

    let result = commands::fill(
        &config_for(addr),
        &path,
        Method::Get,
        &commands::section_uri("nope"),
        FormScope::All,
    )
    .await;
    std::fs::remove_file(&path).unwrap();

    assert!(result.is_err());
}

#[tokio::test]
async fn should_post_flattened_form_to_panel() {
    let (addr, panel) = spawn_panel(0).await;
    let path = page_file(
        "submit",
        r#"
        [[form]]
        [[form.field]]
        name = "mqtt[host]"
        type = "text"
        value = "broker"
        "#,
    );

    let submission = commands::submit(&config_for(addr), &path, 0, Some("/api/config/submit/"))
        .await
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(submission.get("mqtt[host]"), Some("broker"));
    assert_eq!(
        *panel.submissions.lock().unwrap(),
        vec![json!({"mqtt[host]": "broker"})]
    );
}

#[tokio::test]
async fn should_only_log_submission_without_uri() {
    let path = page_file("log", MQTT_PAGE);

    let submission = commands::submit(&Config::default(), &path, 0, None)
        .await
        .unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(submission.len(), 3);
    assert_eq!(submission.get("name"), Some(""));
}

#[tokio::test]
async fn should_fail_submit_for_missing_form() {
    let path = page_file("missing", MQTT_PAGE);

    let err = commands::submit(&Config::default(), &path, 4, None)
        .await
        .unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert!(err.to_string().contains("no form #4"));
}
