//! Diagnostic info table.
//!
//! The device reports its status as an object of sections, each mapping a
//! label to a value:
//!
//! ```json
//! {"openHASP": {"Version": "0.7.0"}, "Wifi": {"SSID": "home", "RSSI": -61}}
//! ```

use serde_json::Value;

use crate::value::display_string;

/// Container receiving the rendered table.
pub const INFO_CONTAINER: &str = "info";

/// Where the device serves its status report.
pub const DEFAULT_INFO_URI: &str = "/api/info/";

/// Render the sections as an HTML table.
///
/// Each section gets a spacer row and a header row, then one
/// `label: value` row per entry. Text is HTML-escaped. A section that is not
/// an object renders as an empty section; a non-object document renders an
/// empty table.
#[must_use]
pub fn render_info_table(sections: &Value) -> String {
    let mut html = String::from("<table>");
    if let Value::Object(sections) = sections {
        for (title, entries) in sections {
            html.push_str(&format!(
                "<tr><td colspan=2></td></tr><tr><th colspan=2>{}</th></tr>",
                escape_html(title)
            ));
            let Value::Object(entries) = entries else {
                continue;
            };
            for (label, value) in entries {
                html.push_str(&format!(
                    "<tr><td>{}: </td><td>{}</td></tr>",
                    escape_html(label),
                    escape_html(&display_string(value))
                ));
            }
        }
    }
    html.push_str("</table>");
    html
}

/// Escape the characters that would otherwise be read as markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
