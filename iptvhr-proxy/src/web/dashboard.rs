//! Status page served at `/`.

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::web::state::WebState;

/// Serve the status page.
pub async fn index(State(web_state): State<Arc<WebState>>) -> Html<String> {
    let descriptor = web_state.views.device_descriptor();
    let channel_count = web_state.views.channel_count();

    Html(
        HTML_TEMPLATE
            .replace("{friendly_name}", &escape_html(&descriptor.friendly_name))
            .replace("{base_url}", &escape_html(&descriptor.base_url))
            .replace("{channel_count}", &channel_count.to_string()),
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{friendly_name}</title>
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; margin: 40px; background: #f0f0f0; }
        .container { background: white; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        h1 { color: #333; }
        .url { background: #f8f9fa; padding: 10px; border-radius: 5px; font-family: monospace; }
    </style>
</head>
<body>
    <div class="container">
        <h1>{friendly_name}</h1>
        <p><strong>Tuner URL:</strong></p>
        <div class="url">{base_url}</div>
        <p>Add this URL as a network tuner in your media server.</p>
        <p><strong>Channels:</strong> <span id="channel-count">{channel_count}</span></p>
        <p><strong>Endpoints:</strong></p>
        <ul>
            <li><a href="/discover.json">/discover.json</a> - Device discovery</li>
            <li><a href="/lineup.json">/lineup.json</a> - Channel lineup</li>
            <li><a href="/lineup_status.json">/lineup_status.json</a> - Lineup status</li>
        </ul>
    </div>
</body>
</html>
"#;
