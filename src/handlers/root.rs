use crate::app_state::AppState;
use crate::handlers::shared_types::timestamp;
use axum::{extract::State, response::Html};

/// Version that switches on the "new feature" banner.
const FEATURE_VERSION: &str = "v2.0.0";

const STYLE: &str = r#"
        body {
            font-family: 'Segoe UI', Arial, sans-serif;
            margin: 0;
            padding: 20px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            min-height: 100vh;
        }
        .container {
            max-width: 800px;
            margin: 0 auto;
            text-align: center;
            background: rgba(255,255,255,0.1);
            padding: 30px;
            border-radius: 15px;
        }
        h1 { font-size: 2.5em; margin-bottom: 30px; }
        .version {
            background: #ff6b6b;
            padding: 10px 20px;
            border-radius: 25px;
            display: inline-block;
            margin: 20px 0;
            font-weight: bold;
            font-size: 1.2em;
        }
        .info-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 20px;
            margin: 30px 0;
        }
        .info-card { background: rgba(255,255,255,0.2); padding: 20px; border-radius: 10px; }
        .domain {
            background: #4ecdc4;
            padding: 10px;
            border-radius: 10px;
            margin: 20px 0;
            font-family: monospace;
        }
        .feature-new { background: #4ecdc4; padding: 15px; border-radius: 10px; margin: 20px 0; }
        .rendered-at { margin-top: 30px; font-style: italic; opacity: 0.8; }
        a { color: #4ecdc4; }
"#;

/// Browser-side beacon posting a few display facts to `/analytics`.
const BEACON: &str = r#"
        fetch('/analytics', {
            method: 'POST',
            headers: { 'Content-Type': 'application/json' },
            body: JSON.stringify({
                userAgent: navigator.userAgent,
                timestamp: new Date().toISOString(),
                screen: { width: screen.width, height: screen.height }
            })
        }).catch(() => {});
"#;

/// Landing page (GET /).
pub async fn root_handler(State(state): State<AppState>) -> Html<String> {
    // ---
    let runtime = state.runtime();
    let version = escape_html(&runtime.version);
    let hostname = escape_html(&runtime.hostname);
    let domain = escape_html(state.deploy_domain());
    let build = runtime.build_version;
    let platform = runtime.platform;
    let uptime = runtime.uptime().floor() as u64;
    let rendered_at = timestamp();

    let feature = if runtime.version == FEATURE_VERSION {
        r#"<div class="feature-new">NEW FEATURE: Enhanced monitoring and better performance!</div>"#
    } else {
        ""
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Enterprise Demo Application</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="container">
        <h1>Enterprise Demo Application</h1>
        <div class="domain">Running on: {domain}</div>
        <div class="version">Version: {version}</div>

        <div class="info-grid">
            <div class="info-card"><strong>Pod Hostname</strong><br>{hostname}</div>
            <div class="info-card"><strong>Server Build</strong><br>{build}</div>
            <div class="info-card"><strong>Platform</strong><br>{platform}</div>
            <div class="info-card"><strong>Uptime</strong><br>{uptime} seconds</div>
        </div>

        {feature}

        <div class="rendered-at">Deployed at: {rendered_at}</div>

        <div style="margin-top: 30px;">
            <p><a href="/metrics">View Metrics</a></p>
            <p><a href="/health">Health Check</a></p>
            <p><a href="/load-test">Load Test</a></p>
        </div>
    </div>
    <script>{BEACON}</script>
</body>
</html>
"#
    ))
}

fn escape_html(raw: &str) -> String {
    // ---
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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
