use axum::{
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "web/dist"]
struct WebAssets;

/// Serve the embedded single-page UI
pub async fn serve_static(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // Try exact path first
    if let Some(content) = <WebAssets as Embed>::get(path) {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data.into_owned(),
        )
            .into_response();
    }

    // Serve index.html for any unmatched route
    if let Some(content) = <WebAssets as Embed>::get("index.html") {
        return Html(String::from_utf8_lossy(&content.data).to_string()).into_response();
    }

    // Fallback: bare-bones form if no asset is embedded
    Html(FALLBACK_HTML.to_string()).into_response()
}

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>spamsift</title>
</head>
<body>
    <h1>spamsift</h1>
    <p>Paste an email text and submit it for classification.</p>
    <textarea id="text" rows="10" cols="80" placeholder="Paste your email here"></textarea>
    <br>
    <button id="analyze">Analyze</button>
    <pre id="result"></pre>
    <script>
        document.getElementById('analyze').addEventListener('click', async () => {
            const text = document.getElementById('text').value;
            const response = await fetch('/api/classify', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ text })
            });
            const body = await response.json();
            document.getElementById('result').textContent = JSON.stringify(body, null, 2);
        });
    </script>
</body>
</html>"#;
