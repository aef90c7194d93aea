//! Output formatting for fetched documents.
//!
//! JSON bodies are pretty-printed; everything else is treated as HTML and
//! rendered to readable text.

pub mod html;

pub use html::render_html;

/// Whether a `Content-Type` value names a JSON media type.
pub fn is_json(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}

/// Format a fetched body for the terminal.
///
/// JSON that fails to parse is returned unchanged rather than rendered.
pub fn format(content_type: &str, body: &str) -> String {
    if is_json(content_type) {
        return match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string()),
            Err(e) => {
                tracing::debug!("body is not valid JSON, printing as-is: {e}");
                body.to_string()
            }
        };
    }

    render_html(body)
}
