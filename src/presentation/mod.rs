//! Result presentation - the HTML page and per-image downloads

pub mod page;

pub use page::render_page;

/// File name offered when saving the image at 1-based `ordinal`
pub fn download_filename(ordinal: usize) -> String {
    format!("affiliate-image-{}.jpeg", ordinal)
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
