use percent_encoding::percent_decode;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Format a modification time for display, empty when unknown
pub fn last_modified_text(modified: Option<OffsetDateTime>) -> String {
    modified
        .and_then(|dt| dt.format(&Rfc3339).ok())
        .map(|s| format!("Last modified: {}", s))
        .unwrap_or_default()
}

/// Decode one `application/x-www-form-urlencoded` component to raw bytes
pub fn decode_form_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw.iter().map(|&b| if b == b'+' { b' ' } else { b }).collect();
    percent_decode(&spaced).collect()
}

/// First value of `key` in a urlencoded string, decoded to bytes
pub fn form_field(encoded: &[u8], key: &str) -> Option<Vec<u8>> {
    encoded
        .split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(i) => (&pair[..i], &pair[i + 1..]),
                None => (pair, &pair[pair.len()..]),
            };
            (decode_form_component(name) == key.as_bytes()).then(|| decode_form_component(value))
        })
}
