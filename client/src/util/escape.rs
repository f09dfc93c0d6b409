//! HTML escaping for the few strings built outside `view!`.
//!
//! Leaflet popups, tooltips and div icons take raw HTML, so every value that
//! reaches them passes through [`html`] first.

#[cfg(test)]
#[path = "escape_test.rs"]
mod escape_test;

/// Escape text for use in element content or a quoted attribute.
#[must_use]
pub fn html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Only `#rgb`/`#rrggbb` colors pass; anything else becomes `fallback`.
#[must_use]
pub fn css_color<'a>(raw: &'a str, fallback: &'a str) -> &'a str {
    let valid = raw
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()));
    if valid { raw } else { fallback }
}
