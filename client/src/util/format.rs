//! Display formatting for card and modal fields.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use catalog::dates;

/// Placeholder for a missing value.
pub const NOT_SET: &str = "Not set";

/// Trimmed text, or [`NOT_SET`] when blank or absent.
#[must_use]
pub fn text_or_placeholder(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(NOT_SET)
        .to_owned()
}

/// `"62.1234, 15.5678"`, or `None` if either coordinate is missing.
#[must_use]
pub fn coordinates(lat: Option<f64>, lon: Option<f64>) -> Option<String> {
    match (lat, lon) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => Some(format!("{lat:.4}, {lon:.4}")),
        _ => None,
    }
}

/// `"12.5 m"`; whole numbers drop the decimal.
#[must_use]
pub fn meters(value: Option<f64>) -> Option<String> {
    let v = value.filter(|v| v.is_finite())?;
    if v.fract() == 0.0 { Some(format!("{v:.0} m")) } else { Some(format!("{v:.1} m")) }
}

/// `"45°"` style angle.
#[must_use]
pub fn degrees(value: Option<f64>) -> Option<String> {
    let v = value.filter(|v| v.is_finite())?;
    if v.fract() == 0.0 { Some(format!("{v:.0}°")) } else { Some(format!("{v:.1}°")) }
}

/// Human-readable byte size using binary units.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 { format!("{bytes} B") } else { format!("{value:.1} {}", UNITS[unit]) }
}

/// `"1 ROI"` / `"3 ROIs"`; zero and missing both read `"No ROIs"`.
#[must_use]
pub fn roi_count(count: Option<u32>) -> String {
    match count.unwrap_or(0) {
        0 => "No ROIs".to_owned(),
        1 => "1 ROI".to_owned(),
        n => format!("{n} ROIs"),
    }
}

/// Start and end dates joined with an arrow; open ends read "TBD".
#[must_use]
pub fn date_range(start: Option<&str>, end: Option<&str>) -> String {
    let show = |raw: Option<&str>| {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or_else(|| "TBD".to_owned(), dates::display_date)
    };
    match (start, end) {
        (None, None) => NOT_SET.to_owned(),
        _ => format!("{} → {}", show(start), show(end)),
    }
}

/// Date portion of an ISO value for display, or [`NOT_SET`].
#[must_use]
pub fn date(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map_or_else(|| NOT_SET.to_owned(), dates::display_date)
}

/// Quality score as a whole percentage.
#[must_use]
pub fn quality(score: Option<f64>) -> Option<String> {
    score.filter(|s| s.is_finite()).map(|s| format!("{s:.0}%"))
}
