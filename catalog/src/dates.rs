//! ISO date/datetime parsing for ordering checks and sorting.
//!
//! The API and `<input type="date|datetime-local">` both emit ISO-8601
//! strings with varying precision. Everything is normalized to a
//! `PrimitiveDateTime`; offsets are dropped because the catalog stores local
//! station time.

#[cfg(test)]
#[path = "dates_test.rs"]
mod dates_test;

use time::macros::format_description;
use time::{Date, PrimitiveDateTime, Time};

use crate::CatalogError;

/// Parse a date or datetime string into a comparable timestamp.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidDate`] when the input does not match any of
/// `YYYY-MM-DD`, `YYYY-MM-DD[T ]HH:MM` or `YYYY-MM-DD[T ]HH:MM:SS` (with an
/// optional fraction, `Z` or `±HH:MM` suffix).
pub fn parse_timestamp(raw: &str) -> Result<PrimitiveDateTime, CatalogError> {
    let invalid = || CatalogError::InvalidDate(raw.to_owned());
    let trimmed = raw.trim();
    if trimmed.len() < 10 || !trimmed.is_char_boundary(10) {
        return Err(invalid());
    }

    let (date_part, rest) = trimmed.split_at(10);
    let date = Date::parse(date_part, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())?;
    if rest.is_empty() {
        return Ok(PrimitiveDateTime::new(date, Time::MIDNIGHT));
    }

    let rest = rest.strip_prefix(['T', ' ']).ok_or_else(invalid)?;
    let clock = strip_zone_suffix(rest);
    let clock = clock.split('.').next().unwrap_or(clock);
    let time = match clock.len() {
        5 => Time::parse(clock, format_description!("[hour]:[minute]")),
        8 => Time::parse(clock, format_description!("[hour]:[minute]:[second]")),
        _ => return Err(invalid()),
    }
    .map_err(|_| invalid())?;
    Ok(PrimitiveDateTime::new(date, time))
}

/// Parse an optional, possibly blank date string.
///
/// Blank input is `Ok(None)`; malformed input is an error.
///
/// # Errors
///
/// Propagates [`parse_timestamp`] failures for non-blank input.
pub fn parse_optional(raw: Option<&str>) -> Result<Option<PrimitiveDateTime>, CatalogError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_timestamp(value).map(Some),
    }
}

/// Format the date portion of an ISO string as `YYYY-MM-DD` for display.
///
/// Unparseable input is returned unchanged so the user still sees it.
#[must_use]
pub fn display_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Ok(ts) => ts
            .date()
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|_| raw.to_owned()),
        Err(_) => raw.to_owned(),
    }
}

/// Format an ISO string as `YYYY-MM-DD HH:MM` for display.
#[must_use]
pub fn display_datetime(raw: &str) -> String {
    match parse_timestamp(raw) {
        Ok(ts) => ts
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]"))
            .unwrap_or_else(|_| raw.to_owned()),
        Err(_) => raw.to_owned(),
    }
}

/// Value suitable for an `<input type="datetime-local">` (`YYYY-MM-DDTHH:MM`).
#[must_use]
pub fn to_datetime_local(raw: &str) -> String {
    match parse_timestamp(raw) {
        Ok(ts) => ts
            .format(format_description!("[year]-[month]-[day]T[hour]:[minute]"))
            .unwrap_or_default(),
        Err(_) => String::new(),
    }
}

fn strip_zone_suffix(clock: &str) -> &str {
    if let Some(stripped) = clock.strip_suffix('Z') {
        return stripped;
    }
    // `+HH:MM` / `-HH:MM` offsets start after the `HH:MM[:SS]` clock.
    match clock.char_indices().skip(5).find(|(_, c)| *c == '+' || *c == '-') {
        Some((idx, _)) => &clock[..idx],
        None => clock,
    }
}
