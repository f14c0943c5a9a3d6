use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Escapes text for HTML element content. Apostrophes pass through.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes text for XML content and attribute values, apostrophes included.
pub fn escape_xml(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
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

/// Formats a stored `criadoEm` value as `dd/mm/yyyy, HH:MM:SS` in `tz`.
pub fn format_local<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt
            .with_timezone(tz)
            .format("%d/%m/%Y, %H:%M:%S")
            .to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

/// `YYYYMMDD_HHMM`, used in export filenames.
pub fn date_stamp<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    dt.format("%Y%m%d_%H%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn html_and_xml_escaping_differ_on_apostrophe() {
        let raw = r#"<script>&'""#;
        assert_eq!(escape_html(raw), "&lt;script&gt;&amp;'&quot;");
        assert_eq!(escape_xml(raw), "&lt;script&gt;&amp;&#39;&quot;");
    }

    #[test]
    fn ampersand_is_escaped_once() {
        assert_eq!(escape_html("a &amp; b"), "a &amp;amp; b");
        assert_eq!(escape_xml("Tom & Jerry"), "Tom &amp; Jerry");
    }

    #[test]
    fn format_local_converts_zone() {
        let raw = "2025-10-18T12:05:09.000Z";
        assert_eq!(format_local(raw, &Utc), "18/10/2025, 12:05:09");
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        assert_eq!(format_local(raw, &brt), "18/10/2025, 09:05:09");
    }

    #[test]
    fn format_local_rejects_garbage() {
        assert_eq!(format_local("ontem", &Utc), "Invalid Date");
        assert_eq!(format_local("", &Utc), "Invalid Date");
    }

    #[test]
    fn date_stamp_is_zero_padded() {
        let dt = Utc.with_ymd_and_hms(2026, 3, 7, 4, 9, 59).unwrap();
        assert_eq!(date_stamp(&dt), "20260307_0409");
    }
}
