use chrono::{DateTime, Local, Utc};

/// Returns true when `value` is a non-empty run of ASCII digits
pub fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Inserts a comma between every group of three digits, counting from the right
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Renders a raw rank value for display.
///
/// Purely numeric values get thousands grouping (leading zeros are dropped, as
/// a numeric rank has none); anything else, such as `"Solved: 137"`, is
/// returned unchanged.
pub fn format_rank(raw: &str) -> String {
    if !is_numeric(raw) {
        return raw.to_string();
    }
    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() {
        return "0".to_string();
    }
    group_thousands(trimmed)
}

/// Parses an artifact timestamp.
/// RFC 3339 is tried first; anything else goes through `dateparser`, with
/// zone-less values read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    dateparser::parse_with_timezone(raw, &Utc).ok()
}

/// Converts an artifact timestamp to the local timezone for display.
/// Unparseable input is returned as-is.
pub fn format_timestamp_to_local(timestamp_str: &str) -> String {
    match parse_timestamp(timestamp_str) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %Z").to_string(),
        None => timestamp_str.to_string(),
    }
}
