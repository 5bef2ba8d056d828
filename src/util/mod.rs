use chrono::{DateTime, Days, Local, NaiveDate, NaiveDateTime};

const DATE_FMT: &str = "%Y-%m-%d";
/// Timestamps without an offset, as some backends serialize `DATETIME` columns.
const LOCAL_DATETIME_FMTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub(crate) fn today_local() -> String {
    // Browser local timezone via chrono's `wasmbind` clock.
    Local::now().date_naive().format(DATE_FMT).to_string()
}

/// `date` shifted by `days` calendar days, as `YYYY-MM-DD`.
///
/// Returns `None` when `date` is not a calendar date or the result overflows.
pub(crate) fn add_days(date: &str, days: i64) -> Option<String> {
    let d = NaiveDate::parse_from_str(date.trim(), DATE_FMT).ok()?;
    let shifted = if days >= 0 {
        d.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        d.checked_sub_days(Days::new(days.unsigned_abs()))
    }?;
    Some(shifted.format(DATE_FMT).to_string())
}

/// Normalize a backend date for display.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (shown in the browser's zone) and
/// offset-less timestamps, which are taken as local time already. Unparseable
/// input renders as empty.
pub(crate) fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, DATE_FMT) {
        return d.format(DATE_FMT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt
            .with_timezone(&Local)
            .date_naive()
            .format(DATE_FMT)
            .to_string();
    }
    LOCAL_DATETIME_FMTS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date().format(DATE_FMT).to_string())
        .unwrap_or_default()
}

/// Resolve an uploaded image path against the API host.
///
/// Images are served from the host root, not from under `/api`.
pub(crate) fn asset_url(api_base: &str, path: &str) -> String {
    format!("{}{}", api_base.replacen("/api", "", 1), path)
}
