//! Cell value normalization
//!
//! Spreadsheet cells arrive as text. Nothing here fails: a value that cannot
//! be understood becomes `None` (dates) or zero (amounts).

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::Money;

/// Serial 60 is 1900-02-29, a day that never existed
const PHANTOM_LEAP_DAY: i64 = 60;

/// Convert an Excel (1900 system) serial day number to a date
///
/// Fractional parts (time of day) are ignored. Serials below 1 and the
/// phantom leap day yield `None`.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let days = serial.trunc() as i64;
    let base = match days {
        d if d < 1 => return None,
        PHANTOM_LEAP_DAY => return None,
        d if d < PHANTOM_LEAP_DAY => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        _ => NaiveDate::from_ymd_opt(1899, 12, 30)?,
    };
    base.checked_add_signed(Duration::try_days(days)?)
}

/// Parse a date cell: Excel serial, `dd/mm/yyyy` or ISO `yyyy-mm-dd`
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(serial) = s.parse::<f64>() {
        return excel_serial_to_date(serial);
    }

    let parts: Vec<&str> = s.split('/').collect();
    if parts.len() == 3 {
        let day = parts[0].trim().parse().ok()?;
        let month = parts[1].trim().parse().ok()?;
        let year = parts[2].trim().parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parse a currency cell; empty or unreadable cells are zero
pub fn parse_currency(raw: &str) -> Money {
    let s = raw.trim();
    if s.is_empty() {
        return Money::zero();
    }
    match Money::parse(s) {
        Ok(amount) => amount,
        Err(e) => {
            tracing::debug!(value = s, error = %e, "unreadable amount, using zero");
            Money::zero()
        }
    }
}

/// Parse a day-of-month cell such as a card's closing day; 0 when unreadable
pub fn parse_day(raw: &str) -> u32 {
    let s = raw.trim();
    s.parse::<u32>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().filter(|d| *d >= 0.0).map(|d| d as u32))
        .unwrap_or(0)
}

/// Empty text becomes `None`
pub fn optional_text(raw: &str) -> Option<String> {
    let s = raw.trim();
    (!s.is_empty()).then(|| s.to_string())
}
