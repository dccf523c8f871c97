//! Civil date/time conversion between zones for the site's
//! `"5 MARCH 2025"` + `"19:00"` format.

use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;
use thiserror::Error;
use tracing::debug;

use crate::zone::SourceZone;

pub const MONTHS: [&str; 12] = [
    "JANUARY", "FEBRUARY", "MARCH", "APRIL", "MAY", "JUNE",
    "JULY", "AUGUST", "SEPTEMBER", "OCTOBER", "NOVEMBER", "DECEMBER",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("date {0:?} is not `<day> <MONTH> <year>`")]
    DateShape(String),
    #[error("unknown month {0:?}")]
    UnknownMonth(String),
    #[error("date {0:?} does not exist")]
    NoSuchDate(String),
    #[error("time {0:?} is not `<hour>[:<minute>]`")]
    TimeShape(String),
}

pub fn parse_match_date(text: &str) -> Result<NaiveDate, ConvertError> {
    let shape = || ConvertError::DateShape(text.to_string());

    let parts: Vec<&str> = text.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(shape());
    };
    let day: u32 = day.parse().map_err(|_| shape())?;
    let year: i32 = year.parse().map_err(|_| shape())?;
    if !(1..=9999).contains(&year) {
        return Err(ConvertError::NoSuchDate(text.to_string()));
    }
    let month_name = month.to_uppercase();
    let month0 = MONTHS
        .iter()
        .position(|m| *m == month_name)
        .ok_or_else(|| ConvertError::UnknownMonth(month.to_string()))?;
    let month = month0 as u32 + 1;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ConvertError::NoSuchDate(text.to_string()))
}

/// `"19:00"`, `"19"` (minute 0). Anything after a second colon is ignored.
pub fn parse_match_time(text: &str) -> Result<NaiveTime, ConvertError> {
    let shape = || ConvertError::TimeShape(text.to_string());

    let mut parts = text.trim().split(':');
    let hour: u32 = parts
        .next()
        .ok_or_else(shape)?
        .trim()
        .parse()
        .map_err(|_| shape())?;
    let minute: u32 = match parts.next() {
        Some(m) => m.trim().parse().map_err(|_| shape())?,
        None => 0,
    };

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(shape)
}

pub fn format_match_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
}

pub fn format_match_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Places a civil time in `zone`. Fall-back overlaps take the earlier instant;
/// times inside a spring-forward gap use the offset from before the gap.
fn resolve_civil<Z: TimeZone>(zone: &Z, civil: &NaiveDateTime) -> Option<NaiveDateTime> {
    match zone.from_local_datetime(civil) {
        LocalResult::Single(dt) => Some(dt.naive_utc()),
        LocalResult::Ambiguous(earlier, _) => Some(earlier.naive_utc()),
        LocalResult::None => {
            let before = civil.checked_sub_signed(Duration::hours(24))?;
            let offset = match zone.from_local_datetime(&before) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.offset().fix(),
                LocalResult::None => return None,
            };
            civil.checked_sub_signed(Duration::seconds(offset.local_minus_utc() as i64))
        }
    }
}

/// Converts `date_text`/`time_text` from `source` into `target`.
pub fn try_convert_in<Z: TimeZone>(
    date_text: &str,
    time_text: &str,
    source: &Z,
    target: &Tz,
) -> Result<(String, String), ConvertError> {
    let date = parse_match_date(date_text)?;
    let time = parse_match_time(time_text)?;
    let civil = date.and_time(time);

    let Some(utc) = resolve_civil(source, &civil) else {
        return Err(ConvertError::NoSuchDate(date_text.to_string()));
    };
    let converted: DateTime<Tz> = target.from_utc_datetime(&utc);

    Ok((format_match_date(converted.date_naive()), format_match_time(converted.time())))
}

pub fn try_convert(
    date_text: &str,
    time_text: &str,
    source: &SourceZone,
    target: &Tz,
) -> Result<(String, String), ConvertError> {
    match source {
        SourceZone::Local => try_convert_in(date_text, time_text, &Local, target),
        SourceZone::Named(tz) => try_convert_in(date_text, time_text, tz, target),
        SourceZone::Fixed(offset) => try_convert_in(date_text, time_text, offset, target),
    }
}

/// Like [`try_convert`], but hands the input back untouched when it can't be parsed.
pub fn convert(date_text: &str, time_text: &str, source: &SourceZone, target: &Tz) -> (String, String) {
    match try_convert(date_text, time_text, source, target) {
        Ok(converted) => converted,
        Err(e) => {
            debug!("Keeping {:?} {:?} as scraped: {}", date_text, time_text, e);
            (date_text.to_string(), time_text.to_string())
        }
    }
}
