//! Parsing of human time expressions for `--since`, `--until` and `--present`.
//!
//! Accepted forms, each of which must consume the whole input:
//!
//! ```text
//! 20240131235959          YYYYMMDDHHMMSS
//! 2024-01-31 23:59:59     YYYY-MM-DD HH:MM:SS
//! 2024-01-31 23:59        YYYY-MM-DD HH:MM
//! 2024-01-31              YYYY-MM-DD (midnight)
//! 23:59:59 / 23:59        time of day on the current date
//! now today yesterday tomorrow
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::TimeSpecError;

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M"];

/// Parse `input` into microseconds since the epoch.
///
/// Wall-clock forms are interpreted in the time zone of `now`, and
/// time-only forms and keywords are anchored to `now`'s date.
pub fn parse_time_spec<Tz: TimeZone>(
    input: &str,
    now: &DateTime<Tz>,
) -> Result<u64, TimeSpecError> {
    let invalid = || TimeSpecError::Invalid(input.to_string());

    if input == "now" {
        return u64::try_from(now.timestamp_micros()).map_err(|_| invalid());
    }

    let naive = parse_local(input, now.naive_local()).ok_or_else(invalid)?;
    let instant = now
        .timezone()
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(invalid)?;

    u64::try_from(instant.timestamp_micros()).map_err(|_| invalid())
}

fn parse_local(input: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    if let Some(packed) = parse_packed(input) {
        return Some(packed);
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(datetime);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, DATE_FORMAT) {
        return date.and_hms_opt(0, 0, 0);
    }

    for fmt in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(input, fmt) {
            return Some(now.date().and_time(time));
        }
    }

    let today = now.date();
    let day = match input {
        "today" => today,
        "yesterday" => today.pred_opt()?,
        "tomorrow" => today.succ_opt()?,
        _ => return None,
    };
    day.and_hms_opt(0, 0, 0)
}

/// `YYYYMMDDHHMMSS`, exactly fourteen digits.
fn parse_packed(input: &str) -> Option<NaiveDateTime> {
    if input.len() != 14 || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let field = |from: usize, to: usize| input[from..to].parse::<u32>().ok();

    let year = input[0..4].parse::<i32>().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(4, 6)?, field(6, 8)?)?;
    let time = NaiveTime::from_hms_opt(field(8, 10)?, field(10, 12)?, field(12, 14)?)?;
    Some(date.and_time(time))
}
