//! strftime-like rendering of modification times.
//!
//! Only a fixed set of conversions is understood and every one of them
//! renders to a fixed number of bytes, which is what lets
//! [`time_format_len`] size the date column without formatting anything.
//! Any other character after `%` is emitted on its own, dropping the `%`.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, Local, NaiveDateTime, TimeDelta, TimeZone, Timelike, Utc};

const SHORT_WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const LONG_WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const LONG_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Width of the %A and %B fields, long enough for "Wednesday" and "September".
const LONG_NAME_WIDTH: usize = 9;

/// Output width of a known conversion specifier.
fn specifier_width(spec: char) -> Option<usize> {
    let width = match spec {
        'a' | 'b' => 3,
        'A' | 'B' => LONG_NAME_WIDTH,
        'd' | 'e' | 'H' | 'I' | 'k' | 'l' | 'm' | 'M' | 'p' | 'P' | 'S' | 'y' => 2,
        'F' => 10,
        'r' => 11,
        'R' => 5,
        'T' => 8,
        'u' | 'w' => 1,
        'Y' => 4,
        _ => return None,
    };
    Some(width)
}

/// Number of bytes [`write_time`] produces for `format`, for any timestamp.
pub fn time_format_len(format: &str) -> usize {
    let mut len = 0;
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            len += c.len_utf8();
            continue;
        }
        len += match chars.next() {
            Some(spec) => specifier_width(spec).unwrap_or(spec.len_utf8()),
            None => 1,
        };
    }
    len
}

/// Appends `time` rendered through `format` to `dst`.
pub fn write_time(dst: &mut Vec<u8>, format: &str, time: &NaiveDateTime) {
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            push_char(dst, c);
            continue;
        }
        match chars.next() {
            Some(spec) => {
                if !write_specifier(dst, spec, time) {
                    push_char(dst, spec);
                }
            }
            None => dst.push(b'%'),
        }
    }
}

/// Renders `time` through `format` into a new string.
pub fn format_time(format: &str, time: &NaiveDateTime) -> String {
    let mut buf = Vec::with_capacity(time_format_len(format));
    write_time(&mut buf, format, time);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Breaks a modification time down into calendar fields, either in UTC or in
/// the local time zone.
pub fn calendar_time(mtime: &DateTime<Utc>, localtime: bool) -> NaiveDateTime {
    let utc = mtime.naive_utc();
    if !localtime {
        return utc;
    }
    let offset = Local.offset_from_utc_datetime(&utc).local_minus_utc();
    utc.checked_add_signed(TimeDelta::seconds(i64::from(offset)))
        .unwrap_or(utc)
}

/// First second of year 0.
pub const EARLIEST_MTIME: i64 = -62_167_219_200;
/// Last second of year 9999.
pub const LATEST_MTIME: i64 = 253_402_300_799;

/// Converts a filesystem timestamp, pinning it to years 0 through 9999.
///
/// Filesystems store timestamps far outside what a calendar date can show.
/// Those are moved to the nearest bound, with the sub-second part dropped.
pub fn utc_from_system_time(time: SystemTime) -> DateTime<Utc> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).unwrap_or(i64::MAX);
            (secs, after.subsec_nanos())
        }
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            match before.subsec_nanos() {
                0 => (-secs, 0),
                nanos => (-secs - 1, 1_000_000_000 - nanos),
            }
        }
    };

    let clamped = secs.clamp(EARLIEST_MTIME, LATEST_MTIME);
    let nanos = if clamped == secs { nanos } else { 0 };
    DateTime::from_timestamp(clamped, nanos).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

fn write_specifier(dst: &mut Vec<u8>, spec: char, t: &NaiveDateTime) -> bool {
    // Monday-based index: %u counts 1..7 and %w counts 0..6 from Monday.
    let weekday = t.weekday().num_days_from_monday();
    let month = t.month0() as usize;
    let year = t.year().clamp(0, 9999) as u32;

    match spec {
        'a' => push_name(dst, SHORT_WEEKDAYS[weekday as usize], 3),
        'A' => push_name(dst, LONG_WEEKDAYS[weekday as usize], LONG_NAME_WIDTH),
        'b' => push_name(dst, SHORT_MONTHS[month], 3),
        'B' => push_name(dst, LONG_MONTHS[month], LONG_NAME_WIDTH),
        'd' => push_num(dst, t.day(), 2, b'0'),
        'e' => push_num(dst, t.day(), 2, b' '),
        'F' => {
            push_num(dst, year, 4, b'0');
            dst.push(b'-');
            push_num(dst, t.month(), 2, b'0');
            dst.push(b'-');
            push_num(dst, t.day(), 2, b'0');
        }
        'H' => push_num(dst, t.hour(), 2, b'0'),
        'I' => push_num(dst, hour12(t), 2, b'0'),
        'k' => push_num(dst, t.hour(), 2, b' '),
        'l' => push_num(dst, hour12(t), 2, b' '),
        'm' => push_num(dst, t.month(), 2, b'0'),
        'M' => push_num(dst, t.minute(), 2, b'0'),
        'p' => dst.extend_from_slice(if t.hour() < 12 { b"AM" } else { b"PM" }),
        'P' => dst.extend_from_slice(if t.hour() < 12 { b"am" } else { b"pm" }),
        'r' => {
            push_num(dst, hour12(t), 2, b'0');
            dst.push(b':');
            push_num(dst, t.minute(), 2, b'0');
            dst.push(b':');
            push_num(dst, t.second(), 2, b'0');
            dst.push(b' ');
            dst.extend_from_slice(if t.hour() < 12 { b"AM" } else { b"PM" });
        }
        'R' => {
            push_num(dst, t.hour(), 2, b'0');
            dst.push(b':');
            push_num(dst, t.minute(), 2, b'0');
        }
        'S' => push_num(dst, t.second(), 2, b'0'),
        'T' => {
            push_num(dst, t.hour(), 2, b'0');
            dst.push(b':');
            push_num(dst, t.minute(), 2, b'0');
            dst.push(b':');
            push_num(dst, t.second(), 2, b'0');
        }
        'u' => push_num(dst, weekday + 1, 1, b'0'),
        // NOTE: counts from Monday, unlike POSIX. Existing listings and
        // scripts depend on it.
        'w' => push_num(dst, weekday, 1, b'0'),
        'y' => push_num(dst, year % 100, 2, b'0'),
        'Y' => push_num(dst, year, 4, b'0'),
        _ => return false,
    }
    true
}

fn hour12(t: &NaiveDateTime) -> u32 {
    match t.hour() % 12 {
        0 => 12,
        h => h,
    }
}

fn push_char(dst: &mut Vec<u8>, c: char) {
    let mut utf8 = [0; 4];
    dst.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
}

fn push_name(dst: &mut Vec<u8>, name: &str, width: usize) {
    dst.extend_from_slice(name.as_bytes());
    dst.extend(std::iter::repeat_n(b' ', width.saturating_sub(name.len())));
}

/// Writes `value` in exactly `width` digits, filling on the left.
/// Callers keep `value` below `10^width`.
fn push_num(dst: &mut Vec<u8>, value: u32, width: usize, fill: u8) {
    let mut digits = [fill; 10];
    let mut n = value;
    for slot in digits[..width].iter_mut().rev() {
        *slot = b'0' + (n % 10) as u8;
        n /= 10;
        if n == 0 {
            break;
        }
    }
    dst.extend_from_slice(&digits[..width]);
}
