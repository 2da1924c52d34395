//! UTC calendar date/time with sub-second precision.
//!
//! Provides `UtcTime`, the calendar-facing representation of an instant.
//! Conversions to and from Unix seconds ignore leap seconds, as Unix
//! time itself does.

use std::str::FromStr;

use crate::error::TimeError;
use crate::julian::SECONDS_PER_DAY;

const MICROS_PER_MINUTE: i64 = 60_000_000;

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check every calendar field against its valid range.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidCalendar(format!(
                "month {} not in 1..=12",
                self.month
            )));
        }
        let dim = days_in_month(self.year, self.month);
        if self.day == 0 || self.day > dim {
            return Err(TimeError::InvalidCalendar(format!(
                "day {} not in 1..={dim}",
                self.day
            )));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidCalendar(format!(
                "hour {} not in 0..=23",
                self.hour
            )));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidCalendar(format!(
                "minute {} not in 0..=59",
                self.minute
            )));
        }
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(TimeError::InvalidCalendar(format!(
                "second {} not in [0, 60)",
                self.second
            )));
        }
        Ok(())
    }

    /// Seconds since 1970-01-01T00:00:00Z.
    pub fn to_unix_seconds(&self) -> Result<f64, TimeError> {
        self.validate()?;
        let days = days_from_civil(self.year, self.month, self.day);
        let whole = days * 86_400
            + i64::from(self.hour) * 3600
            + i64::from(self.minute) * 60;
        Ok(whole as f64 + self.second)
    }

    /// Calendar form of a Unix timestamp.
    ///
    /// The caller is responsible for passing a finite timestamp; use
    /// [`crate::Epoch`] to get a validated one.
    pub fn from_unix_seconds(unix_seconds: f64) -> Self {
        let days = (unix_seconds / SECONDS_PER_DAY).floor();
        let mut secs_of_day = unix_seconds - days * SECONDS_PER_DAY;
        // Guard against rounding up to a full day.
        if secs_of_day >= SECONDS_PER_DAY {
            secs_of_day = SECONDS_PER_DAY - f64::EPSILON * SECONDS_PER_DAY;
        }
        let (year, month, day) = civil_from_days(days as i64);
        let hour = (secs_of_day / 3600.0).floor() as u32;
        let minute = ((secs_of_day % 3600.0) / 60.0).floor() as u32;
        let second = secs_of_day % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DDThh:mm:ss[.fff]Z`. The trailing `Z` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('Z').unwrap_or(s);
        let (date, time) = s
            .split_once('T')
            .ok_or_else(|| TimeError::Parse(format!("missing 'T' separator in {s:?}")))?;

        // Leading '-' belongs to a negative year, not a separator.
        let (sign, date_body) = match date.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, date),
        };
        let mut date_parts = date_body.splitn(3, '-');
        let year: i32 = parse_field(date_parts.next(), "year")?;
        let month: u32 = parse_field(date_parts.next(), "month")?;
        let day: u32 = parse_field(date_parts.next(), "day")?;

        let mut time_parts = time.splitn(3, ':');
        let hour: u32 = parse_field(time_parts.next(), "hour")?;
        let minute: u32 = parse_field(time_parts.next(), "minute")?;
        let second: f64 = parse_field(time_parts.next(), "second")?;

        let utc = Self::new(sign * year, month, day, hour, minute, second);
        utc.validate()?;
        Ok(utc)
    }
}

fn parse_field<T: FromStr>(field: Option<&str>, name: &str) -> Result<T, TimeError> {
    let raw = field.ok_or_else(|| TimeError::Parse(format!("missing {name}")))?;
    raw.parse()
        .map_err(|_| TimeError::Parse(format!("invalid {name}: {raw:?}")))
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a proleptic Gregorian date.
///
/// Source: H. Hinnant, "chrono-Compatible Low-Level Date Algorithms".
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = i64::from(month);
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i32, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year as i32, month as u32, day as u32)
}

impl std::fmt::Display for UtcTime {
    /// Seconds are printed to the microsecond. Rounding that reaches a
    /// full minute carries into the minute, hour and date fields.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let micros = (self.second * 1e6).round() as i64;
        let carry = micros.div_euclid(MICROS_PER_MINUTE);
        let micros = micros.rem_euclid(MICROS_PER_MINUTE);

        let (mut year, mut month, mut day) = (self.year, self.month, self.day);
        let (mut hour, mut minute) = (self.hour, self.minute);
        if carry != 0 {
            let minutes = days_from_civil(year, month, day) * 1440
                + i64::from(hour) * 60
                + i64::from(minute)
                + carry;
            (year, month, day) = civil_from_days(minutes.div_euclid(1440));
            let minute_of_day = minutes.rem_euclid(1440);
            hour = (minute_of_day / 60) as u32;
            minute = (minute_of_day % 60) as u32;
        }

        let whole = micros / 1_000_000;
        let frac = micros % 1_000_000;
        write!(
            f,
            "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{whole:02}"
        )?;
        if frac != 0 {
            write!(f, ".{frac:06}")?;
        }
        f.write_str("Z")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_constructor() {
        let t = UtcTime::new(2024, 3, 20, 12, 30, 45.5);
        assert_eq!(t.year, 2024);
        assert_eq!(t.month, 3);
        assert_eq!(t.day, 20);
        assert_eq!(t.hour, 12);
        assert_eq!(t.minute, 30);
        assert!((t.second - 45.5).abs() < 1e-12);
    }

    #[test]
    fn unix_epoch_is_zero() {
        let t = UtcTime::new(1970, 1, 1, 0, 0, 0.0);
        assert_eq!(t.to_unix_seconds().unwrap(), 0.0);
    }

    #[test]
    fn known_unix_timestamp() {
        // 2023-01-01T00:00:00Z
        let t = UtcTime::new(2023, 1, 1, 0, 0, 0.0);
        assert_eq!(t.to_unix_seconds().unwrap(), 1_672_531_200.0);
    }

    #[test]
    fn pre_1970_is_negative() {
        let t = UtcTime::new(1969, 12, 31, 23, 59, 59.0);
        assert_eq!(t.to_unix_seconds().unwrap(), -1.0);
    }

    #[test]
    fn from_unix_roundtrip() {
        let t = UtcTime::new(2024, 2, 29, 18, 45, 12.25);
        let back = UtcTime::from_unix_seconds(t.to_unix_seconds().unwrap());
        assert_eq!((back.year, back.month, back.day), (2024, 2, 29));
        assert_eq!((back.hour, back.minute), (18, 45));
        assert!((back.second - 12.25).abs() < 1e-6);
    }

    #[test]
    fn from_negative_unix() {
        let t = UtcTime::from_unix_seconds(-0.5);
        assert_eq!((t.year, t.month, t.day), (1969, 12, 31));
        assert_eq!((t.hour, t.minute), (23, 59));
        assert!((t.second - 59.5).abs() < 1e-9);
    }

    #[test]
    fn parse_iso() {
        let t: UtcTime = "2024-03-20T12:30:45.5Z".parse().unwrap();
        assert_eq!(t, UtcTime::new(2024, 3, 20, 12, 30, 45.5));
    }

    #[test]
    fn parse_without_z() {
        let t: UtcTime = "2000-01-01T12:00:00".parse().unwrap();
        assert_eq!(t, UtcTime::new(2000, 1, 1, 12, 0, 0.0));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "2024-03-20 12:00:00".parse::<UtcTime>(),
            Err(TimeError::Parse(_))
        ));
        assert!(matches!(
            "2024-xx-20T12:00:00Z".parse::<UtcTime>(),
            Err(TimeError::Parse(_))
        ));
    }

    #[test]
    fn parse_rejects_bad_calendar() {
        assert!(matches!(
            "2023-02-29T00:00:00Z".parse::<UtcTime>(),
            Err(TimeError::InvalidCalendar(_))
        ));
        assert!(matches!(
            "2023-01-01T24:00:00Z".parse::<UtcTime>(),
            Err(TimeError::InvalidCalendar(_))
        ));
    }

    #[test]
    fn display_whole_seconds() {
        let t = UtcTime::new(2024, 1, 15, 0, 0, 0.0);
        assert_eq!(t.to_string(), "2024-01-15T00:00:00Z");
    }

    #[test]
    fn display_fractional_seconds() {
        let t = UtcTime::new(2024, 1, 15, 12, 30, 45.123);
        let s = t.to_string();
        assert!(s.contains("12:30:"), "got: {s}");
    }

    #[test]
    fn display_rounds_into_next_minute() {
        let t = UtcTime::new(2024, 1, 1, 0, 0, 59.999_999_6);
        let s = t.to_string();
        assert_eq!(s, "2024-01-01T00:01:00Z");
        let back: UtcTime = s.parse().unwrap();
        assert_eq!(back, UtcTime::new(2024, 1, 1, 0, 1, 0.0));
    }

    #[test]
    fn display_carry_crosses_year_end() {
        let t = UtcTime::new(2023, 12, 31, 23, 59, 59.999_999_6);
        assert_eq!(t.to_string(), "2024-01-01T00:00:00Z");
        let leap = UtcTime::new(2024, 2, 28, 23, 59, 59.999_999_9);
        assert_eq!(leap.to_string(), "2024-02-29T00:00:00Z");
    }

    #[test]
    fn display_keeps_microseconds() {
        let t = UtcTime::new(2024, 1, 15, 12, 30, 5.000_25);
        assert_eq!(t.to_string(), "2024-01-15T12:30:05.000250Z");
        let below: UtcTime = UtcTime::new(2024, 1, 15, 12, 30, 59.999_999_4)
            .to_string()
            .parse()
            .unwrap();
        assert_eq!(below.minute, 30);
        assert!((below.second - 59.999_999).abs() < 1e-9);
    }

    #[test]
    fn display_parses_back() {
        let t = UtcTime::new(1999, 12, 31, 23, 59, 59.0);
        let back: UtcTime = t.to_string().parse().unwrap();
        assert_eq!(t, back);
    }
}
