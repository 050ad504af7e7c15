//! Date and time values of the SURF native vocabulary.
//!
//! Most members map directly onto `chrono` types. The partial forms chrono has no
//! type for (year, year-month, month-day, time with offset, zoned date-time) are
//! small value types defined here. Every member renders as ISO-8601 through
//! [`std::fmt::Display`].

use crate::{Error, Result};
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc,
};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Any member of the SURF temporal family.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use surf_writer::Temporal;
///
/// let date = NaiveDate::from_ymd_opt(2017, 2, 12).unwrap();
/// assert_eq!(Temporal::from(date).to_string(), "2017-02-12");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Temporal {
    Instant(DateTime<Utc>),
    LocalDate(NaiveDate),
    LocalTime(NaiveTime),
    LocalDateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    OffsetTime(OffsetTime),
    ZonedDateTime(ZonedDateTime),
    Year(Year),
    YearMonth(YearMonth),
    MonthDay(MonthDay),
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Temporal::Instant(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Temporal::LocalDate(date) => write!(f, "{}", date),
            Temporal::LocalTime(time) => write!(f, "{}", time),
            Temporal::LocalDateTime(dt) => write!(f, "{}T{}", dt.date(), dt.time()),
            Temporal::OffsetDateTime(dt) => {
                f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Temporal::OffsetTime(time) => write!(f, "{}", time),
            Temporal::ZonedDateTime(zoned) => write!(f, "{}", zoned),
            Temporal::Year(year) => write!(f, "{}", year),
            Temporal::YearMonth(year_month) => write!(f, "{}", year_month),
            Temporal::MonthDay(month_day) => write!(f, "{}", month_day),
        }
    }
}

/// A time of day with a fixed UTC offset, e.g. `10:15:30+01:00`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    time: NaiveTime,
    offset: FixedOffset,
}

impl OffsetTime {
    #[must_use]
    pub const fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        OffsetTime { time, offset }
    }

    #[must_use]
    pub const fn time(&self) -> NaiveTime {
        self.time
    }

    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.time, self.offset)
    }
}

/// A date-time with an offset and the identifier of the region it belongs to,
/// e.g. `2017-02-12T10:15:30+01:00[Europe/Paris]`.
///
/// The offset is authoritative; the zone identifier is carried as given.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    date_time: DateTime<FixedOffset>,
    zone: String,
}

impl ZonedDateTime {
    /// Creates a zoned date-time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemporal`] if the zone identifier is empty or
    /// contains whitespace or brackets.
    pub fn new(date_time: DateTime<FixedOffset>, zone: impl Into<String>) -> Result<Self> {
        let zone = zone.into();
        if zone.is_empty() || zone.chars().any(|c| c.is_whitespace() || c == '[' || c == ']') {
            return Err(Error::InvalidTemporal(format!("zone identifier {:?}", zone)));
        }
        Ok(ZonedDateTime { date_time, zone })
    }

    #[must_use]
    pub fn date_time(&self) -> &DateTime<FixedOffset> {
        &self.date_time
    }

    #[must_use]
    pub fn zone(&self) -> &str {
        &self.zone
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]",
            self.date_time.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            self.zone
        )
    }
}

/// A proleptic year such as `2017`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(pub i32);

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// A month of a specific year, e.g. `2017-02`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemporal`] if `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidTemporal(format!("month {}", month)));
        }
        Ok(YearMonth { year, month })
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }
}

/// A day of a month regardless of year, e.g. `--02-29`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemporal`] if the day does not exist in `month`
    /// in any year (February 29 is accepted).
    pub fn new(month: u32, day: u32) -> Result<Self> {
        let max_day = match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 => 29,
            _ => return Err(Error::InvalidTemporal(format!("month {}", month))),
        };
        if day == 0 || day > max_day {
            return Err(Error::InvalidTemporal(format!(
                "day {} of month {}",
                day, month
            )));
        }
        Ok(MonthDay { month, day })
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", self.month, self.day)
    }
}

impl From<DateTime<Utc>> for Temporal {
    fn from(value: DateTime<Utc>) -> Self {
        Temporal::Instant(value)
    }
}

impl TryFrom<SystemTime> for Temporal {
    type Error = Error;

    /// Fails when the time lies outside the instants chrono can represent.
    fn try_from(value: SystemTime) -> Result<Self> {
        let instant = match value.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_secs())
                .ok()
                .and_then(|secs| DateTime::from_timestamp(secs, after.subsec_nanos())),
            Err(err) => {
                let before = err.duration();
                i64::try_from(before.as_secs()).ok().and_then(|secs| {
                    match before.subsec_nanos() {
                        0 => DateTime::from_timestamp(-secs, 0),
                        nanos => DateTime::from_timestamp(-secs - 1, 1_000_000_000 - nanos),
                    }
                })
            }
        };
        instant
            .map(Temporal::Instant)
            .ok_or_else(|| Error::unsupported_value("system time is outside the instant range"))
    }
}

impl From<NaiveDate> for Temporal {
    fn from(value: NaiveDate) -> Self {
        Temporal::LocalDate(value)
    }
}

impl From<NaiveTime> for Temporal {
    fn from(value: NaiveTime) -> Self {
        Temporal::LocalTime(value)
    }
}

impl From<NaiveDateTime> for Temporal {
    fn from(value: NaiveDateTime) -> Self {
        Temporal::LocalDateTime(value)
    }
}

impl From<DateTime<FixedOffset>> for Temporal {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Temporal::OffsetDateTime(value)
    }
}

impl From<OffsetTime> for Temporal {
    fn from(value: OffsetTime) -> Self {
        Temporal::OffsetTime(value)
    }
}

impl From<ZonedDateTime> for Temporal {
    fn from(value: ZonedDateTime) -> Self {
        Temporal::ZonedDateTime(value)
    }
}

impl From<Year> for Temporal {
    fn from(value: Year) -> Self {
        Temporal::Year(value)
    }
}

impl From<YearMonth> for Temporal {
    fn from(value: YearMonth) -> Self {
        Temporal::YearMonth(value)
    }
}

impl From<MonthDay> for Temporal {
    fn from(value: MonthDay) -> Self {
        Temporal::MonthDay(value)
    }
}
