//! Date, time and timestamp conversion
//!
//! Drivers hand temporal columns over as an epoch-millisecond instant plus
//! the zone of the session calendar. The converters decompose that instant
//! into calendar fields with plain chrono arithmetic: every call works on its
//! own values, nothing is cached or shared between calls.
//!
//! The upstream drivers do not always use a real null channel for temporal
//! columns. Two magic instants are treated as "no value" and preserved as-is:
//!
//! - dates and timestamps at exactly the epoch (`0` ms),
//! - times one hour before the epoch (`-3_600_000` ms), which is what a
//!   zeroed `TIME` looks like to a driver running at UTC-1.

use super::value_kind::ValueKind;
use chrono::{DateTime, Datelike, FixedOffset, Offset, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Shift applied before testing a time value against the epoch sentinel
const NULL_TIME_SHIFT_MILLIS: i64 = 3_600_000;

/// Temporal value as read from the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTemporal {
    epoch_millis: i64,
    zone: FixedOffset,
}

impl NativeTemporal {
    /// Create a native value from an instant and the calendar zone
    pub fn new(epoch_millis: i64, zone: FixedOffset) -> Self {
        Self { epoch_millis, zone }
    }

    /// Create a native value whose calendar runs at UTC
    pub fn utc(epoch_millis: i64) -> Self {
        Self::new(epoch_millis, Utc.fix())
    }

    /// Milliseconds since the Unix epoch
    pub fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Zone of the session calendar
    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Zone offset in milliseconds, east of UTC positive
    pub fn zone_offset_millis(&self) -> i64 {
        i64::from(self.zone.local_minus_utc()) * 1000
    }

    /// Calendar view of the instant in the session zone
    fn calendar(&self) -> Option<DateTime<FixedOffset>> {
        match DateTime::from_timestamp_millis(self.epoch_millis) {
            Some(instant) => Some(instant.with_timezone(&self.zone)),
            None => {
                tracing::warn!(
                    epoch_millis = self.epoch_millis,
                    "temporal value outside the representable range"
                );
                None
            }
        }
    }
}

/// Anything that can be handed to the converters as a native temporal value
pub trait AsNativeTemporal {
    fn as_native_temporal(&self) -> NativeTemporal;
}

impl AsNativeTemporal for NativeTemporal {
    fn as_native_temporal(&self) -> NativeTemporal {
        *self
    }
}

/// The zone is the offset in effect at the instant, daylight saving
/// included. Drivers that report only the standard zone offset should build
/// a [`NativeTemporal`] from that offset instead, otherwise date-times taken
/// during DST carry an offset one hour larger.
impl<Tz: TimeZone> AsNativeTemporal for DateTime<Tz> {
    fn as_native_temporal(&self) -> NativeTemporal {
        NativeTemporal::new(self.timestamp_millis(), self.offset().fix())
    }
}

/// Converted temporal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalValue {
    /// Calendar date, month 1-12
    Date { year: i32, month: u32, day: u32 },
    /// Date and time of day in the session zone, with that zone's offset
    /// truncated to whole hours
    DateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        utc_offset_minutes: i32,
    },
    /// Time carried as the driver's epoch instant, read on the clock of the
    /// session zone
    Time {
        epoch_millis: i64,
        utc_offset_seconds: i32,
    },
}

impl TemporalValue {
    /// The value kind this temporal value materializes
    pub fn kind(&self) -> ValueKind {
        match self {
            TemporalValue::Date { .. } => ValueKind::Date,
            TemporalValue::DateTime { .. } => ValueKind::DateTime,
            TemporalValue::Time { .. } => ValueKind::Time,
        }
    }

    /// Zone offset as a fraction of a day, `(hours, 24)`.
    ///
    /// Only date-times carry an offset.
    pub fn offset_day_fraction(&self) -> Option<(i32, i32)> {
        match self {
            TemporalValue::DateTime {
                utc_offset_minutes, ..
            } => Some((utc_offset_minutes / 60, 24)),
            _ => None,
        }
    }

    /// Wall-clock time of day in the session zone for time values
    pub fn time_of_day(&self) -> Option<chrono::NaiveTime> {
        match self {
            TemporalValue::Time {
                epoch_millis,
                utc_offset_seconds,
            } => {
                let zone = FixedOffset::east_opt(*utc_offset_seconds)?;
                DateTime::from_timestamp_millis(*epoch_millis)
                    .map(|instant| instant.with_timezone(&zone).time())
            }
            _ => None,
        }
    }

    /// Render the value the way the host formatter for its kind expects:
    /// `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS+HH:MM` or `HH:MM:SS`.
    pub fn render(&self) -> String {
        match self {
            TemporalValue::Date { year, month, day } => {
                format!("{:04}-{:02}-{:02}", year, month, day)
            }
            TemporalValue::DateTime {
                year,
                month,
                day,
                hour,
                minute,
                second,
                utc_offset_minutes,
            } => {
                let sign = if *utc_offset_minutes < 0 { '-' } else { '+' };
                let offset = utc_offset_minutes.unsigned_abs();
                format!(
                    "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}{}{:02}:{:02}",
                    year,
                    month,
                    day,
                    hour,
                    minute,
                    second,
                    sign,
                    offset / 60,
                    offset % 60
                )
            }
            TemporalValue::Time { epoch_millis, .. } => match self.time_of_day() {
                Some(time) => time.format("%H:%M:%S").to_string(),
                None => epoch_millis.to_string(),
            },
        }
    }
}

impl std::fmt::Display for TemporalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

/// Convert a driver date. The epoch instant means "no date".
pub fn convert_date<T: AsNativeTemporal + ?Sized>(native: &T) -> Option<TemporalValue> {
    let native = native.as_native_temporal();
    if native.epoch_millis() == 0 {
        return None;
    }

    let calendar = native.calendar()?;
    Some(TemporalValue::Date {
        year: calendar.year(),
        // calendar months are 0-based
        month: calendar.month0() + 1,
        day: calendar.day(),
    })
}

/// Convert a driver timestamp. The epoch instant means "no timestamp".
///
/// The attached offset is the calendar zone offset in whole hours; any
/// sub-hour part of the zone is dropped from the offset but not from the
/// decomposed fields.
pub fn convert_datetime<T: AsNativeTemporal + ?Sized>(native: &T) -> Option<TemporalValue> {
    let native = native.as_native_temporal();
    if native.epoch_millis() == 0 {
        return None;
    }

    let calendar = native.calendar()?;
    let offset_hours = native.zone_offset_millis() / MILLIS_PER_HOUR;

    Some(TemporalValue::DateTime {
        year: calendar.year(),
        month: calendar.month0() + 1,
        day: calendar.day(),
        hour: calendar.hour(),
        minute: calendar.minute(),
        second: calendar.second(),
        utc_offset_minutes: (offset_hours * 60) as i32,
    })
}

/// Convert a driver time value.
pub fn convert_time<T: AsNativeTemporal + ?Sized>(native: &T) -> Option<TemporalValue> {
    time_value(native.as_native_temporal())
}

/// Convert a driver date value that is being used to carry a time of day.
///
/// Same sentinel and result as [`convert_time`].
pub fn convert_time_from_date<T: AsNativeTemporal + ?Sized>(native: &T) -> Option<TemporalValue> {
    time_value(native.as_native_temporal())
}

fn time_value(native: NativeTemporal) -> Option<TemporalValue> {
    let epoch_millis = native.epoch_millis();
    if epoch_millis.checked_add(NULL_TIME_SHIFT_MILLIS) == Some(0) {
        return None;
    }
    Some(TemporalValue::Time {
        epoch_millis,
        utc_offset_seconds: native.zone().local_minus_utc(),
    })
}
