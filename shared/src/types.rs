//! Common types used across the report decoders

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of raw aviation reports the platform decodes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Metar,
    Taf,
    Sigmet,
    Pirep,
    Notam,
}

impl ReportKind {
    pub fn code(&self) -> &'static str {
        match self {
            ReportKind::Metar => "METAR",
            ReportKind::Taf => "TAF",
            ReportKind::Sigmet => "SIGMET",
            ReportKind::Pirep => "PIREP",
            ReportKind::Notam => "NOTAM",
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Raw report text as received from the upstream weather service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawReport {
    pub kind: ReportKind,
    pub station: String,
    pub text: String,
    pub received_at: DateTime<Utc>,
}

impl RawReport {
    pub fn new(kind: ReportKind, station: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            station: station.into(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    /// True when the upstream returned nothing usable
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Day-of-month, hour and minute in UTC, as encoded in `ddhhmmZ` groups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayTime {
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
}

impl DayTime {
    pub fn new(day: u8, hour: u8, minute: u8) -> Self {
        Self { day, hour, minute }
    }

    /// Parse `ddhhmm` with an optional trailing `Z`
    pub fn parse(group: &str) -> Option<Self> {
        let digits = group.strip_suffix('Z').unwrap_or(group);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day: u8 = digits[0..2].parse().ok()?;
        let hour: u8 = digits[2..4].parse().ok()?;
        let minute: u8 = digits[4..6].parse().ok()?;
        if !(1..=31).contains(&day) || hour > 24 || minute > 59 {
            return None;
        }
        Some(Self { day, hour, minute })
    }

    /// Minutes since the start of the encoded day-of-month
    pub fn minutes_of_month(&self) -> u32 {
        (self.day as u32 * 24 + self.hour as u32) * 60 + self.minute as u32
    }

    /// Resolve against an explicit reference time.
    ///
    /// Picks the reference's month unless that lands more than a day after the
    /// reference (or the day does not exist in that month), in which case the
    /// previous month is used. Returns `None` when neither month can hold the day.
    pub fn resolve_against(&self, reference: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let (year, month) = (reference.year(), reference.month());
        if let Some(candidate) = self.in_month(year, month) {
            if candidate <= reference + Duration::days(1) {
                return Some(candidate);
            }
        }
        let (prev_year, prev_month) = if month == 1 {
            (year - 1, 12)
        } else {
            (year, month - 1)
        };
        self.in_month(prev_year, prev_month)
    }

    fn in_month(&self, year: i32, month: u32) -> Option<DateTime<Utc>> {
        let base = Utc
            .with_ymd_and_hms(year, month, self.day as u32, 0, 0, 0)
            .single()?;
        Some(base + Duration::hours(self.hour as i64) + Duration::minutes(self.minute as i64))
    }
}

impl std::fmt::Display for DayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}{:02}{:02}Z", self.day, self.hour, self.minute)
    }
}

/// Day-of-month and hour, as used by TAF validity and change windows
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayHour {
    pub day: u8,
    pub hour: u8,
}

impl DayHour {
    pub fn new(day: u8, hour: u8) -> Self {
        Self { day, hour }
    }

    /// Parse `ddhh`; hour 24 is accepted as end-of-day
    pub fn parse(group: &str) -> Option<Self> {
        if group.len() != 4 || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let day: u8 = group[0..2].parse().ok()?;
        let hour: u8 = group[2..4].parse().ok()?;
        if !(1..=31).contains(&day) || hour > 24 {
            return None;
        }
        Some(Self { day, hour })
    }
}

impl std::fmt::Display for DayHour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}{:02}", self.day, self.hour)
    }
}

/// A `ddhh/ddhh` period scoped to a single report
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidPeriod {
    pub from: DayHour,
    pub to: DayHour,
}

impl ValidPeriod {
    pub fn parse(group: &str) -> Option<Self> {
        let (from, to) = group.split_once('/')?;
        Some(Self {
            from: DayHour::parse(from)?,
            to: DayHour::parse(to)?,
        })
    }
}

impl std::fmt::Display for ValidPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_time_parse() {
        assert_eq!(DayTime::parse("261951Z"), Some(DayTime::new(26, 19, 51)));
        assert_eq!(DayTime::parse("261951"), Some(DayTime::new(26, 19, 51)));
        assert_eq!(DayTime::parse("321951Z"), None);
        assert_eq!(DayTime::parse("26195Z"), None);
        assert_eq!(DayTime::parse("ABCDEFZ"), None);
    }

    #[test]
    fn test_valid_period_parse() {
        let period = ValidPeriod::parse("2618/2724").unwrap();
        assert_eq!(period.from, DayHour::new(26, 18));
        assert_eq!(period.to, DayHour::new(27, 24));
        assert_eq!(period.to_string(), "2618/2724");
        assert!(ValidPeriod::parse("2618-2724").is_none());
    }

    #[test]
    fn test_resolve_same_month() {
        let reference = Utc.with_ymd_and_hms(2024, 5, 26, 20, 5, 0).unwrap();
        let resolved = DayTime::new(26, 19, 51).resolve_against(reference).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 5, 26, 19, 51, 0).unwrap());
    }

    #[test]
    fn test_resolve_previous_month() {
        // Report from the 31st read on the 1st of the next month
        let reference = Utc.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        let resolved = DayTime::new(31, 23, 55).resolve_against(reference).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 5, 31, 23, 55, 0).unwrap());
    }

    #[test]
    fn test_resolve_across_year() {
        let reference = Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap();
        let resolved = DayTime::new(31, 22, 0).resolve_against(reference).unwrap();
        assert_eq!(resolved, Utc.with_ymd_and_hms(2024, 12, 31, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_raw_report_blank() {
        assert!(RawReport::new(ReportKind::Metar, "KJFK", "   ").is_blank());
        assert!(!RawReport::new(ReportKind::Metar, "KJFK", "KJFK 261951Z").is_blank());
    }
}
