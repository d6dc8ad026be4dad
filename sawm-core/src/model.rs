//! Domain data structures for localities and daily fasting timings.

use std::{fmt, vec};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Display format used for Sehri and Iftar times, e.g. `04:32 AM`.
pub const DISPLAY_TIME_FORMAT: &str = "%I:%M %p";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// City/country pair used to query location-specific prayer times.
pub struct Locality {
    /// City name as understood by the timings backend.
    pub city: String,
    /// Country name as understood by the timings backend.
    pub country: String,
}

impl Locality {
    /// Construct a new locality.
    #[must_use]
    pub fn new<C: Into<String>, K: Into<String>>(city: C, country: K) -> Self {
        Self {
            city: city.into(),
            country: country.into(),
        }
    }

    /// Check whether both city and country carry a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.city.trim().is_empty() && !self.country.trim().is_empty()
    }
}

impl fmt::Display for Locality {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}, {}", self.city, self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a timings backend.
pub struct SourceId(pub String);

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Metadata describing a timings backend and its human-friendly name.
pub struct SourceMeta {
    /// Unique identifier.
    pub id: SourceId,
    /// Display name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Unprocessed Sehri/Iftar clock strings for one day, as extracted from a provider.
pub struct RawTiming {
    /// Gregorian date string in the provider's native form.
    pub date: String,
    /// Dawn prayer time, `HH:MM` (24-hour).
    pub raw_start: String,
    /// Sunset prayer time, `HH:MM` (24-hour).
    pub raw_end: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Offset-adjusted fasting window for one day.
pub struct TimingRow {
    /// Gregorian date string, passed through unmodified from the provider.
    pub date: String,
    /// Sehri cutoff.
    pub start_time: NaiveTime,
    /// Iftar time.
    pub end_time: NaiveTime,
}

impl TimingRow {
    /// Sehri time in 12-hour form.
    #[must_use]
    pub fn start_label(&self) -> String {
        self.start_time.format(DISPLAY_TIME_FORMAT).to_string()
    }

    /// Iftar time in 12-hour form.
    #[must_use]
    pub fn end_label(&self) -> String {
        self.end_time.format(DISPLAY_TIME_FORMAT).to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
/// Ordered, immutable list of timing rows in the order the provider returned them.
pub struct TimingTable {
    rows: Vec<TimingRow>,
}

impl TimingTable {
    /// Column headers used by front-ends.
    pub const HEADERS: [&'static str; 3] = ["Date", "Sehri", "Iftar"];

    /// Wrap already ordered rows.
    #[must_use]
    pub fn new(rows: Vec<TimingRow>) -> Self {
        Self { rows }
    }

    /// All rows in chronological order.
    #[must_use]
    pub fn rows(&self) -> &[TimingRow] {
        &self.rows
    }

    /// Number of days in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no day matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows.
    pub fn iter(&self) -> impl Iterator<Item = &TimingRow> {
        self.rows.iter()
    }
}

impl IntoIterator for TimingTable {
    type Item = TimingRow;
    type IntoIter = vec::IntoIter<TimingRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Safety margins applied to the raw prayer times.
pub struct Offsets {
    /// Minutes subtracted from the dawn time to get Sehri.
    pub sehri_minutes: i64,
    /// Minutes added to the sunset time to get Iftar.
    pub iftar_minutes: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(start: (u32, u32), end: (u32, u32)) -> TimingRow {
        TimingRow {
            date: "02-03-2025".to_owned(),
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).expect("valid time"),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).expect("valid time"),
        }
    }

    #[test]
    fn labels_use_twelve_hour_clock() {
        let timing = row((4, 32), (18, 27));
        assert_eq!(timing.start_label(), "04:32 AM");
        assert_eq!(timing.end_label(), "06:27 PM");
    }

    #[test]
    fn midnight_and_noon_labels() {
        let timing = row((0, 0), (12, 0));
        assert_eq!(timing.start_label(), "12:00 AM");
        assert_eq!(timing.end_label(), "12:00 PM");
    }

    #[test]
    fn locality_requires_both_fields() {
        assert!(Locality::new("Karachi", "Pakistan").is_complete());
        assert!(!Locality::new("  ", "Pakistan").is_complete());
        assert!(!Locality::new("Karachi", "").is_complete());
        assert_eq!(
            Locality::new("Karachi", "Pakistan").to_string(),
            "Karachi, Pakistan"
        );
    }

    #[test]
    fn table_exposes_rows_in_order() {
        let table = TimingTable::new(vec![row((4, 10), (18, 25)), row((4, 9), (18, 26))]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
        let starts: Vec<String> = table.iter().map(TimingRow::start_label).collect();
        assert_eq!(starts, ["04:10 AM", "04:09 AM"]);
        assert!(TimingTable::default().is_empty());
    }
}
