//! Calendar constants and their configurable overrides.

use serde::{Deserialize, Serialize};

use crate::model::Offsets;
use crate::ports::{CalendarQuery, FetchError};

/// Gregorian year the timetable is built for.
pub const DEFAULT_YEAR: i32 = 2025;
/// Gregorian months covering Ramadan in [`DEFAULT_YEAR`] (March and April).
pub const DEFAULT_MONTHS: [u32; 2] = [3, 4];
/// Calculation method code (2 = Islamic Society of North America).
pub const DEFAULT_METHOD: u8 = 2;
/// Minutes taken off the dawn prayer time to get the Sehri cutoff.
pub const DEFAULT_SEHRI_OFFSET_MINUTES: i64 = 16;
/// Minutes added to the sunset prayer time to get Iftar.
pub const DEFAULT_IFTAR_OFFSET_MINUTES: i64 = 2;

// Upper bound for either offset: one full day.
const MAX_OFFSET_MINUTES: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Business constants for one Ramadan season.
pub struct CalendarSettings {
    /// Gregorian year to query.
    pub year: i32,
    /// Gregorian months to query.
    pub months: Vec<u32>,
    /// Calculation method code.
    pub method: u8,
    /// Optional juristic school code (0 = Shafi, 1 = Hanafi).
    pub school: Option<u8>,
    /// See [`DEFAULT_SEHRI_OFFSET_MINUTES`].
    pub sehri_offset_minutes: i64,
    /// See [`DEFAULT_IFTAR_OFFSET_MINUTES`].
    pub iftar_offset_minutes: i64,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            months: DEFAULT_MONTHS.to_vec(),
            method: DEFAULT_METHOD,
            school: None,
            sehri_offset_minutes: DEFAULT_SEHRI_OFFSET_MINUTES,
            iftar_offset_minutes: DEFAULT_IFTAR_OFFSET_MINUTES,
        }
    }
}

impl CalendarSettings {
    /// Offsets to hand to the normalizer.
    #[must_use]
    pub fn offsets(&self) -> Offsets {
        Offsets {
            sehri_minutes: self.sehri_offset_minutes,
            iftar_minutes: self.iftar_offset_minutes,
        }
    }

    /// Build the request parameters for the given months.
    ///
    /// Months are sorted and deduplicated so requests go out in calendar order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] when no month is given or one is outside 1-12.
    pub fn query(&self, months: &[u32]) -> Result<CalendarQuery, FetchError> {
        Ok(CalendarQuery {
            year: self.year,
            months: checked_months(months)?,
            method: self.method,
            school: self.school,
        })
    }

    /// Check the configured values before they are used.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), FetchError> {
        checked_months(&self.months)?;
        for (name, value) in [
            ("sehri_offset_minutes", self.sehri_offset_minutes),
            ("iftar_offset_minutes", self.iftar_offset_minutes),
        ] {
            if !(0..=MAX_OFFSET_MINUTES).contains(&value) {
                return Err(FetchError::InvalidQuery(format!(
                    "{name} must be between 0 and {MAX_OFFSET_MINUTES}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

fn checked_months(months: &[u32]) -> Result<Vec<u32>, FetchError> {
    if months.is_empty() {
        return Err(FetchError::InvalidQuery("at least one month is required".to_owned()));
    }
    if let Some(bad) = months.iter().find(|month| !(1..=12).contains(*month)) {
        return Err(FetchError::InvalidQuery(format!("month {bad} is not between 1 and 12")));
    }

    let mut sorted = months.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    Ok(sorted)
}
