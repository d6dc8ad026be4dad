//! Conversion of raw provider clock strings into offset-adjusted timing rows.

use chrono::{NaiveTime, TimeDelta};
use tracing::debug;

use crate::model::{Offsets, RawTiming, TimingRow, TimingTable};
use crate::ports::FetchError;

/// Clock format the providers deliver prayer times in.
pub const RAW_TIME_FORMAT: &str = "%H:%M";

/// Apply the Sehri/Iftar offsets to every raw row and build the final table.
///
/// Rows keep their input order; nothing is filtered. Offsets wrap around
/// midnight without touching the date.
///
/// # Errors
///
/// Returns [`FetchError::MalformedUpstreamData`] when a time is not `HH:MM`,
/// and [`FetchError::InvalidQuery`] when an offset is out of range.
pub fn normalize(raw_rows: Vec<RawTiming>, offsets: Offsets) -> Result<TimingTable, FetchError> {
    let sehri_shift = minutes(offsets.sehri_minutes)?;
    let iftar_shift = minutes(offsets.iftar_minutes)?;

    let rows = raw_rows
        .into_iter()
        .map(|raw| {
            let start = parse_clock(&raw.date, &raw.raw_start)?;
            let end = parse_clock(&raw.date, &raw.raw_end)?;
            Ok(TimingRow {
                date: raw.date,
                start_time: start - sehri_shift,
                end_time: end + iftar_shift,
            })
        })
        .collect::<Result<Vec<_>, FetchError>>()?;

    debug!(rows = rows.len(), "normalized timings");
    Ok(TimingTable::new(rows))
}

fn parse_clock(date: &str, value: &str) -> Result<NaiveTime, FetchError> {
    NaiveTime::parse_from_str(value.trim(), RAW_TIME_FORMAT).map_err(|err| {
        FetchError::MalformedUpstreamData(format!("invalid time {value:?} on {date}: {err}"))
    })
}

fn minutes(value: i64) -> Result<TimeDelta, FetchError> {
    TimeDelta::try_minutes(value)
        .ok_or_else(|| FetchError::InvalidQuery(format!("offset of {value} minutes is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFSETS: Offsets = Offsets {
        sehri_minutes: 16,
        iftar_minutes: 2,
    };

    fn raw(date: &str, start: &str, end: &str) -> RawTiming {
        RawTiming {
            date: date.to_owned(),
            raw_start: start.to_owned(),
            raw_end: end.to_owned(),
        }
    }

    fn labels(table: &TimingTable) -> Vec<(String, String, String)> {
        table
            .iter()
            .map(|row| (row.date.clone(), row.start_label(), row.end_label()))
            .collect()
    }

    #[test]
    fn applies_offsets_and_twelve_hour_format() {
        let table = normalize(vec![raw("01-03-2025", "05:00", "18:10")], OFFSETS)
            .expect("valid rows");
        assert_eq!(
            labels(&table),
            [(
                "01-03-2025".to_owned(),
                "04:44 AM".to_owned(),
                "06:12 PM".to_owned()
            )]
        );
    }

    #[test]
    fn sehri_wraps_to_previous_evening_without_changing_date() {
        let table = normalize(vec![raw("15-06-2025", "00:05", "21:00")], OFFSETS)
            .expect("valid rows");
        let row = table.rows().first().expect("one row");
        assert_eq!(row.date, "15-06-2025");
        assert_eq!(row.start_label(), "11:49 PM");
        assert_eq!(row.start_time, NaiveTime::from_hms_opt(23, 49, 0).expect("valid"));
    }

    #[test]
    fn iftar_wraps_past_midnight() {
        let table = normalize(vec![raw("21-06-2025", "02:30", "23:59")], OFFSETS)
            .expect("valid rows");
        let row = table.rows().first().expect("one row");
        assert_eq!(row.end_label(), "12:01 AM");
    }

    #[test]
    fn keeps_one_row_per_input_in_order() {
        let input = vec![
            raw("03-03-2025", "04:08", "18:26"),
            raw("01-03-2025", "04:10", "18:25"),
            raw("02-03-2025", "04:09", "18:25"),
            raw("02-03-2025", "04:09", "18:25"),
        ];
        let dates: Vec<String> = input.iter().map(|row| row.date.clone()).collect();

        let table = normalize(input, OFFSETS).expect("valid rows");

        let out_dates: Vec<String> = table.iter().map(|row| row.date.clone()).collect();
        assert_eq!(out_dates, dates);
    }

    #[test]
    fn zero_offsets_only_reformat() {
        let offsets = Offsets {
            sehri_minutes: 0,
            iftar_minutes: 0,
        };
        let table = normalize(vec![raw("01-03-2025", "04:10", "18:25")], offsets)
            .expect("valid rows");
        let row = table.rows().first().expect("one row");
        assert_eq!(row.start_label(), "04:10 AM");
        assert_eq!(row.end_label(), "06:25 PM");
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = normalize(Vec::new(), OFFSETS).expect("empty is fine");
        assert!(table.is_empty());
    }

    #[test]
    fn malformed_time_is_reported() {
        let err = normalize(vec![raw("01-03-2025", "4 AM", "18:25")], OFFSETS)
            .expect_err("must reject");
        match err {
            FetchError::MalformedUpstreamData(message) => {
                assert!(message.contains("01-03-2025"), "message: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn out_of_range_end_time_is_reported() {
        let result = normalize(vec![raw("01-03-2025", "04:10", "25:10")], OFFSETS);
        assert!(matches!(result, Err(FetchError::MalformedUpstreamData(_))));
    }
}
