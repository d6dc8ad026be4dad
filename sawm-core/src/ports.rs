//! Traits describing the timings backend and shared request/error types.

use async_trait::async_trait;

use crate::model::{Locality, RawTiming, SourceMeta};

/// Hijri month whose days make up the fasting timetable (Ramadan).
pub const TARGET_HIJRI_MONTH: u32 = 9;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors that can end a fetch-and-normalize cycle.
pub enum FetchError {
    /// The backend could not be reached or answered with a non-success status.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
    /// The backend answered, but its payload or time strings could not be parsed.
    #[error("Malformed upstream data: {0}")]
    MalformedUpstreamData(String),
    /// The request succeeded but no day fell into the target hijri month.
    #[error("No fasting days found for the requested locality")]
    EmptyResult,
    /// The request was rejected before any network call.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl FetchError {
    /// Whether this is the soft "no data" outcome rather than a hard failure.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        matches!(self, Self::EmptyResult)
    }

    /// Message shown to the user for this failure.
    #[must_use]
    pub fn user_notice(&self) -> String {
        match self {
            Self::EmptyResult => {
                "No data available. Please check city and country name.".to_owned()
            }
            other => format!("Failed to fetch Ramadan timings. Please try again. ({other})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Parameters shared by every calendar request of one fetch cycle.
pub struct CalendarQuery {
    /// Gregorian year.
    pub year: i32,
    /// Gregorian months (1-12), ascending and without duplicates.
    pub months: Vec<u32>,
    /// Calculation method code understood by the backend.
    pub method: u8,
    /// Optional juristic school code.
    pub school: Option<u8>,
}

#[async_trait]
/// Trait for backends that deliver raw daily prayer times.
pub trait TimingsPort: Send + Sync {
    /// Metadata describing this backend.
    fn source(&self) -> &SourceMeta;

    /// Fetch the raw Sehri/Iftar strings for every day of the target hijri month
    /// that falls into the queried months, in chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::UpstreamUnavailable`] when any request fails and
    /// [`FetchError::MalformedUpstreamData`] when a response cannot be decoded.
    async fn fetch_raw(
        &self,
        locality: &Locality,
        query: &CalendarQuery,
    ) -> Result<Vec<RawTiming>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_a_soft_notice() {
        assert!(FetchError::EmptyResult.is_empty_result());
        assert_eq!(
            FetchError::EmptyResult.user_notice(),
            "No data available. Please check city and country name."
        );
    }

    #[test]
    fn hard_errors_carry_their_cause() {
        let error = FetchError::UpstreamUnavailable("HTTP status 500".to_owned());
        assert!(!error.is_empty_result());
        let notice = error.user_notice();
        assert!(notice.starts_with("Failed to fetch Ramadan timings."));
        assert!(notice.contains("HTTP status 500"));
    }
}
