//! Timings provider using the `AlAdhan` calendar-by-city API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use sawm_core::{
    model::{Locality, RawTiming, SourceId, SourceMeta},
    ports::{CalendarQuery, FetchError, TARGET_HIJRI_MONTH, TimingsPort},
};

/// Public `AlAdhan` API root.
pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com/v1";

/// Response from /calendarByCity
#[derive(Debug, Deserialize)]
struct CalendarResponse {
    data: Vec<DayEntry>,
    // "code" and "status" duplicate the HTTP status, not modelled
}

/// Single day from /calendarByCity
#[derive(Debug, Deserialize)]
struct DayEntry {
    date: DayDate,
    timings: DayTimings,
}

#[derive(Debug, Deserialize)]
struct DayDate {
    gregorian: GregorianDate,
    hijri: HijriDate,
}

#[derive(Debug, Deserialize)]
struct GregorianDate {
    date: String, // "DD-MM-YYYY"
}

#[derive(Debug, Deserialize)]
struct HijriDate {
    month: HijriMonth,
}

#[derive(Debug, Deserialize)]
struct HijriMonth {
    number: MonthNumber,
}

/// The API has shipped the month number both as a JSON number and as a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MonthNumber {
    Int(u32),
    Text(String),
}

impl MonthNumber {
    fn value(&self) -> Result<u32, FetchError> {
        match self {
            Self::Int(number) => Ok(*number),
            Self::Text(text) => text.trim().parse().map_err(|_err| {
                FetchError::MalformedUpstreamData(format!("invalid hijri month {text:?}"))
            }),
        }
    }
}

/// Only the two prayers a fast is bounded by; the rest are ignored.
#[derive(Debug, Deserialize)]
struct DayTimings {
    #[serde(rename = "Fajr")]
    fajr: String, // "04:10 (PKT)"
    #[serde(rename = "Maghrib")]
    maghrib: String,
}

/// Fetcher for daily Fajr/Maghrib times from `AlAdhan`.
pub struct AladhanTimingsPort {
    client: Client,
    base_url: String,
    meta: SourceMeta,
}

impl AladhanTimingsPort {
    /// Create a new port bound to the given HTTP client and the public API.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, DEFAULT_BASE_URL)
    }

    /// Create a port that talks to a different API root, e.g. a mirror or a test server.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(client: Client, base_url: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            meta: source_meta(),
        }
    }

    fn month_request(&self, locality: &Locality, query: &CalendarQuery, month: u32) -> RequestBuilder {
        let mut req = self
            .client
            .get(format!("{}/calendarByCity", self.base_url))
            .query(&[
                ("city", locality.city.trim()),
                ("country", locality.country.trim()),
            ])
            .query(&[("method", u32::from(query.method)), ("month", month)])
            .query(&[("year", query.year)]);

        if let Some(school) = query.school {
            req = req.query(&[("school", school)]);
        }
        req
    }
}

#[async_trait]
impl TimingsPort for AladhanTimingsPort {
    fn source(&self) -> &SourceMeta {
        &self.meta
    }

    async fn fetch_raw(
        &self,
        locality: &Locality,
        query: &CalendarQuery,
    ) -> Result<Vec<RawTiming>, FetchError> {
        let mut timings = Vec::new();

        // One request per month, strictly in order; the first failure aborts everything.
        for &month in &query.months {
            debug!(%locality, year = query.year, month, "requesting calendar");
            let calendar =
                fetch_json::<CalendarResponse>(self.month_request(locality, query, month)).await?;

            let before = timings.len();
            for day in calendar.data {
                if day.date.hijri.month.number.value()? != TARGET_HIJRI_MONTH {
                    continue;
                }

                timings.push(RawTiming {
                    date: day.date.gregorian.date,
                    raw_start: strip_zone(&day.timings.fajr),
                    raw_end: strip_zone(&day.timings.maghrib),
                });
            }
            debug!(month, kept = timings.len() - before, "filtered calendar month");
        }

        info!(%locality, days = timings.len(), "fetched Ramadan timings");
        Ok(timings)
    }
}

fn source_meta() -> SourceMeta {
    SourceMeta {
        id: SourceId(String::from("aladhan")),
        name: String::from("AlAdhan"),
    }
}

/// Drop the trailing timezone annotation, e.g. `"04:10 (PKT)"` -> `"04:10"`.
fn strip_zone(raw: &str) -> String {
    raw.split_whitespace().next().unwrap_or_default().to_owned()
}

// Small helper to fetch and decode JSON with status handling.
async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, FetchError> {
    let response = req.send().await.map_err(|err| {
        error!(error = %err, "calendar request failed");
        FetchError::UpstreamUnavailable(err.to_string())
    })?;

    let status = response.status();
    if !status.is_success() {
        error!(%status, "calendar request rejected");
        return Err(FetchError::UpstreamUnavailable(format!("HTTP status {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|err| FetchError::UpstreamUnavailable(err.to_string()))?;

    serde_json::from_slice(&body).map_err(|err| FetchError::MalformedUpstreamData(err.to_string()))
}
