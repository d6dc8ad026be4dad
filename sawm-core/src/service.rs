//! High-level service facade combining a timings backend with the normalizer.

use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog::LocalityCatalog;
use crate::devotions::{DUA_GROUPS, DuaGroup};
use crate::model::{Locality, SourceMeta, TimingTable};
use crate::normalize::normalize;
use crate::ports::{FetchError, TimingsPort};
use crate::settings::CalendarSettings;

/// Public entry point for building Sehri/Iftar timetables.
pub struct SawmService {
    port: Arc<dyn TimingsPort>,
    settings: CalendarSettings,
    catalog: LocalityCatalog,
}

impl SawmService {
    /// Create a new service bound to the provided backend.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] when the settings fail
    /// [`CalendarSettings::validate`].
    pub fn new(
        port: Arc<dyn TimingsPort>,
        settings: CalendarSettings,
        catalog: LocalityCatalog,
    ) -> Result<Self, FetchError> {
        settings.validate()?;
        Ok(Self {
            port,
            settings,
            catalog,
        })
    }

    /// Metadata of the backing provider.
    #[must_use]
    pub fn source(&self) -> &SourceMeta {
        self.port.source()
    }

    /// Calendar constants in effect.
    #[must_use]
    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    /// Selectable cities and countries.
    #[must_use]
    pub fn catalog(&self) -> &LocalityCatalog {
        &self.catalog
    }

    /// Static supplication panels.
    #[must_use]
    pub fn dua_groups(&self) -> &'static [DuaGroup] {
        &DUA_GROUPS
    }

    /// Fetch and normalize timings for a locality over the given months.
    ///
    /// An empty table is a successful outcome here.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidQuery`] for an incomplete locality or bad months,
    /// and passes through provider and normalizer failures.
    pub async fn fetch_timings(
        &self,
        locality: &Locality,
        months: &[u32],
    ) -> Result<TimingTable, FetchError> {
        if !locality.is_complete() {
            return Err(FetchError::InvalidQuery(
                "city and country must not be empty".to_owned(),
            ));
        }

        let query = self.settings.query(months)?;
        let raw = self.port.fetch_raw(locality, &query).await?;
        normalize(raw, self.settings.offsets())
    }

    /// Build the Ramadan timetable for a locality over the configured months.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_timings`], plus [`FetchError::EmptyResult`] when no
    /// day matched.
    pub async fn ramadan_timetable(&self, locality: &Locality) -> Result<TimingTable, FetchError> {
        let table = self.fetch_timings(locality, &self.settings.months).await?;
        if table.is_empty() {
            warn!(%locality, "no Ramadan days returned");
            return Err(FetchError::EmptyResult);
        }
        info!(%locality, days = table.len(), "timetable ready");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::model::{RawTiming, SourceId};
    use crate::ports::CalendarQuery;

    struct StubPort {
        meta: SourceMeta,
        response: Result<Vec<RawTiming>, FetchError>,
        queries: Mutex<Vec<CalendarQuery>>,
    }

    impl StubPort {
        fn new(response: Result<Vec<RawTiming>, FetchError>) -> Arc<Self> {
            Arc::new(Self {
                meta: SourceMeta {
                    id: SourceId("stub".to_owned()),
                    name: "Stub".to_owned(),
                },
                response,
                queries: Mutex::new(Vec::new()),
            })
        }

        fn queries(&self) -> Vec<CalendarQuery> {
            self.queries.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl TimingsPort for StubPort {
        fn source(&self) -> &SourceMeta {
            &self.meta
        }

        async fn fetch_raw(
            &self,
            _locality: &Locality,
            query: &CalendarQuery,
        ) -> Result<Vec<RawTiming>, FetchError> {
            self.queries.lock().expect("lock").push(query.clone());
            self.response.clone()
        }
    }

    fn raw(date: &str) -> RawTiming {
        RawTiming {
            date: date.to_owned(),
            raw_start: "04:10".to_owned(),
            raw_end: "18:25".to_owned(),
        }
    }

    fn service(port: Arc<StubPort>) -> SawmService {
        SawmService::new(port, CalendarSettings::default(), LocalityCatalog::default())
            .expect("default settings are valid")
    }

    fn karachi() -> Locality {
        Locality::new("Karachi", "Pakistan")
    }

    #[tokio::test]
    async fn builds_offset_table_from_provider_rows() {
        let port = StubPort::new(Ok(vec![raw("01-03-2025"), raw("02-03-2025")]));
        let table = service(Arc::clone(&port))
            .fetch_timings(&karachi(), &[3])
            .await
            .expect("table");

        assert_eq!(table.len(), 2);
        for row in table.iter() {
            assert_eq!(row.start_label(), "03:54 AM");
            assert_eq!(row.end_label(), "06:27 PM");
        }
        let queries = port.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries.first().map(|query| query.months.clone()), Some(vec![3]));
    }

    #[tokio::test]
    async fn empty_provider_result_is_an_empty_table() {
        let port = StubPort::new(Ok(Vec::new()));
        let table = service(port)
            .fetch_timings(&karachi(), &[3, 4])
            .await
            .expect("table");
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn timetable_maps_empty_to_notice() {
        let port = StubPort::new(Ok(Vec::new()));
        let err = service(port)
            .ramadan_timetable(&karachi())
            .await
            .expect_err("no rows");
        assert_eq!(err, FetchError::EmptyResult);
    }

    #[tokio::test]
    async fn timetable_uses_configured_months() {
        let port = StubPort::new(Ok(vec![raw("30-03-2025")]));
        let table = service(Arc::clone(&port))
            .ramadan_timetable(&karachi())
            .await
            .expect("table");
        assert_eq!(table.len(), 1);
        assert_eq!(
            port.queries().first().map(|query| query.months.clone()),
            Some(vec![3, 4])
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_passed_through() {
        let port = StubPort::new(Err(FetchError::UpstreamUnavailable(
            "HTTP status 500".to_owned(),
        )));
        let err = service(port)
            .ramadan_timetable(&karachi())
            .await
            .expect_err("failure");
        assert!(matches!(err, FetchError::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn incomplete_locality_never_reaches_provider() {
        let port = StubPort::new(Ok(vec![raw("01-03-2025")]));
        let err = service(Arc::clone(&port))
            .fetch_timings(&Locality::new("", "Pakistan"), &[3])
            .await
            .expect_err("rejected");
        assert!(matches!(err, FetchError::InvalidQuery(_)));
        assert!(port.queries().is_empty());
    }

    #[test]
    fn invalid_settings_are_rejected_at_construction() {
        let settings = CalendarSettings {
            sehri_offset_minutes: -16,
            ..CalendarSettings::default()
        };
        let result = SawmService::new(
            StubPort::new(Ok(Vec::new())),
            settings,
            LocalityCatalog::default(),
        );
        assert!(matches!(result, Err(FetchError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn malformed_provider_times_fail_the_cycle() {
        let port = StubPort::new(Ok(vec![RawTiming {
            date: "01-03-2025".to_owned(),
            raw_start: "dawn".to_owned(),
            raw_end: "18:25".to_owned(),
        }]));
        let err = service(port)
            .ramadan_timetable(&karachi())
            .await
            .expect_err("malformed");
        assert!(matches!(err, FetchError::MalformedUpstreamData(_)));
    }
}
