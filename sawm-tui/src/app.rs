use std::{cell::Cell, sync::Arc};

use sawm_core::{
    model::{Locality, TimingTable},
    ports::FetchError,
    service::SawmService,
};

/// Rows moved per page key on the dua screen.
const DUA_SCROLL_STEP: u16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    LocalitySelect,
    Timetable,
    Duas,
}

/// Which of the two selection lists receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    City,
    Country,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    /// Hard failure; no table is shown.
    Error(String),
    /// Request worked but nothing matched.
    NoData(String),
}

impl Notice {
    pub(crate) fn from_error(err: &FetchError) -> Self {
        if err.is_empty_result() {
            Self::NoData(err.user_notice())
        } else {
            Self::Error(err.user_notice())
        }
    }

    pub(crate) fn message(&self) -> &str {
        match self {
            Self::Error(message) | Self::NoData(message) => message,
        }
    }
}

pub(crate) struct App {
    pub service: Arc<SawmService>,

    pub screen: Screen,
    pub return_screen: Screen,

    pub focus: Focus,
    pub city_index: usize,
    pub country_index: usize,

    pub requested: Option<Locality>,
    pub table: Option<TimingTable>,
    pub row_index: usize,

    pub dua_index: usize,
    pub expanded: Vec<bool>,
    pub dua_scroll: u16,
    /// Furthest useful scroll offset, recorded on every draw of the dua screen.
    pub dua_scroll_max: Cell<u16>,

    pub is_loading: bool,
    pub notice: Option<Notice>,
}

impl App {
    pub(crate) fn new(service: Arc<SawmService>) -> Self {
        let expanded = vec![false; service.dua_groups().len()];
        Self {
            service,
            screen: Screen::LocalitySelect,
            return_screen: Screen::LocalitySelect,
            focus: Focus::City,
            city_index: 0,
            country_index: 0,
            requested: None,
            table: None,
            row_index: 0,
            dua_index: 0,
            expanded,
            dua_scroll: 0,
            dua_scroll_max: Cell::new(0),
            is_loading: false,
            notice: None,
        }
    }

    /// Preselect list entries by name; unknown names keep the first entry.
    pub(crate) fn preselect(&mut self, city: Option<&str>, country: Option<&str>) {
        let catalog = self.service.catalog();
        if let Some(index) = city.and_then(|name| position(&catalog.cities, name)) {
            self.city_index = index;
        }
        if let Some(index) = country.and_then(|name| position(&catalog.countries, name)) {
            self.country_index = index;
        }
    }

    pub(crate) fn selected_locality(&self) -> Option<Locality> {
        self.service
            .catalog()
            .locality(self.city_index, self.country_index)
    }

    pub(crate) fn move_selection(&mut self, down: bool) {
        match self.screen {
            Screen::LocalitySelect => {
                let catalog = self.service.catalog();
                match self.focus {
                    Focus::City => {
                        self.city_index = step(self.city_index, catalog.cities.len(), down);
                    }
                    Focus::Country => {
                        self.country_index =
                            step(self.country_index, catalog.countries.len(), down);
                    }
                }
            }
            Screen::Timetable => {
                let len = self.table.as_ref().map_or(0, TimingTable::len);
                self.row_index = step(self.row_index, len, down);
            }
            Screen::Duas => {
                self.dua_index = step(self.dua_index, self.expanded.len(), down);
            }
        }
    }

    pub(crate) fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::City => Focus::Country,
            Focus::Country => Focus::City,
        };
    }

    pub(crate) fn toggle_current_dua(&mut self) {
        if let Some(open) = self.expanded.get_mut(self.dua_index) {
            *open = !*open;
        }
    }

    pub(crate) fn scroll_duas(&mut self, down: bool) {
        self.dua_scroll = if down {
            self.dua_scroll
                .saturating_add(DUA_SCROLL_STEP)
                .min(self.dua_scroll_max.get())
        } else {
            self.dua_scroll.saturating_sub(DUA_SCROLL_STEP)
        };
    }

    pub(crate) fn open_duas(&mut self) {
        if self.screen != Screen::Duas {
            self.return_screen = self.screen;
            self.screen = Screen::Duas;
        }
    }

    pub(crate) fn close_duas(&mut self) {
        self.screen = self.return_screen;
    }

    pub(crate) fn begin_fetch(&mut self, locality: Locality) {
        self.requested = Some(locality);
        self.table = None;
        self.row_index = 0;
        self.notice = None;
        self.is_loading = true;
        self.screen = Screen::Timetable;
    }

    pub(crate) fn finish_fetch(&mut self, result: Result<TimingTable, FetchError>) {
        self.is_loading = false;
        match result {
            Ok(table) => {
                self.table = Some(table);
                self.notice = None;
            }
            Err(err) => {
                self.table = None;
                self.notice = Some(Notice::from_error(&err));
            }
        }
    }
}

fn position(names: &[String], wanted: &str) -> Option<usize> {
    names
        .iter()
        .position(|name| name.eq_ignore_ascii_case(wanted.trim()))
}

fn step(index: usize, len: usize, down: bool) -> usize {
    if down {
        if index + 1 < len { index + 1 } else { index }
    } else {
        index.saturating_sub(1)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use sawm_core::{
        CalendarQuery, CalendarSettings, Locality, LocalityCatalog, RawTiming, SourceId,
        SourceMeta, TimingsPort,
    };

    use super::*;

    struct OfflinePort(SourceMeta);

    #[async_trait]
    impl TimingsPort for OfflinePort {
        fn source(&self) -> &SourceMeta {
            &self.0
        }

        async fn fetch_raw(
            &self,
            _locality: &Locality,
            _query: &CalendarQuery,
        ) -> Result<Vec<RawTiming>, FetchError> {
            Ok(Vec::new())
        }
    }

    pub(crate) fn test_app() -> App {
        let port = Arc::new(OfflinePort(SourceMeta {
            id: SourceId("offline".to_owned()),
            name: "Offline".to_owned(),
        }));
        let service = SawmService::new(
            port,
            CalendarSettings::default(),
            LocalityCatalog::default(),
        )
        .expect("default settings are valid");
        App::new(Arc::new(service))
    }

    #[test]
    fn preselect_matches_names_case_insensitively() {
        let mut app = test_app();
        app.preselect(Some("london"), Some("United Kingdom"));
        assert_eq!(
            app.selected_locality(),
            Some(Locality::new("London", "United Kingdom"))
        );

        app.preselect(Some("Atlantis"), None);
        assert_eq!(app.city_index, 11);
    }

    #[test]
    fn selection_stays_within_lists() {
        let mut app = test_app();
        app.move_selection(false);
        assert_eq!(app.city_index, 0);
        for _ in 0..20 {
            app.move_selection(true);
        }
        assert_eq!(app.city_index, 11);

        app.toggle_focus();
        app.move_selection(true);
        assert_eq!(app.country_index, 1);
        assert_eq!(app.city_index, 11);
    }

    #[test]
    fn failed_fetch_clears_table_and_sets_notice() {
        let mut app = test_app();
        app.begin_fetch(Locality::new("Karachi", "Pakistan"));
        assert!(app.is_loading);
        assert_eq!(app.screen, Screen::Timetable);

        app.finish_fetch(Err(FetchError::EmptyResult));
        assert!(!app.is_loading);
        assert!(app.table.is_none());
        assert!(matches!(app.notice, Some(Notice::NoData(_))));

        app.finish_fetch(Err(FetchError::UpstreamUnavailable("HTTP status 500".into())));
        assert!(matches!(app.notice, Some(Notice::Error(_))));
    }

    #[test]
    fn dua_scroll_stays_within_rendered_text() {
        let mut app = test_app();
        app.dua_scroll_max.set(7);

        app.scroll_duas(true);
        assert_eq!(app.dua_scroll, 5);
        app.scroll_duas(true);
        assert_eq!(app.dua_scroll, 7);
        app.scroll_duas(false);
        assert_eq!(app.dua_scroll, 2);
        app.scroll_duas(false);
        assert_eq!(app.dua_scroll, 0);
    }

    #[test]
    fn duas_return_to_previous_screen() {
        let mut app = test_app();
        app.screen = Screen::Timetable;
        app.open_duas();
        assert_eq!(app.screen, Screen::Duas);
        app.toggle_current_dua();
        assert_eq!(app.expanded, [true, false]);
        app.close_duas();
        assert_eq!(app.screen, Screen::Timetable);
    }
}
