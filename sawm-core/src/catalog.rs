//! Fixed lists of selectable cities and countries.

use serde::{Deserialize, Serialize};

use crate::model::Locality;

/// Cities offered in the selection list.
pub const DEFAULT_CITIES: [&str; 12] = [
    "Karachi",
    "Lahore",
    "Islamabad",
    "Mumbai",
    "Delhi",
    "Dhaka",
    "Istanbul",
    "Jeddah",
    "Makkah",
    "Madina",
    "New York",
    "London",
];

/// Countries offered in the selection list.
pub const DEFAULT_COUNTRIES: [&str; 7] = [
    "Pakistan",
    "India",
    "Bangladesh",
    "Turkey",
    "Saudi Arabia",
    "United States",
    "United Kingdom",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// The two enumerated lists a user picks a locality from.
///
/// Cities and countries are chosen independently; pairing them sensibly is
/// left to the user, and mismatches simply yield no data upstream.
pub struct LocalityCatalog {
    /// Selectable city names.
    pub cities: Vec<String>,
    /// Selectable country names.
    pub countries: Vec<String>,
}

impl Default for LocalityCatalog {
    fn default() -> Self {
        Self {
            cities: DEFAULT_CITIES.iter().map(|&city| city.to_owned()).collect(),
            countries: DEFAULT_COUNTRIES
                .iter()
                .map(|&country| country.to_owned())
                .collect(),
        }
    }
}

impl LocalityCatalog {
    /// Build the locality for a pair of list positions.
    #[must_use]
    pub fn locality(&self, city_index: usize, country_index: usize) -> Option<Locality> {
        let city = self.cities.get(city_index)?;
        let country = self.countries.get(country_index)?;
        Some(Locality::new(city.as_str(), country.as_str()))
    }

    /// Whether both lists have at least one entry.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.cities.is_empty() && !self.countries.is_empty()
    }
}
