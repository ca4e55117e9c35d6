//! The administrative gazetteer: static reference data mapping African
//! countries to capitals, divisions (States/Regions/Provinces/...) and
//! sub-divisions (LGAs, sub-counties, ...), with pure lookup functions
//! over it.
//!
//! The dataset ships embedded in the crate and is parsed exactly once into
//! a process-wide immutable structure; a JSON file with the same shape can
//! be supplied instead to override it.

use crate::gazetteer::error::GazetteerError;
use crate::types::location::LatLon;
use log::info;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

const EMBEDDED_DATA: &str = include_str!("africa.json");

/// Division-type label used when a country has no catalogued label.
const DEFAULT_DIVISION_TYPE: &str = "Region";

static EMBEDDED: LazyLock<Arc<AdminGazetteer>> = LazyLock::new(|| {
    Arc::new(AdminGazetteer::from_json_str(EMBEDDED_DATA).expect("embedded gazetteer dataset parses"))
});

/// On-disk / embedded shape of the dataset. Coordinates are
/// `[latitude, longitude]` pairs.
#[derive(Debug, Deserialize)]
struct RawGazetteer {
    #[serde(default)]
    division_types: BTreeMap<String, String>,
    capitals: BTreeMap<String, [f64; 2]>,
    #[serde(default)]
    divisions: BTreeMap<String, BTreeMap<String, [f64; 2]>>,
    #[serde(default)]
    sub_divisions: BTreeMap<String, BTreeMap<String, BTreeMap<String, [f64; 2]>>>,
}

#[derive(Debug, Clone)]
struct CountryRecord {
    capital: LatLon,
    division_type: Option<String>,
    divisions: BTreeMap<String, LatLon>,
    sub_divisions: BTreeMap<String, BTreeMap<String, LatLon>>,
}

/// Immutable name-to-coordinate reference data for African administrative
/// locations.
///
/// All lookups are pure functions over in-memory maps: no I/O, no interior
/// mutability, safe to share across threads. Unknown names yield `None` or
/// an empty list, never an error.
///
/// # Examples
///
/// ```
/// use afrigrid::AdminGazetteer;
///
/// let gazetteer = AdminGazetteer::embedded();
/// assert_eq!(gazetteer.division_type("Nigeria"), "State");
/// assert!(gazetteer.capital("Nigeria").is_some());
/// assert!(gazetteer.capital("Atlantis").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AdminGazetteer {
    countries: BTreeMap<String, CountryRecord>,
}

impl AdminGazetteer {
    /// The dataset embedded in the crate, parsed on first use and shared
    /// for the lifetime of the process.
    pub fn embedded() -> &'static AdminGazetteer {
        &EMBEDDED
    }

    /// A shared handle to the embedded dataset, for holders that also
    /// accept an owned replacement dataset.
    pub(crate) fn embedded_shared() -> Arc<AdminGazetteer> {
        Arc::clone(&EMBEDDED)
    }

    /// Parses a gazetteer from a JSON string with the embedded dataset's
    /// shape (`division_types`, `capitals`, `divisions`, `sub_divisions`).
    pub fn from_json_str(data: &str) -> Result<Self, GazetteerError> {
        let raw: RawGazetteer = serde_json::from_str(data)?;
        Ok(Self::from_raw(raw))
    }

    /// Reads a gazetteer from a JSON file, for deployments that maintain
    /// their own location dataset.
    pub fn from_json_file(path: &Path) -> Result<Self, GazetteerError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| GazetteerError::FileRead(path.to_path_buf(), e))?;
        let gazetteer = Self::from_json_str(&data)?;
        info!(
            "Loaded gazetteer from {}: {} countries",
            path.display(),
            gazetteer.countries.len()
        );
        Ok(gazetteer)
    }

    fn from_raw(mut raw: RawGazetteer) -> Self {
        let countries = raw
            .capitals
            .into_iter()
            .map(|(name, capital)| {
                let divisions = raw
                    .divisions
                    .remove(&name)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(division, pair)| (division, LatLon::from(pair)))
                    .collect();
                let sub_divisions = raw
                    .sub_divisions
                    .remove(&name)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(division, subs)| {
                        let subs = subs
                            .into_iter()
                            .map(|(sub, pair)| (sub, LatLon::from(pair)))
                            .collect();
                        (division, subs)
                    })
                    .collect();
                let record = CountryRecord {
                    capital: LatLon::from(capital),
                    division_type: raw.division_types.remove(&name),
                    divisions,
                    sub_divisions,
                };
                (name, record)
            })
            .collect();
        Self { countries }
    }

    /// All catalogued country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        self.countries.keys().map(String::as_str).collect()
    }

    /// The label this country uses for its primary administrative division
    /// (`"State"`, `"Region"`, `"Province"`, ...). Defaults to `"Region"`
    /// for countries without a catalogued label.
    pub fn division_type(&self, country: &str) -> &str {
        self.countries
            .get(country)
            .and_then(|c| c.division_type.as_deref())
            .unwrap_or(DEFAULT_DIVISION_TYPE)
    }

    /// The capital-city coordinate for a country, or `None` if the country
    /// is not catalogued.
    pub fn capital(&self, country: &str) -> Option<LatLon> {
        self.countries.get(country).map(|c| c.capital)
    }

    /// The catalogued division names for a country, sorted. Empty when the
    /// country has no division table.
    pub fn divisions(&self, country: &str) -> Vec<&str> {
        self.countries
            .get(country)
            .map(|c| c.divisions.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The coordinate of one division within a country.
    pub fn division_coordinate(&self, country: &str, division: &str) -> Option<LatLon> {
        self.countries
            .get(country)?
            .divisions
            .get(division)
            .copied()
    }

    /// The catalogued sub-division names (LGAs, sub-counties, districts)
    /// for a division, sorted. Empty when none are catalogued.
    pub fn sub_divisions(&self, country: &str, division: &str) -> Vec<&str> {
        self.countries
            .get(country)
            .and_then(|c| c.sub_divisions.get(division))
            .map(|subs| subs.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The coordinate of one sub-division.
    pub fn sub_division_coordinate(
        &self,
        country: &str,
        division: &str,
        sub_division: &str,
    ) -> Option<LatLon> {
        self.countries
            .get(country)?
            .sub_divisions
            .get(division)?
            .get(sub_division)
            .copied()
    }
}
