//! Resolves a user's administrative selection into a flat list of named
//! coordinates.
//!
//! Exactly one branch of the selection is honored, in fixed precedence
//! order: sub-divisions, then divisions, then countries. The branches are
//! never merged, so a UI that carries stale state in a coarser field
//! cannot duplicate locations. Names that the gazetteer does not know
//! simply contribute nothing; the resolution pass never fails.

use crate::gazetteer::lookup::AdminGazetteer;
use crate::types::location::NamedLocation;
use std::collections::BTreeMap;

/// The user's location selection, in up to three mutually exclusive
/// shapes.
///
/// # Examples
///
/// ```
/// use afrigrid::{AdminGazetteer, Selection};
///
/// let selection = Selection::default()
///     .divisions("Nigeria", ["Lagos", "Kano"])
///     .divisions("Kenya", ["Nairobi"]);
/// let locations = selection.resolve(AdminGazetteer::embedded());
/// assert_eq!(locations.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    countries: Vec<String>,
    divisions: BTreeMap<String, Vec<String>>,
    sub_divisions: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl Selection {
    /// Selects whole countries; each resolves to its capital.
    pub fn countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries
            .extend(countries.into_iter().map(Into::into));
        self
    }

    /// Selects divisions within a country. Takes precedence over any
    /// country selection.
    pub fn divisions<I, S>(mut self, country: impl Into<String>, divisions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.divisions
            .entry(country.into())
            .or_default()
            .extend(divisions.into_iter().map(Into::into));
        self
    }

    /// Selects sub-divisions within a division. Takes precedence over
    /// everything else.
    pub fn sub_divisions<I, S>(
        mut self,
        country: impl Into<String>,
        division: impl Into<String>,
        sub_divisions: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sub_divisions
            .entry(country.into())
            .or_default()
            .entry(division.into())
            .or_default()
            .extend(sub_divisions.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty() && self.divisions.is_empty() && self.sub_divisions.is_empty()
    }

    /// Resolves this selection against a gazetteer.
    ///
    /// Precedence is strict: if any sub-divisions are selected only they
    /// are resolved; otherwise divisions; otherwise countries. Unknown
    /// names are dropped silently.
    pub fn resolve(&self, gazetteer: &AdminGazetteer) -> Vec<NamedLocation> {
        let mut locations = Vec::new();

        if !self.sub_divisions.is_empty() {
            for (country, divisions) in &self.sub_divisions {
                for (division, subs) in divisions {
                    for sub in subs {
                        if let Some(coordinate) =
                            gazetteer.sub_division_coordinate(country, division, sub)
                        {
                            locations.push(NamedLocation::new(
                                coordinate,
                                format!("{sub}, {division}, {country}"),
                            ));
                        }
                    }
                }
            }
        } else if !self.divisions.is_empty() {
            for (country, divisions) in &self.divisions {
                for division in divisions {
                    if let Some(coordinate) = gazetteer.division_coordinate(country, division) {
                        locations
                            .push(NamedLocation::new(coordinate, format!("{division}, {country}")));
                    }
                }
            }
        } else {
            for country in &self.countries {
                if let Some(coordinate) = gazetteer.capital(country) {
                    locations.push(NamedLocation::new(coordinate, format!("{country} (Capital)")));
                }
            }
        }

        locations
    }
}
