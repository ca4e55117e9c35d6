//! This module provides the main entry point for the location side of a
//! weather-data portal: resolving administrative selections, extracting
//! sampling points from uploaded geometries, annotating coordinates with
//! the nearest known place, and sanity-checking location sets before a
//! fetch.

use crate::error::AfrigridError;
use crate::gazetteer::lookup::AdminGazetteer;
use crate::gazetteer::place_index::{Place, PlaceIndex, PlaceLevel};
use crate::resolver::Selection;
use crate::sampling::extractor::{extract_locations, ExtractOptions, Extraction};
use crate::sampling::grid::SamplingConfig;
use crate::types::geometry::Feature;
use crate::types::location::{LatLon, NamedLocation};
use crate::validator::{validate_locations, BoundsReport, GeoBounds};
use bon::bon;
use std::path::Path;
use std::sync::{Arc, LazyLock};

static EMBEDDED_INDEX: LazyLock<Arc<PlaceIndex>> =
    LazyLock::new(|| Arc::new(PlaceIndex::from_gazetteer(AdminGazetteer::embedded())));

/// The main entry point for location resolution and polygon sampling.
///
/// Bundles the gazetteer, its spatial index, the sampling tunables and the
/// validation bounds behind one API. All operations are synchronous pure
/// computations over immutable data; a single `Afrigrid` can be shared
/// freely across threads.
///
/// # Examples
///
/// ```
/// use afrigrid::{Afrigrid, Selection};
///
/// let portal = Afrigrid::new();
/// let locations = portal.resolve(
///     &Selection::default().divisions("Nigeria", ["Lagos"]),
/// );
/// assert_eq!(locations[0].name, "Lagos, Nigeria");
/// ```
#[derive(Debug, Clone)]
pub struct Afrigrid {
    gazetteer: Arc<AdminGazetteer>,
    index: Arc<PlaceIndex>,
    sampling: SamplingConfig,
    bounds: GeoBounds,
}

#[bon]
impl Afrigrid {
    /// Creates a portal backed by the embedded African gazetteer, with
    /// default sampling tunables and continental validation bounds.
    ///
    /// Every portal created this way shares the one process-wide parsed
    /// dataset and its spatial index, so construction is cheap.
    pub fn new() -> Self {
        Self {
            gazetteer: AdminGazetteer::embedded_shared(),
            index: Arc::clone(&EMBEDDED_INDEX),
            sampling: SamplingConfig::default(),
            bounds: GeoBounds::AFRICA,
        }
    }

    /// Creates a portal backed by a gazetteer loaded from a JSON file,
    /// for deployments maintaining their own location dataset.
    ///
    /// # Errors
    ///
    /// Returns [`AfrigridError::Gazetteer`] when the file cannot be read
    /// or does not parse.
    pub fn with_gazetteer_file(path: &Path) -> Result<Self, AfrigridError> {
        let gazetteer = Arc::new(AdminGazetteer::from_json_file(path)?);
        let index = Arc::new(PlaceIndex::from_gazetteer(&gazetteer));
        Ok(Self {
            gazetteer,
            index,
            sampling: SamplingConfig::default(),
            bounds: GeoBounds::AFRICA,
        })
    }

    /// Replaces the sampling tunables.
    pub fn with_sampling_config(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Replaces the validation bounding box.
    pub fn with_bounds(mut self, bounds: GeoBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// The gazetteer backing this portal, for populating selection UIs
    /// (country lists, division names and labels).
    pub fn gazetteer(&self) -> &AdminGazetteer {
        &self.gazetteer
    }

    /// Resolves an administrative selection to named coordinates. See
    /// [`Selection::resolve`] for the precedence rule.
    pub fn resolve(&self, selection: &Selection) -> Vec<NamedLocation> {
        selection.resolve(&self.gazetteer)
    }

    /// Extracts samplable locations from a parsed geometry collection.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.features(&[Feature])`: **Required.** The geometry collection.
    /// * `.use_sampling(bool)`: Optional. Grid-sample polygons (default
    ///   `true`) or reduce them to centroids.
    /// * `.spacing(f64)`: Optional. Explicit grid spacing in degrees;
    ///   derived per polygon when absent, floored at the configured
    ///   minimum either way.
    /// * `.max_total_points(usize)`: Optional. Ceiling across the whole
    ///   call; the result is marked truncated when hit.
    ///
    /// # Examples
    ///
    /// ```
    /// use afrigrid::{Afrigrid, Feature, Geometry};
    /// use geo::{LineString, Polygon};
    ///
    /// let portal = Afrigrid::new();
    /// let square = Polygon::new(
    ///     LineString::from(vec![(3.0, 6.0), (4.0, 6.0), (4.0, 7.0), (3.0, 7.0), (3.0, 6.0)]),
    ///     vec![],
    /// );
    /// let features = vec![
    ///     Feature::new("0", Geometry::Polygon(square)).with_attribute("name", "Block"),
    /// ];
    /// let extraction = portal.extract().features(&features).call();
    /// assert!(!extraction.points.is_empty());
    /// ```
    #[builder]
    pub fn extract(
        &self,
        features: &[Feature],
        use_sampling: Option<bool>,
        spacing: Option<f64>,
        max_total_points: Option<usize>,
    ) -> Extraction {
        let options = ExtractOptions {
            use_sampling: use_sampling.unwrap_or(true),
            spacing,
            max_total_points,
        };
        extract_locations(features, &options, &self.sampling)
    }

    /// Finds the known administrative places closest to a coordinate,
    /// nearest first.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The query coordinate.
    /// * `.limit(usize)`: Optional. Maximum number of places. Defaults to `5`.
    /// * `.max_distance_km(f64)`: Optional. Search radius. Defaults to `250.0`.
    /// * `.level(PlaceLevel)`: Optional. Restrict results to one
    ///   administrative level.
    #[builder]
    pub fn nearest_places(
        &self,
        location: LatLon,
        limit: Option<usize>,
        max_distance_km: Option<f64>,
        level: Option<PlaceLevel>,
    ) -> Vec<(Place, f64)> {
        let limit = limit.unwrap_or(5);
        let max_distance_km = max_distance_km.unwrap_or(250.0);
        self.index
            .nearest(location.0, location.1, limit, max_distance_km, level)
    }

    /// Checks a location list against this portal's bounding box.
    /// Advisory: see [`validate_locations`].
    pub fn validate(&self, locations: &[NamedLocation]) -> BoundsReport {
        validate_locations(locations, &self.bounds)
    }
}

impl Default for Afrigrid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::geometry::Geometry;
    use geo::{LineString, Point, Polygon};

    #[test]
    fn resolve_division_end_to_end() {
        let portal = Afrigrid::new();
        let locations =
            portal.resolve(&Selection::default().divisions("Nigeria", ["Lagos"]));
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].latitude, 6.5244);
        assert_eq!(locations[0].longitude, 3.3792);
        assert_eq!(locations[0].name, "Lagos, Nigeria");

        // The whole resolved set is valid African territory.
        assert!(portal.validate(&locations).ok);
    }

    #[test]
    fn extract_and_validate_uploaded_geometries() {
        let portal = Afrigrid::new();
        let square = Polygon::new(
            LineString::from(vec![
                (3.0, 6.0),
                (4.0, 6.0),
                (4.0, 7.0),
                (3.0, 7.0),
                (3.0, 6.0),
            ]),
            vec![],
        );
        let features = vec![
            Feature::new("0", Geometry::Point(Point::new(36.8172, -1.2864)))
                .with_attribute("name", "Nairobi Station"),
            Feature::new("1", Geometry::Polygon(square)).with_attribute("name", "Lagos Block"),
        ];

        let extraction = portal.extract().features(&features).call();
        assert!(extraction.points.len() >= 2);

        let locations: Vec<_> = extraction
            .points
            .iter()
            .map(|p| p.to_named_location())
            .collect();
        assert!(portal.validate(&locations).ok);
    }

    #[test]
    fn nearest_places_defaults() {
        let portal = Afrigrid::new();
        let results = portal
            .nearest_places()
            .location(LatLon(6.5964, 3.3431))
            .call();
        assert!(!results.is_empty());
        assert!(results.len() <= 5);
        assert_eq!(results[0].0.name, "Ikeja, Lagos, Nigeria");
    }

    #[test]
    fn portals_share_the_embedded_dataset_and_index() {
        let a = Afrigrid::new();
        let b = Afrigrid::new();
        assert!(Arc::ptr_eq(&a.gazetteer, &b.gazetteer));
        assert!(Arc::ptr_eq(&a.index, &b.index));

        let clone = a.clone();
        assert!(Arc::ptr_eq(&a.gazetteer, &clone.gazetteer));
    }

    #[test]
    fn custom_bounds_flag_out_of_country_points() {
        let portal = Afrigrid::new().with_bounds(GeoBounds::NIGERIA);
        let locations =
            portal.resolve(&Selection::default().countries(["Kenya"]));
        let report = portal.validate(&locations);
        assert!(!report.ok);
        assert_eq!(report.out_of_bounds, 1);
    }
}
