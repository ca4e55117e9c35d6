//! Turns a collection of named geometries, whatever file format they were
//! parsed from, into a flat list of samplable locations.
//!
//! Point features pass through unchanged; polygon features are handed to
//! the grid sampler (or reduced to their centroid in legacy mode). Every
//! produced point remembers which feature it came from and carries the
//! feature's attributes.

use crate::sampling::grid::{sample_multi_polygon, sample_polygon, SamplingConfig};
use crate::types::geometry::{AttributeValue, Feature, Geometry};
use crate::types::location::LatLon;
use crate::types::sampling_point::SamplingPoint;
use geo::Centroid;
use log::warn;
use std::collections::BTreeMap;

/// Attribute keys that name a feature rather than describe it; they are
/// consumed by naming and not carried through as data.
const NAME_KEYS: [&str; 2] = ["name", "NAME"];

/// Options for one extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    /// Sample polygons with a grid (`true`, the default) or reduce each
    /// polygon to its centroid (legacy mode).
    pub use_sampling: bool,
    /// Explicit grid spacing in degrees; derived per polygon from its
    /// area when `None`. Floored at the configured minimum either way.
    pub spacing: Option<f64>,
    /// Ceiling on the total number of points produced across the whole
    /// call. Unlimited when `None`; when the ceiling is hit the result is
    /// marked truncated.
    pub max_total_points: Option<usize>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            use_sampling: true,
            spacing: None,
            max_total_points: None,
        }
    }
}

/// The outcome of one extraction call.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub points: Vec<SamplingPoint>,
    /// Features that produced no coordinate at all (empty MultiPoint,
    /// polygon with an undefined centroid).
    pub skipped: usize,
    /// `true` when `max_total_points` cut the output short.
    pub truncated: bool,
}

impl Extraction {
    /// Summary statistics over the produced points.
    pub fn summary(&self) -> ExtractionSummary {
        let sampling_points = self
            .points
            .iter()
            .filter(|p| p.is_sampling_point)
            .count();
        let polygon_count = {
            let mut parents: Vec<&str> = self
                .points
                .iter()
                .filter(|p| p.is_sampling_point)
                .map(|p| p.parent_id.as_str())
                .collect();
            parents.sort_unstable();
            parents.dedup();
            parents.len()
        };
        ExtractionSummary {
            total_points: self.points.len(),
            sampling_points,
            direct_points: self.points.len() - sampling_points,
            polygon_count,
            mean_points_per_polygon: if polygon_count > 0 {
                sampling_points as f64 / polygon_count as f64
            } else {
                0.0
            },
        }
    }
}

/// Headline numbers for an [`Extraction`], for display next to a map
/// preview before the user commits to a fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSummary {
    pub total_points: usize,
    /// Points generated by grid sampling.
    pub sampling_points: usize,
    /// Points taken directly from the source geometries.
    pub direct_points: usize,
    /// Distinct polygon features that contributed sampling points.
    pub polygon_count: usize,
    pub mean_points_per_polygon: f64,
}

/// Extracts samplable locations from a feature collection.
///
/// - `Point` features emit themselves, named by their `"name"`/`"NAME"`
///   attribute or `Location_{id}`, with their attributes attached.
/// - `MultiPoint` features degrade to their first member point (known
///   limitation, preserved for compatibility with the original portal).
/// - Polygon features are grid-sampled when `options.use_sampling` is
///   set, emitting one point per retained coordinate, named
///   `"{parent}_point_{n}"` (1-indexed) and carrying the parent's
///   attributes prefixed with `parent_`. With sampling off they emit
///   their centroid alone.
pub fn extract_locations(
    features: &[Feature],
    options: &ExtractOptions,
    config: &SamplingConfig,
) -> Extraction {
    let mut extraction = Extraction {
        points: Vec::new(),
        skipped: 0,
        truncated: false,
    };

    'features: for feature in features {
        let name = feature.display_name();
        let produced: Vec<SamplingPoint> = match &feature.geometry {
            Geometry::Point(point) => {
                vec![direct_point(feature, &name, LatLon(point.y(), point.x()))]
            }
            Geometry::MultiPoint(multi_point) => {
                // Only the first member survives; see Geometry::MultiPoint.
                match multi_point.0.first() {
                    Some(point) => {
                        vec![direct_point(feature, &name, LatLon(point.y(), point.x()))]
                    }
                    None => vec![],
                }
            }
            Geometry::Polygon(polygon) => {
                if options.use_sampling {
                    let coords = sample_polygon(polygon, options.spacing, true, config);
                    sampled_points(feature, &name, coords)
                } else {
                    centroid_point(feature, &name, polygon.centroid())
                }
            }
            Geometry::MultiPolygon(multi_polygon) => {
                if options.use_sampling {
                    let coords =
                        sample_multi_polygon(multi_polygon, options.spacing, true, config);
                    sampled_points(feature, &name, coords)
                } else {
                    centroid_point(feature, &name, multi_polygon.centroid())
                }
            }
        };

        if produced.is_empty() {
            extraction.skipped += 1;
            continue;
        }

        for point in produced {
            if let Some(cap) = options.max_total_points {
                if extraction.points.len() >= cap {
                    extraction.truncated = true;
                    break 'features;
                }
            }
            extraction.points.push(point);
        }
    }

    if extraction.truncated {
        warn!(
            "Extraction truncated at {} points; remaining features dropped",
            extraction.points.len()
        );
    }
    if extraction.skipped > 0 {
        warn!(
            "{} feature(s) produced no coordinates and were skipped",
            extraction.skipped
        );
    }

    extraction
}

/// A point taken directly from the source geometry; attributes carried
/// through unprefixed.
fn direct_point(feature: &Feature, name: &str, coordinate: LatLon) -> SamplingPoint {
    SamplingPoint {
        name: name.to_string(),
        latitude: coordinate.0,
        longitude: coordinate.1,
        parent_name: name.to_string(),
        parent_kind: feature.geometry.kind(),
        parent_id: feature.id.clone(),
        is_sampling_point: false,
        attributes: data_attributes(feature, None),
    }
}

/// Grid-sampled points for one polygon feature; attributes prefixed
/// `parent_`.
fn sampled_points(feature: &Feature, name: &str, coords: Vec<LatLon>) -> Vec<SamplingPoint> {
    let attributes = data_attributes(feature, Some("parent_"));
    coords
        .into_iter()
        .enumerate()
        .map(|(i, coordinate)| SamplingPoint {
            name: format!("{}_point_{}", name, i + 1),
            latitude: coordinate.0,
            longitude: coordinate.1,
            parent_name: name.to_string(),
            parent_kind: feature.geometry.kind(),
            parent_id: feature.id.clone(),
            is_sampling_point: true,
            attributes: attributes.clone(),
        })
        .collect()
}

/// Legacy centroid-only representation of a polygon feature.
fn centroid_point(
    feature: &Feature,
    name: &str,
    centroid: Option<geo::Point<f64>>,
) -> Vec<SamplingPoint> {
    match centroid {
        Some(point) => vec![direct_point(feature, name, LatLon(point.y(), point.x()))],
        None => vec![],
    }
}

fn data_attributes(
    feature: &Feature,
    prefix: Option<&str>,
) -> BTreeMap<String, AttributeValue> {
    feature
        .attributes
        .iter()
        .filter(|(key, _)| !NAME_KEYS.contains(&key.as_str()))
        .map(|(key, value)| {
            let key = match prefix {
                Some(prefix) => format!("{prefix}{key}"),
                None => key.clone(),
            };
            (key, value.clone())
        })
        .collect()
}
