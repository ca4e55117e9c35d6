//! The parsed-geometry contract between the crate and external shapefile/KML
//! readers: a sequence of identified [`Feature`]s, each carrying a geometry
//! in WGS84 (longitude, latitude) vertex order and an open attribute map.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A geometry supplied by a shapefile/KML reader, in WGS84.
///
/// Vertex order inside polygons follows the GIS convention of
/// (longitude, latitude); the crate converts to latitude-first [`LatLon`]
/// values on the way out.
///
/// [`LatLon`]: crate::LatLon
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(geo::Point<f64>),
    /// Degrades to its first member point during extraction. Known
    /// limitation carried over from the upstream portal behavior; an empty
    /// `MultiPoint` contributes nothing and is counted as skipped.
    MultiPoint(geo::MultiPoint<f64>),
    Polygon(geo::Polygon<f64>),
    MultiPolygon(geo::MultiPolygon<f64>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }
}

/// Tag identifying the shape of a [`Geometry`], carried on every
/// [`SamplingPoint`] so consumers can tell direct points from sampled ones.
///
/// [`SamplingPoint`]: crate::SamplingPoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    Polygon,
    MultiPolygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        };
        f.write_str(label)
    }
}

/// A scalar attribute value attached to a feature.
///
/// Shapefile DBF columns and KML extended data reduce to strings, numbers
/// and booleans; everything is carried through extraction untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// One named geometry record handed over by a geometry-source collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Stable identifier within the source file (FID, placemark id, row
    /// index rendered as text).
    pub id: String,
    pub geometry: Geometry,
    /// Open attribute map. A `"name"` or `"NAME"` entry, when present,
    /// names the feature; otherwise a `Location_{id}` name is synthesized.
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl Feature {
    pub fn new(id: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The display name for this feature: the `"name"` attribute, falling
    /// back to `"NAME"`, falling back to `Location_{id}`.
    pub fn display_name(&self) -> String {
        for key in ["name", "NAME"] {
            if let Some(AttributeValue::Text(name)) = self.attributes.get(key) {
                return name.clone();
            }
        }
        format!("Location_{}", self.id)
    }
}
