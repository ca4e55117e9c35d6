//! The per-extraction output record tying a coordinate back to the feature
//! it came from.

use crate::types::geometry::{AttributeValue, GeometryKind};
use crate::types::location::{LatLon, NamedLocation};
use serde::Serialize;
use std::collections::BTreeMap;

/// One location produced by geometry extraction.
///
/// For a `Point` feature this is the point itself (`is_sampling_point:
/// false`); for a polygon feature under grid sampling it is one lattice
/// point or the centroid (`is_sampling_point: true`), named
/// `"{parent}_point_{n}"` and carrying the parent's attributes prefixed
/// with `parent_`.
///
/// Sampling points are transient: they exist for the duration of one fetch
/// request and are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingPoint {
    /// Display name, e.g. `"Kano Ward_point_3"`.
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Name of the feature this point represents.
    pub parent_name: String,
    /// Shape of the source geometry.
    pub parent_kind: GeometryKind,
    /// Identifier of the source feature.
    pub parent_id: String,
    /// `true` when the point was generated by grid sampling rather than
    /// taken directly from the source geometry.
    pub is_sampling_point: bool,
    /// Feature attributes carried through (keys prefixed `parent_` for
    /// sampled points, unprefixed for direct points).
    pub attributes: BTreeMap<String, AttributeValue>,
}

impl SamplingPoint {
    pub fn coordinate(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }

    /// Flattens this point into the [`NamedLocation`] shape the fetch and
    /// export collaborators consume.
    pub fn to_named_location(&self) -> NamedLocation {
        NamedLocation {
            latitude: self.latitude,
            longitude: self.longitude,
            name: self.name.clone(),
        }
    }
}
