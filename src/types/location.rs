//! Core coordinate value types shared by the gazetteer, resolver, sampler
//! and validator.

use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use afrigrid::LatLon;
///
/// let abuja = LatLon(9.0820, 8.6753);
/// assert_eq!(abuja.0, 9.0820); // Latitude
/// assert_eq!(abuja.1, 8.6753); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub fn latitude(&self) -> f64 {
        self.0
    }

    /// Longitude in decimal degrees (positive for East, negative for West).
    pub fn longitude(&self) -> f64 {
        self.1
    }
}

impl From<[f64; 2]> for LatLon {
    fn from(pair: [f64; 2]) -> Self {
        LatLon(pair[0], pair[1])
    }
}

/// A resolved location: a coordinate plus the display name shown to the user
/// and attached to exported result rows.
///
/// Produced by the resolver and the extractor; consumed by the fetch and
/// export collaborators. Plain value semantics, freely copyable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Human-readable name, e.g. `"Ikeja, Lagos, Nigeria"`.
    pub name: String,
}

impl NamedLocation {
    pub fn new(coordinate: LatLon, name: impl Into<String>) -> Self {
        Self {
            latitude: coordinate.0,
            longitude: coordinate.1,
            name: name.into(),
        }
    }

    /// The bare coordinate, for handing to a fetch collaborator.
    pub fn coordinate(&self) -> LatLon {
        LatLon(self.latitude, self.longitude)
    }
}
