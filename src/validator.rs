//! Sanity-checks a resolved location list against a continental bounding
//! box before any fetch is attempted.
//!
//! The check is advisory: a failing report tells the caller that some
//! coordinates look wrong (a shapefile in a projected CRS, a swapped
//! lat/lon pair), but whether to warn the user or abort is the caller's
//! decision.

use crate::types::location::NamedLocation;
use log::warn;

/// How many offending locations a report names before summarizing the
/// rest as a count.
const MAX_LISTED_OFFENDERS: usize = 5;

/// A geographic bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl GeoBounds {
    /// Continental Africa, generously drawn.
    pub const AFRICA: GeoBounds = GeoBounds {
        min_lat: -35.0,
        max_lat: 37.0,
        min_lon: -25.0,
        max_lon: 52.0,
    };

    /// Approximate bounds of Nigeria, for portals restricted to one
    /// country.
    pub const NIGERIA: GeoBounds = GeoBounds {
        min_lat: 4.0,
        max_lat: 14.0,
        min_lon: 2.5,
        max_lon: 15.0,
    };

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&latitude)
            && (self.min_lon..=self.max_lon).contains(&longitude)
    }
}

/// Result of a bounds validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundsReport {
    pub ok: bool,
    /// Empty when `ok`; otherwise names up to five offenders and counts
    /// the remainder.
    pub message: String,
    /// Total number of out-of-bounds locations.
    pub out_of_bounds: usize,
}

/// Checks every location against the bounding box.
///
/// # Examples
///
/// ```
/// use afrigrid::{validate_locations, GeoBounds, NamedLocation, LatLon};
///
/// let locations = vec![NamedLocation::new(LatLon(45.0, 10.0), "Milan")];
/// let report = validate_locations(&locations, &GeoBounds::AFRICA);
/// assert!(!report.ok);
/// ```
pub fn validate_locations(locations: &[NamedLocation], bounds: &GeoBounds) -> BoundsReport {
    let offenders: Vec<&NamedLocation> = locations
        .iter()
        .filter(|l| !bounds.contains(l.latitude, l.longitude))
        .collect();

    if offenders.is_empty() {
        return BoundsReport {
            ok: true,
            message: String::new(),
            out_of_bounds: 0,
        };
    }

    let listed: Vec<String> = offenders
        .iter()
        .take(MAX_LISTED_OFFENDERS)
        .map(|l| format!("{} ({}, {})", l.name, l.latitude, l.longitude))
        .collect();
    let mut message = format!(
        "{} of {} locations fall outside lat [{}, {}], lon [{}, {}]: {}",
        offenders.len(),
        locations.len(),
        bounds.min_lat,
        bounds.max_lat,
        bounds.min_lon,
        bounds.max_lon,
        listed.join("; "),
    );
    if offenders.len() > MAX_LISTED_OFFENDERS {
        message.push_str(&format!(
            " ... and {} more",
            offenders.len() - MAX_LISTED_OFFENDERS
        ));
    }

    warn!("{message}");

    BoundsReport {
        ok: false,
        message,
        out_of_bounds: offenders.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::location::LatLon;

    fn loc(lat: f64, lon: f64, name: &str) -> NamedLocation {
        NamedLocation::new(LatLon(lat, lon), name)
    }

    #[test]
    fn in_bounds_locations_pass() {
        let locations = vec![loc(6.5244, 3.3792, "Lagos"), loc(-1.2864, 36.8172, "Nairobi")];
        let report = validate_locations(&locations, &GeoBounds::AFRICA);
        assert!(report.ok);
        assert!(report.message.is_empty());
        assert_eq!(report.out_of_bounds, 0);
    }

    #[test]
    fn northern_latitude_is_rejected() {
        let report = validate_locations(&[loc(45.0, 10.0, "Milan")], &GeoBounds::AFRICA);
        assert!(!report.ok);
        assert_eq!(report.out_of_bounds, 1);
        assert!(report.message.contains("Milan"));
    }

    #[test]
    fn report_lists_at_most_five_offenders() {
        let locations: Vec<NamedLocation> = (0..8)
            .map(|i| loc(60.0 + i as f64, 10.0, &format!("Bad {i}")))
            .collect();
        let report = validate_locations(&locations, &GeoBounds::AFRICA);
        assert!(!report.ok);
        assert_eq!(report.out_of_bounds, 8);
        assert!(report.message.contains("Bad 4"));
        assert!(!report.message.contains("Bad 5"));
        assert!(report.message.contains("and 3 more"));
    }

    #[test]
    fn boundary_coordinates_are_inside() {
        let b = GeoBounds::AFRICA;
        assert!(b.contains(37.0, 52.0));
        assert!(b.contains(-35.0, -25.0));
        assert!(!b.contains(37.0001, 0.0));
    }

    #[test]
    fn nigeria_preset_is_tighter_than_africa() {
        // Nairobi is African but not Nigerian.
        assert!(GeoBounds::AFRICA.contains(-1.2864, 36.8172));
        assert!(!GeoBounds::NIGERIA.contains(-1.2864, 36.8172));
        assert!(GeoBounds::NIGERIA.contains(6.5244, 3.3792));
    }

    #[test]
    fn empty_location_list_passes() {
        let report = validate_locations(&[], &GeoBounds::AFRICA);
        assert!(report.ok);
    }
}
