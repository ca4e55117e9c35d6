//! Grid generation over arbitrary polygons.
//!
//! Instead of representing a polygon by its centroid alone, a regular
//! lattice is laid over the polygon's bounding box and the lattice points
//! that fall inside the polygon are kept, so that weather conditions are
//! sampled across the whole shape. Lattice density adapts to polygon area
//! and is bounded below by a minimum spacing so very large polygons cannot
//! explode the point count.

use crate::types::location::LatLon;
use geo::{BoundingRect, Centroid, Contains, MultiPolygon, Point, Polygon};

/// Kilometers per degree of latitude (and of longitude at the equator).
const KM_PER_DEGREE: f64 = 111.0;

/// Bounding-box area overestimates an irregular polygon; scale it down.
const SHAPE_COVERAGE_FACTOR: f64 = 0.7;

/// Tunables for grid sampling density.
///
/// The defaults match the portal's behavior: between 4 and 100 sampling
/// points per polygon, never spaced closer than 0.05° (≈5.5 km).
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingConfig {
    /// Minimum target number of sampling points per polygon.
    pub min_points: usize,
    /// Maximum target number of sampling points per polygon.
    pub max_points: usize,
    /// Lower bound on grid spacing, in degrees.
    pub min_spacing_deg: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            min_points: 4,
            max_points: 100,
            min_spacing_deg: 0.05,
        }
    }
}

/// Derives a grid spacing (in degrees) from a polygon's approximate area.
///
/// The target point count scales with area in three bands (one point per
/// 10 km² below 100 km², per 50 km² up to 1000 km², per 500 km² above),
/// clamped to `[min_points, max_points]`. Spacing is then the side of a
/// square holding one target point, converted to degrees and floored at
/// `min_spacing_deg`. A heuristic density control, not a guarantee of an
/// exact point count.
///
/// Pure function: identical inputs always produce identical spacing.
pub fn grid_spacing_for(area_km2: f64, config: &SamplingConfig) -> f64 {
    let raw_target = if area_km2 < 100.0 {
        area_km2 / 10.0
    } else if area_km2 < 1000.0 {
        area_km2 / 50.0
    } else {
        area_km2 / 500.0
    };
    let target_points = (raw_target as usize).clamp(config.min_points, config.max_points);

    let spacing_km = (area_km2 / target_points as f64).sqrt();
    let spacing_deg = spacing_km / KM_PER_DEGREE;
    spacing_deg.max(config.min_spacing_deg)
}

/// Generates sampling coordinates for a polygon.
///
/// Lays a lattice over the bounding box at `spacing` degrees (derived from
/// the polygon's area via [`grid_spacing_for`] when `None`; either way
/// floored at the configured `min_spacing_deg`), keeps the
/// lattice points contained in the polygon, and appends the centroid when
/// `include_centroid` is set and the centroid is not already a lattice
/// point. A polygon too small to contain any lattice point yields its
/// centroid alone, so a non-degenerate polygon never yields zero points.
///
/// Returned coordinates are latitude-first.
pub fn sample_polygon(
    polygon: &Polygon<f64>,
    spacing: Option<f64>,
    include_centroid: bool,
    config: &SamplingConfig,
) -> Vec<LatLon> {
    let Some(bounds) = polygon.bounding_rect() else {
        // No exterior ring at all; nothing to sample.
        return Vec::new();
    };
    let (min_lon, min_lat) = (bounds.min().x, bounds.min().y);
    let (max_lon, max_lat) = (bounds.max().x, bounds.max().y);

    // Approximate area from the bounding box: 1° of latitude is ~111 km,
    // 1° of longitude is ~111 km scaled by cos(latitude).
    let center_lat = (min_lat + max_lat) / 2.0;
    let width_km = (max_lon - min_lon) * KM_PER_DEGREE * center_lat.to_radians().cos();
    let height_km = (max_lat - min_lat) * KM_PER_DEGREE;
    let area_km2 = width_km * height_km * SHAPE_COVERAGE_FACTOR;

    // The floor applies to caller-supplied spacing too; below it the
    // lattice size is unbounded, and a non-positive value would stall
    // the loops below.
    let spacing = spacing
        .unwrap_or_else(|| grid_spacing_for(area_km2, config))
        .max(config.min_spacing_deg);

    let mut points = Vec::new();
    let mut lat = min_lat;
    while lat < max_lat {
        let mut lon = min_lon;
        while lon < max_lon {
            if polygon.contains(&Point::new(lon, lat)) {
                points.push(LatLon(lat, lon));
            }
            lon += spacing;
        }
        lat += spacing;
    }

    let centroid = polygon.centroid().map(|c| LatLon(c.y(), c.x()));

    if include_centroid {
        if let Some(centroid) = centroid {
            if !points.contains(&centroid) {
                points.push(centroid);
            }
        }
    }

    // Sub-cell polygon: fall back to the centroid alone.
    if points.is_empty() {
        if let Some(centroid) = centroid {
            points.push(centroid);
        }
    }

    points
}

/// Generates sampling coordinates for a multi-polygon.
///
/// Each member polygon is sampled separately (member centroids
/// suppressed, though a member too small for any lattice point still
/// contributes its own centroid); the multi-polygon's overall centroid is
/// appended once when `include_centroid` is set.
pub fn sample_multi_polygon(
    multi_polygon: &MultiPolygon<f64>,
    spacing: Option<f64>,
    include_centroid: bool,
    config: &SamplingConfig,
) -> Vec<LatLon> {
    let mut points = Vec::new();
    for polygon in multi_polygon {
        points.extend(sample_polygon(polygon, spacing, false, config));
    }
    if include_centroid {
        if let Some(centroid) = multi_polygon.centroid() {
            points.push(LatLon(centroid.y(), centroid.x()));
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::LineString;

    fn config() -> SamplingConfig {
        SamplingConfig::default()
    }

    /// Axis-aligned square of the given side length centered on (0, 0).
    fn square(side: f64) -> Polygon<f64> {
        let h = side / 2.0;
        Polygon::new(
            LineString::from(vec![(-h, -h), (h, -h), (h, h), (-h, h), (-h, -h)]),
            vec![],
        )
    }

    #[test]
    fn spacing_is_floored_for_small_areas() {
        // 50 km² targets 5 points -> raw spacing ~0.028°, below the floor.
        assert_relative_eq!(grid_spacing_for(50.0, &config()), 0.05);
    }

    #[test]
    fn spacing_grows_with_area_once_clamped() {
        let cfg = config();
        // Both areas clamp to the 100-point maximum, so spacing scales
        // with sqrt(area).
        let s1 = grid_spacing_for(100_000.0, &cfg);
        let s2 = grid_spacing_for(400_000.0, &cfg);
        assert_relative_eq!(s2, s1 * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn spacing_is_deterministic() {
        let cfg = config();
        for area in [3.0, 99.0, 100.0, 999.0, 1000.0, 123_456.0] {
            assert_eq!(grid_spacing_for(area, &cfg), grid_spacing_for(area, &cfg));
        }
    }

    #[test]
    fn spacing_respects_point_clamps() {
        let cfg = config();
        for area in [0.1, 1.0, 10.0, 1e3, 1e5, 1e7] {
            let spacing = grid_spacing_for(area, &cfg);
            assert!(spacing >= cfg.min_spacing_deg);
            // Implied lattice cell count never exceeds max_points by more
            // than the discretization of one row/column.
            let implied = area / (spacing * KM_PER_DEGREE).powi(2);
            assert!(implied <= cfg.max_points as f64 + 1.0, "area {area}: {implied}");
        }
    }

    #[test]
    fn lattice_points_lie_inside_the_polygon() {
        // Irregular triangle over roughly one degree.
        let triangle = Polygon::new(
            LineString::from(vec![(3.0, 6.0), (4.2, 6.1), (3.5, 7.3), (3.0, 6.0)]),
            vec![],
        );
        let points = sample_polygon(&triangle, Some(0.1), true, &config());
        assert!(points.len() > 1);
        let centroid = triangle.centroid().map(|c| LatLon(c.y(), c.x())).unwrap();
        for point in &points {
            if *point == centroid {
                continue;
            }
            assert!(
                triangle.contains(&Point::new(point.1, point.0)),
                "({}, {}) escaped the triangle",
                point.0,
                point.1
            );
        }
    }

    #[test]
    fn sub_cell_polygon_falls_back_to_centroid() {
        // ~2 km on a side: far smaller than one 0.05° grid cell.
        let tiny = square(0.02);
        let points = sample_polygon(&tiny, None, true, &config());
        assert_eq!(points, vec![LatLon(0.0, 0.0)]);
    }

    #[test]
    fn centroid_fallback_applies_even_without_include_centroid() {
        let tiny = square(0.02);
        let points = sample_polygon(&tiny, None, false, &config());
        assert_eq!(points, vec![LatLon(0.0, 0.0)]);
    }

    #[test]
    fn centroid_is_not_duplicated_when_it_is_a_lattice_point() {
        // Unit square sampled at 0.25°: the lattice hits (0.5, 0.5)
        // exactly (0.25 is exact in binary), which is also the centroid.
        let unit = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        let points = sample_polygon(&unit, Some(0.25), true, &config());
        // 3x3 interior lattice points, no extra centroid.
        assert_eq!(points.len(), 9);
        assert_eq!(points.iter().filter(|p| **p == LatLon(0.5, 0.5)).count(), 1);
    }

    #[test]
    fn user_spacing_below_the_floor_is_clamped() {
        let cfg = config();
        let unit = square(1.0);
        let floored = sample_polygon(&unit, Some(cfg.min_spacing_deg), false, &cfg);
        assert!(floored.len() <= 500);
        // Sub-floor, zero and negative spacing all behave as the floor;
        // zero in particular must not loop forever.
        for below in [0.01, 0.0, -0.1] {
            assert_eq!(sample_polygon(&unit, Some(below), false, &cfg), floored);
        }
    }

    #[test]
    fn point_count_does_not_shrink_with_area_at_fixed_spacing() {
        let cfg = config();
        let mut last = 0;
        for side in [0.3, 0.6, 1.2, 2.4] {
            let count = sample_polygon(&square(side), Some(0.1), false, &cfg).len();
            assert!(
                count >= last,
                "side {side}: {count} points after {last}"
            );
            last = count;
        }
    }

    #[test]
    fn auto_spacing_yields_a_bounded_point_count() {
        let cfg = config();
        for side in [0.5, 1.0, 2.0, 4.0, 8.0] {
            let count = sample_polygon(&square(side), None, true, &cfg).len();
            assert!(count >= 1, "side {side} produced no points");
            // max_points plus discretization slack of one row/column.
            assert!(
                count <= 150,
                "side {side} produced {count} points"
            );
        }
    }

    #[test]
    fn multi_polygon_samples_members_and_appends_overall_centroid() {
        let left = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]),
            vec![],
        );
        let right = Polygon::new(
            LineString::from(vec![(2.0, 0.0), (3.0, 0.0), (3.0, 1.0), (2.0, 1.0), (2.0, 0.0)]),
            vec![],
        );
        let multi = MultiPolygon::new(vec![left, right]);

        let points = sample_multi_polygon(&multi, Some(0.5), true, &config());
        // One interior lattice point per member square, plus the overall
        // centroid (which lies between the members).
        assert_eq!(points.len(), 3);
        assert!(points.contains(&LatLon(0.5, 0.5)));
        assert!(points.contains(&LatLon(0.5, 2.5)));
        assert!(points.contains(&LatLon(0.5, 1.5)));
    }

    #[test]
    fn multi_polygon_without_centroid_request_omits_it() {
        let left = square(1.0);
        let multi = MultiPolygon::new(vec![left]);
        let with = sample_multi_polygon(&multi, Some(0.5), true, &config());
        let without = sample_multi_polygon(&multi, Some(0.5), false, &config());
        assert_eq!(with.len(), without.len() + 1);
    }
}
