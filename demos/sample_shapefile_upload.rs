//! Simulates what the portal does with an uploaded shapefile: the parser
//! hands over named features, the extractor grid-samples the polygons,
//! and the nearest-place index labels each sampled point.

use afrigrid::{Afrigrid, Feature, Geometry, LatLon};
use geo::{LineString, Point, Polygon};

fn main() {
    let portal = Afrigrid::new();

    // A farm block north of Lagos plus one survey point, as a shapefile
    // parser would deliver them.
    let block = Polygon::new(
        LineString::from(vec![
            (3.2, 6.8),
            (3.9, 6.9),
            (3.8, 7.5),
            (3.3, 7.4),
            (3.2, 6.8),
        ]),
        vec![],
    );
    let features = vec![
        Feature::new("0", Geometry::Polygon(block))
            .with_attribute("name", "Ogun Farm Block")
            .with_attribute("crop", "cassava"),
        Feature::new("1", Geometry::Point(Point::new(3.3431, 6.5964)))
            .with_attribute("name", "Ikeja Survey Point"),
    ];

    let extraction = portal
        .extract()
        .features(&features)
        .max_total_points(200)
        .call();
    let summary = extraction.summary();
    println!(
        "{} points ({} sampled across {} polygon(s), {} direct), truncated: {}",
        summary.total_points,
        summary.sampling_points,
        summary.polygon_count,
        summary.direct_points,
        extraction.truncated,
    );

    for point in extraction.points.iter().take(5) {
        let nearest = portal
            .nearest_places()
            .location(LatLon(point.latitude, point.longitude))
            .limit(1)
            .call();
        let label = nearest
            .first()
            .map(|(place, km)| format!("{} ({km:.1} km away)", place.name))
            .unwrap_or_else(|| "no known place nearby".to_string());
        println!("{} -> nearest: {}", point.name, label);
    }
}
