//! Spatial index over every gazetteer coordinate, used to annotate
//! arbitrary points (uploaded geometries, sampled grid points) with the
//! nearest known administrative place.

use crate::gazetteer::lookup::AdminGazetteer;
use crate::types::location::LatLon;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Administrative level of a [`Place`] in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlaceLevel {
    Country,
    Division,
    SubDivision,
}

/// One indexed gazetteer coordinate.
///
/// `name` uses the same display format the resolver produces, so nearest
/// lookups and resolved selections label locations identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub name: String,
    pub level: PlaceLevel,
    pub location: LatLon,
}

impl RTreeObject for Place {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.location.0, self.location.1])
    }
}

impl PointDistance for Place {
    /// Squared Euclidean distance in degree space. An approximation, but
    /// the standard metric for R-tree nearest-neighbor iteration; exact
    /// haversine distances are computed on the candidates afterwards.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.location.0 - point[0];
        let dy = self.location.1 - point[1];
        dx * dx + dy * dy
    }
}

// Helper struct for BinaryHeap ordering (only compares distance).
struct PlaceCandidate<'a> {
    distance_km: OrderedFloat<f64>,
    place: &'a Place,
}

impl PartialEq for PlaceCandidate<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance_km == other.distance_km
    }
}
impl Eq for PlaceCandidate<'_> {}
impl PartialOrd for PlaceCandidate<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for PlaceCandidate<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance_km.cmp(&other.distance_km)
    }
}

/// R-tree over all gazetteer coordinates, answering "what is the closest
/// known administrative place to this point?".
#[derive(Debug, Clone)]
pub struct PlaceIndex {
    rtree: RTree<Place>,
}

impl PlaceIndex {
    /// Builds the index by walking every country, division and
    /// sub-division in the gazetteer.
    pub fn from_gazetteer(gazetteer: &AdminGazetteer) -> Self {
        let mut places = Vec::new();
        for country in gazetteer.countries() {
            if let Some(location) = gazetteer.capital(country) {
                places.push(Place {
                    name: country.to_string(),
                    level: PlaceLevel::Country,
                    location,
                });
            }
            for division in gazetteer.divisions(country) {
                if let Some(location) = gazetteer.division_coordinate(country, division) {
                    places.push(Place {
                        name: format!("{division}, {country}"),
                        level: PlaceLevel::Division,
                        location,
                    });
                }
                for sub in gazetteer.sub_divisions(country, division) {
                    if let Some(location) =
                        gazetteer.sub_division_coordinate(country, division, sub)
                    {
                        places.push(Place {
                            name: format!("{sub}, {division}, {country}"),
                            level: PlaceLevel::SubDivision,
                            location,
                        });
                    }
                }
            }
        }
        Self {
            rtree: RTree::bulk_load(places),
        }
    }

    /// Finds up to N nearest places to a coordinate. Uses a fast path for
    /// plain proximity queries and a heap-based approach with heuristic
    /// limits when filtering by administrative level.
    pub fn nearest(
        &self,
        latitude: f64,
        longitude: f64,
        n_results: usize,
        max_distance_km: f64,
        level: Option<PlaceLevel>,
    ) -> Vec<(Place, f64)> {
        if n_results == 0 {
            return vec![];
        }
        match level {
            None => self.fast_proximity_query(latitude, longitude, n_results, max_distance_km),
            Some(level) => {
                self.filtered_heap_query(latitude, longitude, n_results, max_distance_km, level)
            }
        }
    }

    /// Unfiltered query: limit R-tree iteration and compute haversine
    /// distances only for the leading candidates.
    fn fast_proximity_query(
        &self,
        latitude: f64,
        longitude: f64,
        n_results: usize,
        max_distance_km: f64,
    ) -> Vec<(Place, f64)> {
        let query_point = [latitude, longitude];

        // Take more than needed to absorb the difference between degree
        // distance (R-tree order) and haversine distance (reported order).
        let candidate_limit = (n_results * 2).max(20);

        let mut places_with_dist: Vec<(Place, f64)> = self
            .rtree
            .nearest_neighbor_iter(&query_point)
            .take(candidate_limit)
            .filter_map(|place| {
                let dist_km = haversine_km(latitude, longitude, place.location);
                if dist_km <= max_distance_km {
                    Some((place.clone(), dist_km))
                } else {
                    None
                }
            })
            .collect();

        places_with_dist.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
        places_with_dist.truncate(n_results);
        places_with_dist
    }

    /// Level-filtered query using a bounded BinaryHeap over the R-tree's
    /// nearest-neighbor iteration.
    fn filtered_heap_query(
        &self,
        latitude: f64,
        longitude: f64,
        n_results: usize,
        max_distance_km: f64,
        level: PlaceLevel,
    ) -> Vec<(Place, f64)> {
        let query_point = [latitude, longitude];
        let mut heap: BinaryHeap<PlaceCandidate<'_>> = BinaryHeap::with_capacity(n_results);

        for place in self.rtree.nearest_neighbor_iter(&query_point) {
            if place.level != level {
                continue;
            }

            let dist_km = haversine_km(latitude, longitude, place.location);
            if dist_km > max_distance_km {
                // Neighbors only get farther in degree space; a later
                // candidate can still be nearer in haversine terms, but
                // not once we are past twice the cutoff.
                if dist_km > max_distance_km * 2.0 {
                    break;
                }
                continue;
            }

            let candidate = PlaceCandidate {
                distance_km: OrderedFloat(dist_km),
                place,
            };

            if heap.len() < n_results {
                heap.push(candidate);
            } else {
                // unwrap safe: heap is full (len >= n_results >= 1)
                let worst = heap.peek().unwrap().distance_km;
                if candidate.distance_km < worst {
                    heap.pop();
                    heap.push(candidate);
                } else {
                    // Heap is full of nearer candidates and iteration
                    // order only worsens from here.
                    break;
                }
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|c| (c.place.clone(), c.distance_km.into_inner()))
            .collect()
    }
}

fn haversine_km(latitude: f64, longitude: f64, to: LatLon) -> f64 {
    distance(
        HaversineLocation {
            latitude,
            longitude,
        },
        HaversineLocation {
            latitude: to.0,
            longitude: to.1,
        },
        Units::Kilometers,
    )
}
