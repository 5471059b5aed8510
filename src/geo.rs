//! Geographic distance and radius utilities
//!
//! This module provides the great-circle distance computation used everywhere a
//! resource is compared against a reference point (a campus or a user position),
//! plus the radius filter and the adaptive radius estimate derived from the
//! density of same-city listings.

use serde::{Deserialize, Serialize};

/// A point in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Anything that may carry a map position
pub trait Geolocated {
    fn position(&self) -> Option<Coordinates>;
}

/// Fallback radius when no same-city listings exist (km)
pub const DEFAULT_ADAPTIVE_RADIUS_KM: f64 = 8.0;
/// Lower clamp for the adaptive radius (km)
pub const MIN_ADAPTIVE_RADIUS_KM: f64 = 4.0;
/// Upper clamp for the adaptive radius (km)
pub const MAX_ADAPTIVE_RADIUS_KM: f64 = 20.0;

/// Great-circle distance in kilometers, rounded to one decimal place.
///
/// Distances are displayed with one decimal ("1.5 km from campus"), so the
/// rounded value is also the one the radius filter compares against.
#[must_use]
pub fn distance_km(a: &Coordinates, b: &Coordinates) -> f64 {
    let raw = haversine::distance(
        haversine::Location {
            latitude: a.latitude,
            longitude: a.longitude,
        },
        haversine::Location {
            latitude: b.latitude,
            longitude: b.longitude,
        },
        haversine::Units::Kilometers,
    );
    (raw * 10.0).round() / 10.0
}

/// Filter items to those within `radius_km` of `center`.
///
/// Items without a position are excluded. Input order is preserved.
#[must_use]
pub fn within_radius<'a, T: Geolocated>(
    items: &'a [T],
    center: &Coordinates,
    radius_km: f64,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| match item.position() {
            Some(position) => distance_km(center, &position) <= radius_km,
            None => false,
        })
        .collect()
}

/// Adaptive search radius from the 80th-percentile distance of same-city
/// listings, clamped to `[4, 20]` km.
///
/// `same_city_positions` are the positions of geolocated resources sharing the
/// reference point's city. An empty slice yields the 8 km default. Dense urban
/// areas end up with a tighter radius than sparse ones.
#[must_use]
pub fn adaptive_radius_km(reference: &Coordinates, same_city_positions: &[Coordinates]) -> f64 {
    if same_city_positions.is_empty() {
        return DEFAULT_ADAPTIVE_RADIUS_KM;
    }

    let mut distances: Vec<f64> = same_city_positions
        .iter()
        .map(|position| distance_km(reference, position))
        .collect();
    distances.sort_by(|a, b| a.total_cmp(b));

    let index = ((0.8 * distances.len() as f64).floor() as usize).min(distances.len() - 1);
    distances[index].clamp(MIN_ADAPTIVE_RADIUS_KM, MAX_ADAPTIVE_RADIUS_KM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Pin(Option<Coordinates>);

    impl Geolocated for Pin {
        fn position(&self) -> Option<Coordinates> {
            self.0
        }
    }

    const TORONTO: Coordinates = Coordinates {
        latitude: 43.6532,
        longitude: -79.3832,
    };

    #[test]
    fn test_distance_is_symmetric() {
        let montreal = Coordinates::new(45.5017, -73.5673);
        assert_eq!(distance_km(&TORONTO, &montreal), distance_km(&montreal, &TORONTO));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_km(&TORONTO, &TORONTO), 0.0);
    }

    #[test]
    fn test_distance_rounded_to_one_decimal() {
        let nearby = Coordinates::new(43.6629, -79.3957);
        let distance = distance_km(&TORONTO, &nearby);
        assert_eq!((distance * 10.0).round() / 10.0, distance);
        assert!(distance > 1.0 && distance < 2.0);
    }

    #[test]
    fn test_within_radius_scenario() {
        let pins = vec![
            Pin(Some(Coordinates::new(43.6629, -79.3957))), // ~1.5 km away
            Pin(Some(Coordinates::new(45.5017, -73.5673))), // Montreal, ~500 km
            Pin(None),
        ];

        let nearby = within_radius(&pins, &TORONTO, 25.0);
        assert_eq!(nearby.len(), 1);
        assert_eq!(
            nearby[0].position().map(|p| p.latitude),
            Some(43.6629)
        );
    }

    #[test]
    fn test_within_radius_preserves_order() {
        let pins = vec![
            Pin(Some(Coordinates::new(43.66, -79.39))),
            Pin(Some(Coordinates::new(43.65, -79.38))),
            Pin(Some(Coordinates::new(43.67, -79.40))),
        ];

        let nearby = within_radius(&pins, &TORONTO, 25.0);
        let latitudes: Vec<f64> = nearby
            .iter()
            .filter_map(|p| p.position().map(|c| c.latitude))
            .collect();
        assert_eq!(latitudes, vec![43.66, 43.65, 43.67]);
    }

    #[test]
    fn test_adaptive_radius_empty_falls_back_to_default() {
        assert_eq!(adaptive_radius_km(&TORONTO, &[]), DEFAULT_ADAPTIVE_RADIUS_KM);
    }

    #[test]
    fn test_adaptive_radius_clamps_to_bounds() {
        // All listings on top of the reference point: percentile distance 0,
        // clamped up to the minimum.
        let dense = vec![TORONTO; 5];
        assert_eq!(adaptive_radius_km(&TORONTO, &dense), MIN_ADAPTIVE_RADIUS_KM);

        // One distant listing: percentile distance far beyond the maximum.
        let sparse = vec![Coordinates::new(44.5, -79.3832)];
        assert_eq!(adaptive_radius_km(&TORONTO, &sparse), MAX_ADAPTIVE_RADIUS_KM);
    }

    #[rstest]
    #[case(1, 0)]
    #[case(4, 3)]
    #[case(5, 4)]
    #[case(10, 8)]
    fn test_percentile_index(#[case] n: usize, #[case] expected_index: usize) {
        let index = ((0.8 * n as f64).floor() as usize).min(n - 1);
        assert_eq!(index, expected_index);
    }
}
