//! Proximity search parameters and the great-circle distance they use.
//!
//! Backends without trigonometry compare the cosine of the central angle
//! instead of the distance: acos is decreasing, so `distance <= max` is
//! `cosine >= LocationQuery::min_cosine()` and nearest-first is
//! largest-cosine-first. [`TrigPosition`] holds the per-row terms.

use std::f64::consts::PI;

use validator::Validate;

use super::model::{Position, StoreStatus};
use crate::domain::DomainResult;

/// Degrees of arc -> nautical miles -> statute miles -> kilometers.
pub const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;
pub const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.1515;
pub const KILOMETERS_PER_STATUTE_MILE: f64 = 1.609344;

#[derive(Debug, Clone, Copy, PartialEq, Validate)]
pub struct LocationQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = 0.0))]
    pub max_distance_km: f64,
    pub status: StoreStatus,
}

impl LocationQuery {
    pub fn new(
        latitude: f64,
        longitude: f64,
        max_distance_km: f64,
        status: StoreStatus,
    ) -> DomainResult<Self> {
        let query = Self {
            latitude,
            longitude,
            max_distance_km,
            status,
        };
        query.validate()?;
        Ok(query)
    }

    pub fn center(&self) -> Position {
        Position {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Smallest central-angle cosine still within `max_distance_km`.
    ///
    /// Lowered slightly so a row at the exact center, whose cosine can round
    /// to just under 1.0, still matches a zero radius. The slack is worth a
    /// few meters at radius zero and vanishes as the radius grows.
    pub fn min_cosine(&self) -> f64 {
        let angle = (self.max_distance_km / KILOMETERS_PER_DEGREE).to_radians();
        if angle >= PI {
            -1.0
        } else {
            angle.cos() - COSINE_SLACK
        }
    }
}

const COSINE_SLACK: f64 = 1e-12;

/// Kilometers per degree of central angle.
pub const KILOMETERS_PER_DEGREE: f64 =
    NAUTICAL_MILES_PER_DEGREE * STATUTE_MILES_PER_NAUTICAL_MILE * KILOMETERS_PER_STATUTE_MILE;

/// Sines and cosines of a position's latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigPosition {
    pub sin_lat: f64,
    pub cos_lat: f64,
    pub sin_lng: f64,
    pub cos_lng: f64,
}

impl From<Position> for TrigPosition {
    fn from(p: Position) -> Self {
        let lat = p.latitude.to_radians();
        let lng = p.longitude.to_radians();
        Self {
            sin_lat: lat.sin(),
            cos_lat: lat.cos(),
            sin_lng: lng.sin(),
            cos_lng: lng.cos(),
        }
    }
}

impl TrigPosition {
    /// Cosine of the central angle between the two points, using
    /// `cos(a - b) = cos a cos b + sin a sin b` for the longitude delta.
    pub fn cosine_to(&self, other: &TrigPosition) -> f64 {
        self.sin_lat * other.sin_lat
            + self.cos_lat
                * other.cos_lat
                * (self.cos_lng * other.cos_lng + self.sin_lng * other.sin_lng)
    }
}

/// Distance in kilometers for a central-angle cosine.
pub fn cosine_to_km(cosine: f64) -> f64 {
    // rounding can push identical points just past 1.0
    cosine.clamp(-1.0, 1.0).acos().to_degrees() * KILOMETERS_PER_DEGREE
}

/// Spherical law of cosines distance between two points, in kilometers.
pub fn distance_km(from: Position, to: Position) -> f64 {
    cosine_to_km(TrigPosition::from(from).cosine_to(&to.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(latitude: f64, longitude: f64) -> Position {
        Position {
            latitude,
            longitude,
        }
    }

    #[test]
    fn same_point_is_zero() {
        let p = pos(41.311081, 69.240562);
        assert!(distance_km(p, p).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 60 nm * 1.1515 * 1.609344 ~= 111.19 km
        let d = distance_km(pos(0.0, 0.0), pos(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.05, "got {}", d);
    }

    #[test]
    fn known_city_distance() {
        // Tashkent -> Samarkand, roughly 270 km
        let d = distance_km(pos(41.2995, 69.2401), pos(39.6542, 66.9597));
        assert!(d > 250.0 && d < 290.0, "got {}", d);
    }

    #[test]
    fn symmetric() {
        let a = pos(48.8566, 2.3522);
        let b = pos(51.5074, -0.1278);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn min_cosine_agrees_with_distance() {
        let center = pos(41.0, 69.0);
        let query = LocationQuery::new(41.0, 69.0, 50.0, StoreStatus::Active).unwrap();
        let trig = TrigPosition::from(center);

        let near = TrigPosition::from(pos(41.1, 69.0));
        let far = TrigPosition::from(pos(42.0, 69.0));
        assert!(trig.cosine_to(&near) >= query.min_cosine());
        assert!(trig.cosine_to(&far) < query.min_cosine());
        assert!(trig.cosine_to(&trig) >= query.min_cosine());
    }

    #[test]
    fn radius_beyond_antipode_matches_everything() {
        let query = LocationQuery::new(0.0, 0.0, 25_000.0, StoreStatus::Active).unwrap();
        assert_eq!(query.min_cosine(), -1.0);
        let zero = LocationQuery::new(41.3, 69.2, 0.0, StoreStatus::Active).unwrap();
        let center = TrigPosition::from(zero.center());
        assert!(center.cosine_to(&center) >= zero.min_cosine());
        let next_door = TrigPosition::from(pos(41.301, 69.2));
        assert!(center.cosine_to(&next_door) < zero.min_cosine());
    }

    #[test]
    fn query_validation() {
        assert!(LocationQuery::new(10.0, 10.0, 5.0, StoreStatus::Active).is_ok());
        assert!(LocationQuery::new(95.0, 10.0, 5.0, StoreStatus::Active).is_err());
        assert!(LocationQuery::new(10.0, 10.0, -1.0, StoreStatus::Active).is_err());
    }
}
