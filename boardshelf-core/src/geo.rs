//! Coordinates and great-circle distance.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ShelfError, ShelfResult};

/// Mean earth radius used by the Haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = ShelfError;

    fn try_from(raw: RawGeoPoint) -> ShelfResult<Self> {
        GeoPoint::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> ShelfResult<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ShelfError::InvalidCoordinate(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ShelfError::InvalidCoordinate(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Haversine distance to another point, in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"` (whitespace around either number is allowed).
impl FromStr for GeoPoint {
    type Err = ShelfError;

    fn from_str(s: &str) -> ShelfResult<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ShelfError::parse(s, "a \"lat,lon\" coordinate"))?;

        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| ShelfError::parse(s, "a \"lat,lon\" coordinate"))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| ShelfError::parse(s, "a \"lat,lon\" coordinate"))?;

        GeoPoint::new(lat, lon)
    }
}

/// Anything that may sit at a point on the map.
pub trait Located {
    fn location(&self) -> Option<GeoPoint>;
}

/// Items within `radius_km` of `center`, nearest first, paired with their distance.
///
/// Items without a known location never match.
pub fn nearby<'a, T: Located>(
    items: &'a [T],
    center: &GeoPoint,
    radius_km: f64,
) -> ShelfResult<Vec<(&'a T, f64)>> {
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(ShelfError::InvalidRadius(radius_km));
    }

    let mut hits: Vec<(&T, f64)> = items
        .iter()
        .filter_map(|item| {
            let distance = item.location()?.distance_km(center);
            (distance <= radius_km).then_some((item, distance))
        })
        .collect();

    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Spot(Option<GeoPoint>);

    impl Located for Spot {
        fn location(&self) -> Option<GeoPoint> {
            self.0
        }
    }

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn distance_between_known_cities() {
        let paris = point(48.8566, 2.3522);
        let london = point(51.5074, -0.1278);

        let d = paris.distance_km(&london);
        // ~343.5 km
        assert!((d - 343.5).abs() < 3.5, "got {d}");
        assert!((london.distance_km(&paris) - d).abs() < 1e-9);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = point(-33.8688, 151.2093);
        assert_eq!(p.distance_km(&p), 0.0);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(matches!(GeoPoint::new(91.0, 0.0), Err(ShelfError::InvalidCoordinate(_))));
        assert!(matches!(GeoPoint::new(0.0, -180.5), Err(ShelfError::InvalidCoordinate(_))));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn parses_lat_lon_text() {
        let p: GeoPoint = "52.52, 13.405".parse().unwrap();
        assert_eq!(p.latitude(), 52.52);
        assert_eq!(p.longitude(), 13.405);

        assert!("52.52".parse::<GeoPoint>().is_err());
        assert!("north,east".parse::<GeoPoint>().is_err());
        assert!("100,0".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn nearby_orders_by_distance_and_skips_unlocated() {
        let center = point(48.8566, 2.3522);
        let spots = vec![
            Spot(Some(point(48.9, 2.4))),     // ~6 km
            Spot(None),
            Spot(Some(point(51.5074, -0.1278))), // ~343 km
            Spot(Some(point(48.86, 2.35))),   // <1 km
        ];

        let hits = nearby(&spots, &center, 50.0).unwrap();
        assert_eq!(hits.len(), 2);
        assert!(hits[0].1 < hits[1].1);
        assert!(std::ptr::eq(hits[0].0, &spots[3]));
        assert!(std::ptr::eq(hits[1].0, &spots[0]));
    }

    #[test]
    fn nearby_rejects_bad_radius() {
        let spots: Vec<Spot> = Vec::new();
        let center = point(0.0, 0.0);
        assert!(matches!(nearby(&spots, &center, -1.0), Err(ShelfError::InvalidRadius(_))));
        assert!(nearby(&spots, &center, f64::INFINITY).is_err());
    }
}
