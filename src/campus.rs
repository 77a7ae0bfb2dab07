/// Nearest-campus lookup for leads that only gave us a city.
///
/// There is no geocoder behind this: a city is only located when some campus
/// in the reference data sits in a city with the same name.
use crate::models::{Campus, CampusMatch, Coordinate};
use std::fmt;

/// Default search radius around the lead's city.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 30.0;

/// Mean Earth radius (IUGG) in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Reasons a great-circle distance could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Coordinate missing or not readable as a number.
    Unreadable,
    /// Latitude outside [-90, 90] or not finite.
    LatitudeOutOfRange(f64),
    /// Longitude outside [-180, 180] or not finite.
    LongitudeOutOfRange(f64),
}

impl fmt::Display for GeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoError::Unreadable => write!(f, "coordinate is not a number"),
            GeoError::LatitudeOutOfRange(v) => write!(f, "latitude {} out of range", v),
            GeoError::LongitudeOutOfRange(v) => write!(f, "longitude {} out of range", v),
        }
    }
}

impl std::error::Error for GeoError {}

/// A validated point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(GeoError::LatitudeOutOfRange(lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(GeoError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    fn from_coordinates(
        lat: Option<&Coordinate>,
        lon: Option<&Coordinate>,
    ) -> Result<Self, GeoError> {
        let lat = lat.and_then(Coordinate::degrees).ok_or(GeoError::Unreadable)?;
        let lon = lon.and_then(Coordinate::degrees).ok_or(GeoError::Unreadable)?;
        Self::new(lat, lon)
    }
}

/// Great-circle distance between two points (haversine).
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Reference point of a city, taken from the first campus located there.
///
/// The point is kept raw: when its coordinates are unusable every distance
/// computed from it fails, and those campuses are kept at distance 0.
struct CityReference<'a> {
    campus: &'a Campus,
}

impl CityReference<'_> {
    fn distance_to(&self, other: &Campus) -> Result<f64, GeoError> {
        let origin = GeoPoint::from_coordinates(
            self.campus.latitude.as_ref(),
            self.campus.longitude.as_ref(),
        )?;
        let target = GeoPoint::from_coordinates(other.latitude.as_ref(), other.longitude.as_ref())?;
        Ok(haversine_km(origin, target))
    }
}

/// Campuses near `city` in `state`, nearest first.
///
/// - When no campus is located in `city`, every campus of the state is
///   returned at distance 0.
/// - Otherwise same-state campuses with both coordinates are measured and kept
///   when within `max_km`. A campus whose distance cannot be computed is kept
///   at distance 0.
///
/// Ties keep reference-data order. The reference data itself is never touched;
/// results are copies.
pub fn find_nearby(campuses: &[Campus], city: &str, state: &str, max_km: f64) -> Vec<CampusMatch> {
    let city_lower = city.to_lowercase();
    let reference = campuses
        .iter()
        .find(|c| c.city.to_lowercase() == city_lower)
        .map(|campus| CityReference { campus });

    let in_state = campuses.iter().filter(|c| c.state == state);

    let mut nearby: Vec<CampusMatch> = match reference {
        None => {
            tracing::debug!(
                "No campus located in '{}', using all campuses in state '{}'",
                city,
                state
            );
            in_state.map(|c| at_distance(c, 0.0)).collect()
        }
        Some(reference) => in_state
            .filter(|c| c.has_coordinates())
            .filter_map(|c| match reference.distance_to(c) {
                Ok(km) if km <= max_km => Some(at_distance(c, km)),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!(
                        "Distance to {} campus in {} failed ({}), keeping it in range",
                        c.brand,
                        c.city,
                        e
                    );
                    Some(at_distance(c, 0.0))
                }
            })
            .collect(),
    };

    // sort_by is stable, so equal distances keep reference-data order
    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    tracing::debug!(
        "Found {} campus(es) within {} km of '{}', {}",
        nearby.len(),
        max_km,
        city,
        state
    );
    nearby
}

/// Brand of the nearest campus.
pub fn pick_brand(campuses: &[CampusMatch]) -> Option<&str> {
    campuses.first().map(|m| m.campus.brand.as_str())
}

fn at_distance(campus: &Campus, distance_km: f64) -> CampusMatch {
    CampusMatch {
        campus: campus.clone(),
        distance_km,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campus(brand: &str, city: &str, state: &str, lat: Option<f64>, lon: Option<f64>) -> Campus {
        Campus {
            brand: brand.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            latitude: lat.map(Coordinate::from),
            longitude: lon.map(Coordinate::from),
        }
    }

    fn ncr() -> Vec<Campus> {
        vec![
            campus("NIU", "Noida", "Uttar Pradesh", Some(28.5355), Some(77.3910)),
            campus("GDG", "Ghaziabad", "Uttar Pradesh", Some(28.6692), Some(77.4538)),
            campus("SHU", "Greater Noida", "Uttar Pradesh", Some(28.4744), Some(77.5040)),
            campus("LKO", "Lucknow", "Uttar Pradesh", Some(26.8467), Some(80.9462)),
            campus("DEL", "Delhi", "Delhi", Some(28.7041), Some(77.1025)),
        ]
    }

    #[test]
    fn test_haversine_known_distance() {
        let delhi = GeoPoint::new(28.7041, 77.1025).unwrap();
        let mumbai = GeoPoint::new(19.0760, 72.8777).unwrap();
        let km = haversine_km(delhi, mumbai);
        assert!((km - 1153.0).abs() < 10.0, "got {}", km);
        assert_eq!(haversine_km(delhi, delhi), 0.0);
    }

    #[test]
    fn test_geo_point_rejects_out_of_range() {
        assert_eq!(GeoPoint::new(91.0, 0.0), Err(GeoError::LatitudeOutOfRange(91.0)));
        assert_eq!(GeoPoint::new(0.0, 181.0), Err(GeoError::LongitudeOutOfRange(181.0)));
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_nearest_first_within_radius() {
        let found = find_nearby(&ncr(), "Ghaziabad", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        let brands: Vec<&str> = found.iter().map(|m| m.campus.brand.as_str()).collect();

        assert_eq!(brands[0], "GDG");
        assert_eq!(found[0].distance_km, 0.0);
        assert!(brands.contains(&"NIU"));
        assert!(brands.contains(&"SHU"));
        assert!(!brands.contains(&"LKO"), "Lucknow is far outside 30 km");
        assert!(!brands.contains(&"DEL"), "other states are excluded");
        assert!(found.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        assert!(found.iter().all(|m| m.distance_km <= DEFAULT_MAX_DISTANCE_KM));
    }

    #[test]
    fn test_city_match_is_case_insensitive() {
        let found = find_nearby(&ncr(), "gHAZIABAD", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        assert_eq!(pick_brand(&found), Some("GDG"));
    }

    #[test]
    fn test_unknown_city_returns_whole_state_at_zero() {
        let found = find_nearby(&ncr(), "Meerut", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        let brands: Vec<&str> = found.iter().map(|m| m.campus.brand.as_str()).collect();

        assert_eq!(brands, vec!["NIU", "GDG", "SHU", "LKO"]);
        assert!(found.iter().all(|m| m.distance_km == 0.0));
    }

    #[test]
    fn test_campuses_without_coordinates_are_skipped_when_measuring() {
        let mut campuses = ncr();
        campuses.push(campus("NOC", "Noida", "Uttar Pradesh", None, Some(77.39)));

        let found = find_nearby(&campuses, "Ghaziabad", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        assert!(found.iter().all(|m| m.campus.brand != "NOC"));
    }

    #[test]
    fn test_malformed_coordinates_kept_at_zero() {
        let mut campuses = ncr();
        campuses.push(Campus {
            brand: "BAD".to_string(),
            city: "Hapur".to_string(),
            state: "Uttar Pradesh".to_string(),
            latitude: Some(Coordinate::Text("north-ish".to_string())),
            longitude: Some(Coordinate::Degrees(77.7)),
        });

        let found = find_nearby(&campuses, "Ghaziabad", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        let bad = found.iter().find(|m| m.campus.brand == "BAD").unwrap();
        assert_eq!(bad.distance_km, 0.0);
        // zero-distance entries keep reference order: GDG precedes BAD
        assert_eq!(pick_brand(&found), Some("GDG"));
    }

    #[test]
    fn test_reference_without_coordinates_keeps_measurable_campuses_at_zero() {
        let mut campuses = vec![campus("REF", "Agra", "Uttar Pradesh", None, None)];
        campuses.extend(ncr());

        let found = find_nearby(&campuses, "Agra", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        let brands: Vec<&str> = found.iter().map(|m| m.campus.brand.as_str()).collect();
        assert_eq!(brands, vec!["NIU", "GDG", "SHU", "LKO"]);
        assert!(found.iter().all(|m| m.distance_km == 0.0));
    }

    #[test]
    fn test_reference_data_is_not_mutated() {
        let campuses = ncr();
        let before = campuses.clone();
        let _ = find_nearby(&campuses, "Noida", "Uttar Pradesh", DEFAULT_MAX_DISTANCE_KM);
        assert_eq!(campuses, before);
    }

    #[test]
    fn test_pick_brand_empty() {
        assert_eq!(pick_brand(&[]), None);
        assert!(find_nearby(&ncr(), "Kochi", "Kerala", DEFAULT_MAX_DISTANCE_KM).is_empty());
    }
}
