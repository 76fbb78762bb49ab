use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A point on the Earth in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
}

impl Coordinates {
    /// Fallback location used when no geolocation fix is available: Jakarta.
    pub const FALLBACK: Coordinates = Coordinates {
        latitude_deg: -6.2088,
        longitude_deg: 106.8456,
    };

    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
        }
    }

    /// Parse a "lat,lon" string as used in the config file and on the CLI.
    pub fn from_coordinates(coordinates: &str) -> Option<Self> {
        let parts: Vec<_> = coordinates.split(',').map(|s| s.trim()).collect();
        if parts.len() != 2 {
            return None;
        }
        let lat = parts[0].parse().ok()?;
        let lon = parts[1].parse().ok()?;
        Some(Self {
            latitude_deg: lat,
            longitude_deg: lon,
        })
    }

    pub fn lat_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lat_lon_pairs() {
        let c = Coordinates::from_coordinates("-6.2088, 106.8456").unwrap();
        assert_eq!(c.latitude_deg, -6.2088);
        assert_eq!(c.longitude_deg, 106.8456);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert!(Coordinates::from_coordinates("21.4225").is_none());
        assert!(Coordinates::from_coordinates("a,b").is_none());
        assert!(Coordinates::from_coordinates("1,2,3").is_none());
    }
}
