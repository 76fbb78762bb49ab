use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::geo::Coordinates;
use crate::providers::error::ProviderError;

const REVERSE_GEOCODE_URL: &str = "https://api.bigdatacloud.net/data/reverse-geocode-client";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseGeocodeBody {
    city: Option<String>,
    locality: Option<String>,
    country_code: Option<String>,
}

/// Human-readable place name for a coordinate, e.g. "Jakarta, ID".
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PlaceName {
    pub city: String,
    pub country_code: String,
}

impl PlaceName {
    pub fn label(&self) -> String {
        format!("{}, {}", self.city, self.country_code)
    }
}

/// Resolve a coordinate to a place name. Failures degrade at the caller; a
/// successful response with empty fields degrades to "Unknown" here.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    coords: Coordinates,
) -> Result<PlaceName, ProviderError> {
    let response = client
        .get(REVERSE_GEOCODE_URL)
        .query(&[
            ("latitude", coords.latitude_deg.to_string()),
            ("longitude", coords.longitude_deg.to_string()),
            ("localityLanguage", "en".to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ProviderError::Status(response.status().as_u16()));
    }

    let body: ReverseGeocodeBody = response.json().await?;
    Ok(place_from_body(body))
}

fn place_from_body(body: ReverseGeocodeBody) -> PlaceName {
    let city = [body.city, body.locality]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());
    let country_code = body
        .country_code
        .filter(|code| !code.is_empty())
        .unwrap_or_else(|| "ID".to_string());

    PlaceName { city, country_code }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_city_over_locality() {
        let body: ReverseGeocodeBody = serde_json::from_str(
            r#"{"city": "Jakarta", "locality": "Gambir", "countryCode": "ID"}"#,
        )
        .unwrap();
        let place = place_from_body(body);
        assert_eq!(place.label(), "Jakarta, ID");
    }

    #[test]
    fn empty_fields_degrade_to_unknown() {
        let body: ReverseGeocodeBody =
            serde_json::from_str(r#"{"city": "", "locality": ""}"#).unwrap();
        let place = place_from_body(body);
        assert_eq!(place.city, "Unknown");
        assert_eq!(place.country_code, "ID");
    }

    #[test]
    fn locality_fills_in_for_missing_city() {
        let body: ReverseGeocodeBody =
            serde_json::from_str(r#"{"locality": "Depok", "countryCode": "ID"}"#).unwrap();
        assert_eq!(place_from_body(body).city, "Depok");
    }
}
