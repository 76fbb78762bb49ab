use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::providers::error::ProviderError;

const MYQURAN_BASE_URL: &str = "https://api.myquran.com/v1";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: bool,
    data: T,
}

/// An Indonesian city known to the published schedule service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct City {
    pub id: String,
    #[serde(rename = "lokasi")]
    pub name: String,
}

/// One day of a published city schedule, passed through with the upstream
/// field names.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleRow {
    pub tanggal: String,
    pub imsak: String,
    pub subuh: String,
    pub terbit: String,
    pub dhuha: String,
    pub dzuhur: String,
    pub ashar: String,
    pub maghrib: String,
    pub isya: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CitySchedule {
    #[serde(rename = "lokasi")]
    pub location: String,
    #[serde(rename = "jadwal")]
    pub rows: Vec<ScheduleRow>,
}

/// Cached city directory. Loaded once per process and filtered linearly on
/// demand; the full list is a few hundred entries.
#[derive(Debug, Default)]
pub struct CityDirectory {
    cities: Vec<City>,
}

impl CityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        !self.cities.is_empty()
    }

    pub async fn load(&mut self, client: &reqwest::Client) -> Result<usize, ProviderError> {
        let url = format!("{MYQURAN_BASE_URL}/sholat/kota/semua");
        let response = client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status().as_u16()));
        }

        let envelope: Envelope<Vec<City>> = response.json().await?;
        if !envelope.status {
            return Err(ProviderError::Rejected("city directory request".into()));
        }

        self.cities = envelope.data;
        Ok(self.cities.len())
    }

    /// Case-insensitive substring filter; an empty query returns everything.
    pub fn filter(&self, query: &str) -> Vec<City> {
        let needle = query.to_lowercase();
        self.cities
            .iter()
            .filter(|city| city.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Published monthly schedule for a city, as the provider serves it.
pub async fn monthly_schedule(
    client: &reqwest::Client,
    city_id: &str,
    year: i32,
    month: u32,
) -> Result<CitySchedule, ProviderError> {
    let url = format!("{MYQURAN_BASE_URL}/sholat/jadwal/{city_id}/{year}/{month}");
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::Status(response.status().as_u16()));
    }

    let envelope: Envelope<CitySchedule> = response.json().await?;
    if !envelope.status {
        return Err(ProviderError::Rejected(format!(
            "schedule for city {city_id}"
        )));
    }
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> CityDirectory {
        let envelope: Envelope<Vec<City>> = serde_json::from_str(
            r#"{
                "status": true,
                "data": [
                    {"id": "1301", "lokasi": "KOTA JAKARTA"},
                    {"id": "1204", "lokasi": "KAB. BANDUNG"},
                    {"id": "1710", "lokasi": "KOTA SURABAYA"}
                ]
            }"#,
        )
        .unwrap();
        CityDirectory {
            cities: envelope.data,
        }
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let directory = directory();
        let hits = directory.filter("jakarta");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1301");

        assert_eq!(directory.filter("KOTA").len(), 2);
        assert_eq!(directory.filter("medan").len(), 0);
    }

    #[test]
    fn empty_query_returns_the_whole_directory() {
        assert_eq!(directory().filter("").len(), 3);
    }

    #[test]
    fn parses_a_schedule_envelope() {
        let envelope: Envelope<CitySchedule> = serde_json::from_str(
            r#"{
                "status": true,
                "data": {
                    "lokasi": "KOTA JAKARTA",
                    "jadwal": [{
                        "tanggal": "Senin, 01/04/2024",
                        "imsak": "04:31",
                        "subuh": "04:41",
                        "terbit": "05:54",
                        "dhuha": "06:22",
                        "dzuhur": "11:57",
                        "ashar": "15:14",
                        "maghrib": "17:55",
                        "isya": "19:05"
                    }]
                }
            }"#,
        )
        .unwrap();
        assert!(envelope.status);
        assert_eq!(envelope.data.rows.len(), 1);
        assert_eq!(envelope.data.rows[0].subuh, "04:41");
    }
}
