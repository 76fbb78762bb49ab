use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::providers::error::ProviderError;

const ALADHAN_BASE_URL: &str = "https://api.aladhan.com/v1";

/// AlAdhan wraps every payload in a {code, status, data} envelope; the code
/// field must be checked even on HTTP 200.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: u16,
    status: String,
    data: T,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HijriMonth {
    pub number: u32,
    pub en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HijriDate {
    pub day: String,
    pub month: HijriMonth,
    pub year: String,
    #[serde(default)]
    pub holidays: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GregorianDate {
    pub date: String,
}

/// One day of the Gregorian-to-Hijri conversion table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HijriDay {
    pub hijri: HijriDate,
    pub gregorian: GregorianDate,
}

/// Hijri dates for every day of a Gregorian month.
pub async fn month_calendar(
    client: &reqwest::Client,
    gregorian_month: u32,
    gregorian_year: i32,
) -> Result<Vec<HijriDay>, ProviderError> {
    let url = format!("{ALADHAN_BASE_URL}/gToHCalendar/{gregorian_month}/{gregorian_year}");
    fetch(client, &url).await
}

/// Islamic holidays falling in a Hijri year.
pub async fn holidays_by_hijri_year(
    client: &reqwest::Client,
    hijri_year: u32,
) -> Result<Vec<HijriDay>, ProviderError> {
    let url = format!("{ALADHAN_BASE_URL}/islamicHolidaysByHijriYear/{hijri_year}");
    fetch(client, &url).await
}

async fn fetch<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
) -> Result<T, ProviderError> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(ProviderError::Status(response.status().as_u16()));
    }

    let envelope: Envelope<T> = response.json().await?;
    unwrap_envelope(envelope)
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, ProviderError> {
    if envelope.code != 200 {
        return Err(ProviderError::Rejected(format!(
            "{} ({})",
            envelope.status, envelope.code
        )));
    }
    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_calendar_day() {
        let envelope: Envelope<Vec<HijriDay>> = serde_json::from_str(
            r#"{
                "code": 200,
                "status": "OK",
                "data": [{
                    "hijri": {
                        "day": "19",
                        "month": {"number": 9, "en": "Ramaḍān"},
                        "year": "1445",
                        "holidays": []
                    },
                    "gregorian": {"date": "29-03-2024"}
                }]
            }"#,
        )
        .unwrap();

        let days = unwrap_envelope(envelope).unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].hijri.month.number, 9);
        assert_eq!(days[0].gregorian.date, "29-03-2024");
    }

    #[test]
    fn non_ok_envelope_code_is_rejected() {
        let envelope: Envelope<Vec<HijriDay>> = serde_json::from_str(
            r#"{"code": 400, "status": "Bad Request", "data": []}"#,
        )
        .unwrap();

        let err = unwrap_envelope(envelope).unwrap_err();
        assert!(matches!(err, ProviderError::Rejected(_)));
    }
}
