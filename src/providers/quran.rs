use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::providers::error::ProviderError;

const EQURAN_BASE_URL: &str = "https://equran.id/api/v2";

/// equran.id wraps every payload in a {code, message, data} envelope; the
/// code field must be checked even on HTTP 200.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: u16,
    message: String,
    data: T,
}

/// One surah in the directory, with the upstream's Indonesian field names
/// mapped to snake case.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Surah {
    pub nomor: u32,
    pub nama: String,
    pub nama_latin: String,
    pub jumlah_ayat: u32,
    pub tempat_turun: String,
    pub arti: String,
}

/// One verse of a surah.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ayah {
    pub nomor_ayah: u32,
    pub teks_arab: String,
    pub teks_latin: String,
    pub teks_indonesia: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SurahDetail {
    #[serde(flatten)]
    pub surah: Surah,
    pub ayat: Vec<Ayah>,
}

/// The directory of all 114 surahs.
pub async fn surah_directory(client: &reqwest::Client) -> Result<Vec<Surah>, ProviderError> {
    fetch(client, &format!("{EQURAN_BASE_URL}/surat")).await
}

/// Full text of one surah, verse by verse.
pub async fn surah_detail(
    client: &reqwest::Client,
    number: u32,
) -> Result<SurahDetail, ProviderError> {
    fetch(client, &format!("{EQURAN_BASE_URL}/surat/{number}")).await
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
            envelope.message, envelope.code
        )));
    }
    Ok(envelope.data)
}
