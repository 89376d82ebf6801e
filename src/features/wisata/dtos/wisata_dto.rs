use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::maps::Coordinates;
use crate::shared::validation::{not_blank, TIME_OF_DAY_REGEX};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWisataDto {
    #[validate(custom(function = "not_blank"))]
    pub nama: String,

    #[validate(custom(function = "not_blank"))]
    pub deskripsi: String,

    #[validate(custom(function = "not_blank"))]
    pub lokasi: String,

    #[validate(custom(function = "not_blank"))]
    pub kategori: String,

    #[validate(range(min = 0.0, message = "Harga tidak boleh negatif"))]
    pub harga: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam buka harus berformat HH:MM"))]
    pub jam_buka: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam tutup harus berformat HH:MM"))]
    pub jam_tutup: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,

    #[serde(default)]
    pub gambar: Vec<String>,

    #[serde(default)]
    pub fasilitas: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude harus antara -90 dan 90"))]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude harus antara -180 dan 180"))]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating harus antara 0 dan 5"))]
    pub rating: Option<f64>,

    #[serde(default = "default_active")]
    pub is_aktif: bool,
}

fn default_active() -> bool {
    true
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWisataDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub nama: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lokasi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Harga tidak boleh negatif"))]
    pub harga: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam buka harus berformat HH:MM"))]
    pub jam_buka: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam tutup harus berformat HH:MM"))]
    pub jam_tutup: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gambar: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fasilitas: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude harus antara -90 dan 90"))]
    pub latitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude harus antara -180 dan 180"))]
    pub longitude: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 5.0, message = "Rating harus antara 0 dan 5"))]
    pub rating: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_aktif: Option<bool>,
}

/// Google Maps link pasted into the wisata form
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResolveCoordinatesDto {
    #[validate(url(message = "URL tidak valid"))]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoordinatesResponseDto {
    pub latitude: f64,
    pub longitude: f64,
    /// Link opening the point in Google Maps
    pub maps_url: String,
}

impl From<Coordinates> for CoordinatesResponseDto {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
            maps_url: format!(
                "https://www.google.com/maps?q={},{}",
                c.latitude, c.longitude
            ),
        }
    }
}
