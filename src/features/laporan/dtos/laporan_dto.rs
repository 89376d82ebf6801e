use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::laporan::models::LaporanStatus;
use crate::shared::validation::not_blank;

/// Complaint form, open to guests and logged-in residents
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLaporanDto {
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Judul maksimal 200 karakter")
    )]
    pub judul: String,

    #[validate(custom(function = "not_blank"))]
    pub deskripsi: String,

    #[validate(custom(function = "not_blank"))]
    pub kategori: String,

    #[validate(custom(function = "not_blank"))]
    pub lokasi: String,

    #[validate(url(message = "URL foto tidak valid"))]
    pub foto: Option<String>,
}

/// Body forwarded to the backend; `userId` is set when the reporter is logged in
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendCreateLaporan<'a> {
    pub judul: &'a str,
    pub deskripsi: &'a str,
    pub kategori: &'a str,
    pub lokasi: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<&'a str>,
    pub user_id: Option<&'a str>,
}

impl<'a> BackendCreateLaporan<'a> {
    pub fn new(dto: &'a CreateLaporanDto, user_id: Option<&'a str>) -> Self {
        Self {
            judul: dto.judul.trim(),
            deskripsi: dto.deskripsi.trim(),
            kategori: dto.kategori.trim(),
            lokasi: dto.lokasi.trim(),
            foto: dto.foto.as_deref(),
            user_id,
        }
    }
}

/// Admin edit form; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLaporanDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        custom(function = "not_blank"),
        length(max = 200, message = "Judul maksimal 200 karakter")
    )]
    pub judul: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub deskripsi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub kategori: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub lokasi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "URL foto tidak valid"))]
    pub foto: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LaporanStatus>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tanggapan: Option<String>,
}

/// Admin status change with an optional response to the reporter
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLaporanStatusDto {
    pub status: LaporanStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Tanggapan maksimal 2000 karakter"))]
    pub tanggapan: Option<String>,
}
