use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgramDto {
    #[validate(custom(function = "not_blank"))]
    pub nama: String,

    #[validate(custom(function = "not_blank"))]
    pub deskripsi: String,

    #[validate(custom(function = "not_blank"))]
    pub kategori: String,

    #[validate(range(min = 0.0, message = "Anggaran tidak boleh negatif"))]
    pub anggaran: f64,

    #[validate(custom(function = "not_blank"))]
    pub sumber_dana: String,

    #[validate(custom(function = "not_blank"))]
    pub timeline: String,

    #[validate(custom(function = "not_blank"))]
    pub status: String,

    #[serde(default)]
    #[validate(range(min = 0.0, max = 100.0, message = "Progress harus antara 0 dan 100"))]
    pub progress: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "URL foto tidak valid"))]
    pub foto: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub penanggung_jawab: String,
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgramDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub nama: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Anggaran tidak boleh negatif"))]
    pub anggaran: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sumber_dana: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 100.0, message = "Progress harus antara 0 dan 100"))]
    pub progress: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "URL foto tidak valid"))]
    pub foto: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub penanggung_jawab: Option<String>,
}
