use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::umkm::models::Umkm;
use crate::shared::constants::UMKM_PAGE_SIZE;
use crate::shared::types::PaginationQuery;
use crate::shared::validation::{not_blank, slugify, SLUG_REGEX, TIME_OF_DAY_REGEX};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUmkmDto {
    #[validate(custom(function = "not_blank"))]
    pub nama: String,

    /// Derived from `nama` when omitted
    #[serde(default)]
    #[validate(regex(path = *SLUG_REGEX, message = "Slug hanya boleh huruf kecil, angka dan tanda hubung"))]
    pub slug: Option<String>,

    #[validate(custom(function = "not_blank"))]
    pub pemilik: String,

    #[validate(custom(function = "not_blank"))]
    pub deskripsi: String,

    #[validate(custom(function = "not_blank"))]
    pub kategori: String,

    #[validate(custom(function = "not_blank"))]
    pub alamat: String,

    #[validate(custom(function = "not_blank"))]
    pub kontak: String,

    #[validate(custom(function = "not_blank"))]
    pub produk: String,

    #[validate(range(min = 0.0, message = "Harga tidak boleh negatif"))]
    pub harga: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam buka harus berformat HH:MM"))]
    pub jam_buka: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam tutup harus berformat HH:MM"))]
    pub jam_tutup: Option<String>,

    #[serde(default = "default_active")]
    pub is_aktif: bool,
}

fn default_active() -> bool {
    true
}

impl CreateUmkmDto {
    /// Fill in the slug from the business name when the form left it empty
    pub fn with_slug(mut self) -> Self {
        if self.slug.as_deref().unwrap_or_default().trim().is_empty() {
            self.slug = Some(slugify(&self.nama));
        }
        self
    }
}

/// Partial update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUmkmDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "not_blank"))]
    pub nama: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *SLUG_REGEX, message = "Slug hanya boleh huruf kecil, angka dan tanda hubung"))]
    pub slug: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pemilik: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kategori: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alamat: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub kontak: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub produk: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, message = "Harga tidak boleh negatif"))]
    pub harga: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam buka harus berformat HH:MM"))]
    pub jam_buka: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(regex(path = *TIME_OF_DAY_REGEX, message = "Jam tutup harus berformat HH:MM"))]
    pub jam_tutup: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_aktif: Option<bool>,
}

/// Page selector for the UMKM directory (page size is fixed)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct UmkmPageQuery {
    /// Page number, 1-indexed
    #[param(minimum = 1)]
    pub page: Option<i64>,
}

impl UmkmPageQuery {
    pub fn pagination(&self) -> PaginationQuery {
        PaginationQuery::new(self.page.unwrap_or(1).max(1), UMKM_PAGE_SIZE)
    }
}

/// UMKM detail with contact shortcuts
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UmkmDetailDto {
    #[serde(flatten)]
    pub umkm: Umkm,
    pub whatsapp_url: Option<String>,
}

impl From<Umkm> for UmkmDetailDto {
    fn from(umkm: Umkm) -> Self {
        Self {
            whatsapp_url: umkm.whatsapp_url(),
            umkm,
        }
    }
}
