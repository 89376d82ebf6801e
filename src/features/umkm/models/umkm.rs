use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::filter::{Facet, Filterable};
use crate::shared::serde_helpers;

/// Local micro/small business listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Umkm {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub nama: String,
    pub slug: String,
    pub pemilik: String,
    pub deskripsi: String,
    pub kategori: String,
    pub alamat: String,
    pub kontak: String,
    pub produk: String,
    /// Starting price in rupiah
    #[serde(deserialize_with = "serde_helpers::number")]
    pub harga: f64,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub jam_buka: Option<String>,
    #[serde(default)]
    pub jam_tutup: Option<String>,
    #[serde(default = "default_active")]
    pub is_aktif: bool,
}

fn default_active() -> bool {
    true
}

impl Umkm {
    /// WhatsApp deep link built from the contact number, when it is a phone number
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self.kontak.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 9 {
            return None;
        }
        let international = match digits.strip_prefix('0') {
            Some(rest) => format!("62{}", rest),
            None => digits,
        };
        Some(format!("https://wa.me/{}", international))
    }
}

impl Filterable for Umkm {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.nama.as_str(),
            self.pemilik.as_str(),
            self.produk.as_str(),
            self.deskripsi.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(if self.is_aktif { "aktif" } else { "nonaktif" }),
            Facet::Kategori => Some(self.kategori.as_str()),
            Facet::Role => None,
        }
    }
}
