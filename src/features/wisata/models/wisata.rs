use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::filter::{Facet, Filterable};
use crate::shared::serde_helpers;

/// Tourism destination with ticketing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Wisata {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub nama: String,
    pub deskripsi: String,
    pub lokasi: String,
    pub kategori: String,
    /// Ticket price per person in rupiah
    #[serde(deserialize_with = "serde_helpers::number")]
    pub harga: f64,
    #[serde(default)]
    pub jam_buka: Option<String>,
    #[serde(default)]
    pub jam_tutup: Option<String>,
    #[serde(default)]
    pub kontak: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_empty")]
    pub gambar: Vec<String>,
    #[serde(default, deserialize_with = "serde_helpers::null_as_empty")]
    pub fasilitas: Vec<String>,
    #[serde(default, deserialize_with = "serde_helpers::optional_number")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "serde_helpers::optional_number")]
    pub longitude: Option<f64>,
    #[serde(default, deserialize_with = "serde_helpers::optional_number")]
    pub rating: Option<f64>,
    #[serde(default = "default_active")]
    pub is_aktif: bool,
}

fn default_active() -> bool {
    true
}

impl Wisata {
    pub fn status_label(&self) -> &'static str {
        if self.is_aktif {
            "aktif"
        } else {
            "nonaktif"
        }
    }

    /// Cover image: explicit foto, else the first gallery image
    pub fn cover(&self) -> Option<&str> {
        self.foto.as_deref().or(self.gambar.first().map(String::as_str))
    }
}

impl Filterable for Wisata {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.nama.as_str(),
            self.deskripsi.as_str(),
            self.lokasi.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status_label()),
            Facet::Kategori => Some(self.kategori.as_str()),
            Facet::Role => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter::ListFilterQuery;
    use serde_json::json;

    #[test]
    fn test_lenient_wisata_payload() {
        let wisata: Wisata = serde_json::from_value(json!({
            "id": 3,
            "nama": "Curug Cipendok",
            "deskripsi": "Air terjun setinggi 92 meter",
            "lokasi": "Karangtengah",
            "kategori": "Alam",
            "harga": "15000",
            "gambar": null,
            "fasilitas": ["Parkir", "Toilet"],
            "latitude": "-7.3351",
            "longitude": 109.1012
        }))
        .unwrap();

        assert_eq!(wisata.harga, 15000.0);
        assert!(wisata.gambar.is_empty());
        assert_eq!(wisata.latitude, Some(-7.3351));
        assert!(wisata.is_aktif);
        assert!(wisata.cover().is_none());
    }

    #[test]
    fn test_status_facet_uses_aktif_label() {
        let items: Vec<Wisata> = serde_json::from_value(json!([
            {"id": 1, "nama": "A", "deskripsi": "", "lokasi": "", "kategori": "Alam", "harga": 0, "isAktif": true},
            {"id": 2, "nama": "B", "deskripsi": "", "lokasi": "", "kategori": "Alam", "harga": 0, "isAktif": false}
        ]))
        .unwrap();

        let inactive = ListFilterQuery::default().with_status("nonaktif").apply(items);
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].id, "2");
    }
}
