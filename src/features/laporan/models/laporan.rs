use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::shared::filter::{Facet, Filterable};
use crate::shared::serde_helpers;

/// Handling state of a complaint. Admins move it freely; no transitions are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LaporanStatus {
    Pending,
    Proses,
    Selesai,
    Ditolak,
}

impl LaporanStatus {
    pub const ALL: [LaporanStatus; 4] = [
        LaporanStatus::Pending,
        LaporanStatus::Proses,
        LaporanStatus::Selesai,
        LaporanStatus::Ditolak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LaporanStatus::Pending => "PENDING",
            LaporanStatus::Proses => "PROSES",
            LaporanStatus::Selesai => "SELESAI",
            LaporanStatus::Ditolak => "DITOLAK",
        }
    }
}

impl fmt::Display for LaporanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporter summary embedded in a laporan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pelapor {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Citizen complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Laporan {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub judul: String,
    pub deskripsi: String,
    pub kategori: String,
    pub status: LaporanStatus,
    pub lokasi: String,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub tanggapan: Option<String>,
    /// `None` for guest submissions
    #[serde(default)]
    pub user: Option<Pelapor>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Laporan {
    #[cfg(test)]
    pub fn is_guest(&self) -> bool {
        self.user.is_none()
    }

    pub fn reported_by(&self, user_id: &str) -> bool {
        self.user.as_ref().is_some_and(|u| u.id == user_id)
    }
}

impl Filterable for Laporan {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.judul.as_str(),
            self.deskripsi.as_str(),
            self.lokasi.as_str(),
            self.kategori.as_str(),
        ]
    }

    fn facet(&self, facet: Facet) -> Option<&str> {
        match facet {
            Facet::Status => Some(self.status.as_str()),
            Facet::Kategori => Some(self.kategori.as_str()),
            Facet::Role => None,
        }
    }
}

/// Counts shown on the laporan stat cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LaporanStats {
    pub total: usize,
    pub pending: usize,
    pub proses: usize,
    pub selesai: usize,
    pub ditolak: usize,
}

impl LaporanStats {
    pub fn from_items(items: &[Laporan]) -> Self {
        items.iter().fold(
            LaporanStats {
                total: items.len(),
                ..Default::default()
            },
            |mut stats, item| {
                *stats.count_mut(item.status) += 1;
                stats
            },
        )
    }

    pub fn count(&self, status: LaporanStatus) -> usize {
        match status {
            LaporanStatus::Pending => self.pending,
            LaporanStatus::Proses => self.proses,
            LaporanStatus::Selesai => self.selesai,
            LaporanStatus::Ditolak => self.ditolak,
        }
    }

    fn count_mut(&mut self, status: LaporanStatus) -> &mut usize {
        match status {
            LaporanStatus::Pending => &mut self.pending,
            LaporanStatus::Proses => &mut self.proses,
            LaporanStatus::Selesai => &mut self.selesai,
            LaporanStatus::Ditolak => &mut self.ditolak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filter::ListFilterQuery;
    use serde_json::json;

    fn sample() -> Vec<Laporan> {
        serde_json::from_value(json!([
            {"id": 1, "judul": "Jalan berlubang", "deskripsi": "Depan balai desa", "kategori": "Infrastruktur", "status": "PENDING", "lokasi": "RT 01", "user": null},
            {"id": 2, "judul": "Lampu jalan mati", "deskripsi": "Sudah seminggu", "kategori": "Infrastruktur", "status": "PROSES", "lokasi": "RT 03", "user": {"id": 5, "name": "Budi"}},
            {"id": 3, "judul": "Sampah menumpuk", "deskripsi": "Dekat sungai", "kategori": "Kebersihan", "status": "SELESAI", "lokasi": "RT 02"},
            {"id": 4, "judul": "Saluran air tersumbat", "deskripsi": "Jalan tergenang", "kategori": "Infrastruktur", "status": "PENDING", "lokasi": "RT 01"},
            {"id": 5, "judul": "Pungutan liar", "deskripsi": "Di pasar", "kategori": "Pelayanan", "status": "DITOLAK", "lokasi": "Pasar"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_stats_match_status_filters() {
        let items = sample();
        let stats = LaporanStats::from_items(&items);

        assert_eq!(stats.total, items.len());
        for status in LaporanStatus::ALL {
            let expected = items.iter().filter(|i| i.status == status).count();
            assert_eq!(stats.count(status), expected, "status {}", status);

            let via_filter = ListFilterQuery::default()
                .with_status(status.as_str())
                .apply(items.clone())
                .len();
            assert_eq!(stats.count(status), via_filter);
        }
    }

    #[test]
    fn test_search_status_kategori_intersection() {
        let items = sample();
        let query = ListFilterQuery::search("jalan")
            .with_status("PENDING")
            .with_kategori("Infrastruktur");

        let ids: Vec<_> = query.apply(items.clone()).into_iter().map(|l| l.id).collect();
        assert_eq!(ids, vec!["1", "4"]);

        let manual: Vec<_> = items
            .into_iter()
            .filter(|l| l.kategori == "Infrastruktur")
            .filter(|l| l.status == LaporanStatus::Pending)
            .filter(|l| {
                [&l.judul, &l.deskripsi, &l.lokasi, &l.kategori]
                    .iter()
                    .any(|f| f.to_lowercase().contains("jalan"))
            })
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, manual);
    }

    #[test]
    fn test_guest_and_reporter() {
        let items = sample();
        assert!(items[0].is_guest());
        assert!(items[1].reported_by("5"));
        assert!(!items[1].reported_by("6"));
    }
}
