use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::filter::{Facet, Filterable};
use crate::shared::serde_helpers;

/// Village development project (program pembangunan)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    #[serde(deserialize_with = "serde_helpers::id")]
    pub id: String,
    pub nama: String,
    pub deskripsi: String,
    pub kategori: String,
    /// Budget in rupiah
    #[serde(deserialize_with = "serde_helpers::number")]
    pub anggaran: f64,
    pub sumber_dana: String,
    pub timeline: String,
    /// Free-form project phase, e.g. "PERENCANAAN", "BERJALAN", "SELESAI"
    pub status: String,
    /// Completion percentage
    #[serde(default, deserialize_with = "serde_helpers::number")]
    pub progress: f64,
    #[serde(default)]
    pub foto: Option<String>,
    pub penanggung_jawab: String,
}

impl Filterable for Program {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.nama.as_str(),
            self.deskripsi.as_str(),
            self.penanggung_jawab.as_str(),
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

/// Mean progress across programs, 0 when there are none
pub fn average_progress(programs: &[Program]) -> f64 {
    if programs.is_empty() {
        return 0.0;
    }
    programs.iter().map(|p| p.progress).sum::<f64>() / programs.len() as f64
}
