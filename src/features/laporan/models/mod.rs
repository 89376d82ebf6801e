mod laporan;

pub use laporan::{Laporan, LaporanStats, LaporanStatus, Pelapor};
