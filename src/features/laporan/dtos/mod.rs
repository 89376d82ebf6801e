mod laporan_dto;

pub use laporan_dto::*;
