mod wisata_dto;

pub use wisata_dto::*;
