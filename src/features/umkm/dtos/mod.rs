mod umkm_dto;

pub use umkm_dto::*;
