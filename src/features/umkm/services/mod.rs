mod umkm_service;

pub use umkm_service::UmkmService;
