mod umkm;

pub use umkm::Umkm;
