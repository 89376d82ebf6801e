pub mod umkm_handler;

pub use umkm_handler::*;
