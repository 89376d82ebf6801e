pub mod laporan_handler;

pub use laporan_handler::*;
