mod wisata;

pub use wisata::Wisata;
