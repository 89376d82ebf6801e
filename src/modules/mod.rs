pub mod backend;
pub mod maps;
pub mod weather;
