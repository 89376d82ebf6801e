pub mod program_handler;

pub use program_handler::*;
