mod program;

pub use program::{average_progress, Program};
