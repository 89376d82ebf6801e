mod program_dto;

pub use program_dto::{CreateProgramDto, UpdateProgramDto};
