mod program_service;

pub use program_service::ProgramService;
