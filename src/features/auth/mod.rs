pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod models;
pub mod outcome;
pub mod routes;
pub mod services;
pub mod workers;

pub use outcome::AuthOutcome;
pub use services::{AuthService, SessionStore};
