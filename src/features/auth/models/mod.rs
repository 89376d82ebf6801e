mod authenticated_user;
mod session;

pub use authenticated_user::AuthenticatedUser;
pub use session::Session;
