mod client;
mod context;
mod envelope;
mod error;

pub use client::{BackendClient, ResourceClient};
pub use context::CallContext;
pub use envelope::Envelope;
pub use error::BackendError;
