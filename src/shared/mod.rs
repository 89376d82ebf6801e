pub mod chat;
pub mod constants;
pub mod countdown;
pub mod filter;
pub mod serde_helpers;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
pub mod validation;
