mod transaction_service;

pub use transaction_service::{CountdownFeed, TransactionService};
