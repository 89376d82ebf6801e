mod transaction;

pub use transaction::{paid_revenue, Transaction, TransactionStatus};
