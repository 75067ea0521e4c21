mod transaction_log;

pub use transaction_log::*;

/// Log file used when no other location is configured.
pub const DEFAULT_LOG_FILE: &str = "expenses.csv";
