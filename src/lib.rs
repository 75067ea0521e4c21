pub mod application;
pub mod cli;
pub mod domain;
pub mod storage;

pub use application::{AppError, FormConfig, LedgerForm};
pub use domain::*;
pub use storage::TransactionLog;
