// Application layer - the balance form and what it reports back.
// Front-ends (CLI, interactive form) call into LedgerForm and render Notices.

pub mod error;
pub mod form;
pub mod notice;

pub use error::*;
pub use form::*;
pub use notice::*;
