#[macro_use]
extern crate lazy_static;

pub mod cancellation;
pub mod cli;
pub mod errors;
pub mod ide;
pub mod span;

pub use cancellation::{CancellationFlag, CancellationToken, NeverCancelled};
pub use errors::{SemanticTokensError, SemanticTokensResult};
