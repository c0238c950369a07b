//! IDE-facing utilities.
//!
//! Presentation-layer helpers live here, away from whatever parser and
//! analyzer feed them.

pub mod semantic_tokens;
pub mod snapshot;
