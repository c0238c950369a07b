//! Semantic token encoding for `textDocument/semanticTokens/full`.
//!
//! The walker decides what every span is. Everything here is about turning
//! those classifications into the protocol's relative integer encoding.

pub mod builder;
pub mod encoder;
pub mod legend;
pub mod lsp;
pub mod provider;
pub mod walker;

pub use builder::{AbsoluteToken, BuilderState, EncodedTokens, SemanticTokensBuilder};
pub use encoder::{encode_token_modifiers, encode_token_type};
pub use legend::{legend, Legend, TOKEN_MODIFIERS, TOKEN_TYPES};
pub use lsp::pretty_dump;
pub use provider::{
    compute_semantic_tokens, compute_semantic_tokens_with_legend, ParseResults, Program,
};
pub use walker::{ClassifiedSpan, SemanticWalker, WalkMode};
