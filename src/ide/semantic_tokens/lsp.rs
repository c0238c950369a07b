//! Conversions to the `tower-lsp` protocol types and a debug dump.

use std::fmt::Write;

use tower_lsp::lsp_types::{SemanticToken, SemanticTokens};

use super::{builder::EncodedTokens, legend::Legend};
use crate::span::LineTable;

impl EncodedTokens {
    pub fn into_lsp(self) -> SemanticTokens {
        let data = self
            .data
            .chunks_exact(5)
            .map(|record| SemanticToken {
                delta_line: record[0],
                delta_start: record[1],
                length: record[2],
                token_type: record[3],
                token_modifiers_bitset: record[4],
            })
            .collect();
        SemanticTokens {
            result_id: None,
            data,
        }
    }
}

/// One line per token: absolute position, type and modifier names, and the
/// source text the token covers.
pub fn pretty_dump(tokens: &EncodedTokens, source: &str, legend: &Legend) -> String {
    let lines = LineTable::from_text(source);
    let utf16 = source.encode_utf16().collect::<Vec<_>>();
    let mut out = String::new();
    for (idx, token) in tokens.decode().iter().enumerate() {
        let text = lines
            .get(token.line as usize)
            .map(|line| {
                let start = line.start.saturating_add(token.character) as usize;
                let end = (start + token.length as usize).min(utf16.len());
                String::from_utf16_lossy(&utf16[start.min(end)..end])
            })
            .unwrap_or_default();
        let modifiers = legend.modifier_names(token.modifiers);
        let _ = writeln!(
            out,
            "#{:03} L{}:{} len={} {}{}{} {:?}",
            idx,
            token.line,
            token.character,
            token.length,
            legend.type_name(token.token_type).unwrap_or("<unknown>"),
            if modifiers.is_empty() { "" } else { " +" },
            modifiers.join("+"),
            text,
        );
    }
    out
}
