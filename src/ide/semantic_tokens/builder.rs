//! Relative encoding of semantic tokens.
//!
//! Every token becomes five integers: line delta, start delta, length, type
//! index and modifier bitmask. The start delta is relative to the previous
//! token's start column when both share a line, and absolute otherwise.

use serde::{Deserialize, Serialize};

use crate::errors::{SemanticTokensError, SemanticTokensResult};

const RECORD_LEN: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuilderState {
    Empty,
    Building,
    Built,
}

/// The flat wire payload, five integers per token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedTokens {
    pub data: Vec<u32>,
}

/// A token with its position made absolute again.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbsoluteToken {
    pub line: u32,
    pub character: u32,
    pub length: u32,
    pub token_type: u32,
    pub modifiers: u32,
}

impl EncodedTokens {
    /// Number of tokens, not integers.
    pub fn len(&self) -> usize {
        self.data.len() / RECORD_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Reverses the delta accumulation. A trailing partial record is ignored,
    /// and deltas that overflow wrap rather than panic.
    pub fn decode(&self) -> Vec<AbsoluteToken> {
        let mut line = 0u32;
        let mut character = 0u32;
        self.data
            .chunks_exact(RECORD_LEN)
            .map(|record| {
                line = line.wrapping_add(record[0]);
                if record[0] == 0 {
                    character = character.wrapping_add(record[1]);
                } else {
                    character = record[1];
                }
                AbsoluteToken {
                    line,
                    character,
                    length: record[2],
                    token_type: record[3],
                    modifiers: record[4],
                }
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct SemanticTokensBuilder {
    tokens: EncodedTokens,
    prev_line: u32,
    prev_char: u32,
    state: BuilderState,
}

impl Default for SemanticTokensBuilder {
    fn default() -> Self {
        SemanticTokensBuilder::new()
    }
}

impl SemanticTokensBuilder {
    pub fn new() -> SemanticTokensBuilder {
        SemanticTokensBuilder {
            tokens: EncodedTokens::default(),
            prev_line: 0,
            prev_char: 0,
            state: BuilderState::Empty,
        }
    }

    pub fn state(&self) -> BuilderState {
        self.state
    }

    /// Appends a token. Callers push in non-decreasing `(line, character)`
    /// order; the builder neither sorts nor checks.
    pub fn push(
        &mut self,
        line: u32,
        character: u32,
        length: u32,
        token_type: u32,
        modifiers: u32,
    ) -> SemanticTokensResult {
        let (delta_line, delta_start) = match self.state {
            BuilderState::Built => return Err(SemanticTokensError::BuilderFinalized),
            BuilderState::Empty => (line, character),
            BuilderState::Building => {
                let delta_line = line.saturating_sub(self.prev_line);
                let delta_start = if delta_line == 0 {
                    character.saturating_sub(self.prev_char)
                } else {
                    character
                };
                (delta_line, delta_start)
            }
        };

        self.tokens
            .data
            .extend_from_slice(&[delta_line, delta_start, length, token_type, modifiers]);
        self.prev_line = line;
        self.prev_char = character;
        self.state = BuilderState::Building;
        Ok(())
    }

    /// Freezes the builder. Later calls return the same tokens.
    pub fn build(&mut self) -> &EncodedTokens {
        self.state = BuilderState::Built;
        &self.tokens
    }

    pub fn finish(mut self) -> EncodedTokens {
        self.build();
        self.tokens
    }
}
