use std::{error::Error, fmt};

pub type SemanticTokensResult<T = ()> = Result<T, SemanticTokensError>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum LegendKind {
    Type,
    Modifier,
}

impl fmt::Display for LegendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LegendKind::Type => "token type",
                LegendKind::Modifier => "token modifier",
            }
        )
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SemanticTokensError {
    /// A classified span carried a type name the legend does not know about.
    /// The classifier and the legend are out of sync.
    UnknownTokenType(String),
    /// The request was cancelled before encoding started.
    Cancelled,
    /// `push` was called on a builder that has already been built.
    BuilderFinalized,
    DuplicateLegendEntry {
        kind: LegendKind,
        name: String,
    },
    /// The modifier bitmask is 32 bits wide.
    TooManyModifiers(usize),
}

impl SemanticTokensError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, SemanticTokensError::Cancelled)
    }
}

impl fmt::Display for SemanticTokensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticTokensError::UnknownTokenType(name) => {
                write!(f, "unknown token type: {}", name)
            }
            SemanticTokensError::Cancelled => write!(f, "request cancelled"),
            SemanticTokensError::BuilderFinalized => {
                write!(f, "cannot push a token after the builder was built")
            }
            SemanticTokensError::DuplicateLegendEntry { kind, name } => {
                write!(f, "duplicate {} in legend: {}", kind, name)
            }
            SemanticTokensError::TooManyModifiers(count) => write!(
                f,
                "legend declares {} token modifiers, at most 32 fit in the bitmask",
                count
            ),
        }
    }
}

impl Error for SemanticTokensError {}
