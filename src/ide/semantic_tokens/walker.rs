use serde::{Deserialize, Serialize};

/// A classified source range as produced by a walker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedSpan {
    pub start: u32,
    pub length: u32,
    #[serde(rename = "type")]
    pub token_type: String,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

impl ClassifiedSpan {
    pub fn new(start: u32, length: u32, token_type: impl Into<String>) -> Self {
        ClassifiedSpan {
            start,
            length,
            token_type: token_type.into(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_modifiers<I>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.modifiers.extend(modifiers.into_iter().map(Into::into));
        self
    }

    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.length)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkMode {
    /// Lexical tokens (keywords, operators, literals) in addition to
    /// symbol-resolved ones.
    Comprehensive,
    SemanticOnly,
}

impl WalkMode {
    pub fn includes_syntax(self) -> bool {
        matches!(self, WalkMode::Comprehensive)
    }
}

/// Visits a parse tree and records the classified spans it finds.
pub trait SemanticWalker {
    type Tree: ?Sized;

    fn walk(&mut self, tree: &Self::Tree);

    /// The spans in the order they were emitted.
    fn into_items(self) -> Vec<ClassifiedSpan>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_type_field_and_defaults_modifiers() {
        let span: ClassifiedSpan =
            serde_json::from_str(r#"{"start": 4, "length": 3, "type": "function"}"#).unwrap();
        assert_eq!(span, ClassifiedSpan::new(4, 3, "function"));
        assert_eq!(span.end(), 7);

        let span: ClassifiedSpan = serde_json::from_str(
            r#"{"start": 0, "length": 1, "type": "variable", "modifiers": ["readonly"]}"#,
        )
        .unwrap();
        assert_eq!(span.modifiers, vec!["readonly".to_string()]);
    }

    #[test]
    fn only_comprehensive_mode_includes_syntax() {
        assert!(WalkMode::Comprehensive.includes_syntax());
        assert!(!WalkMode::SemanticOnly.includes_syntax());
    }
}
