//! The token legend shared with the client.
//!
//! Index `i` in each list is the wire code for that name. The order is fixed
//! for the lifetime of the process.

use fnv::FnvHashMap;
use tower_lsp::lsp_types::{SemanticTokenModifier, SemanticTokenType, SemanticTokensLegend};

use crate::errors::{LegendKind, SemanticTokensError, SemanticTokensResult};

pub const TOKEN_TYPES: [&str; 25] = [
    "class",
    "parameter",
    "typeParameter",
    "function",
    "method",
    "decorator",
    "property",
    "namespace",
    "variable",
    "type",
    "keyword",
    "operator",
    "string",
    "number",
    "comment",
    "regexp",
    "enumMember",
    "struct",
    "event",
    "interface",
    "enum",
    "macro",
    "label",
    // custom
    "selfParameter",
    "clsParameter",
];

pub const TOKEN_MODIFIERS: [&str; 11] = [
    "definition",
    "declaration",
    "async",
    "readonly",
    "defaultLibrary",
    "modification",
    "static",
    "abstract",
    "deprecated",
    "documentation",
    // custom
    "builtin",
];

const MAX_MODIFIERS: usize = u32::BITS as usize;

lazy_static! {
    static ref LEGEND: Legend = Legend::build(&TOKEN_TYPES, &TOKEN_MODIFIERS);
}

/// The process-wide legend.
pub fn legend() -> &'static Legend {
    &LEGEND
}

#[derive(Clone, Debug)]
pub struct Legend {
    token_types: Vec<String>,
    token_modifiers: Vec<String>,
    type_index: FnvHashMap<String, u32>,
    modifier_index: FnvHashMap<String, u32>,
}

impl Legend {
    pub fn new<T, M>(token_types: T, token_modifiers: M) -> SemanticTokensResult<Legend>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        let token_types = token_types.into_iter().map(Into::into).collect::<Vec<_>>();
        let token_modifiers = token_modifiers
            .into_iter()
            .map(Into::into)
            .collect::<Vec<_>>();

        if token_modifiers.len() > MAX_MODIFIERS {
            return Err(SemanticTokensError::TooManyModifiers(token_modifiers.len()));
        }

        let type_index = index_names(&token_types, LegendKind::Type)?;
        let modifier_index = index_names(&token_modifiers, LegendKind::Modifier)?;
        Ok(Legend {
            token_types,
            token_modifiers,
            type_index,
            modifier_index,
        })
    }

    fn build(token_types: &[&str], token_modifiers: &[&str]) -> Legend {
        match Legend::new(token_types.iter().copied(), token_modifiers.iter().copied()) {
            Ok(legend) => legend,
            Err(err) => panic!("BUG: builtin legend is invalid: {}", err),
        }
    }

    pub fn token_types(&self) -> &[String] {
        &self.token_types
    }

    pub fn token_modifiers(&self) -> &[String] {
        &self.token_modifiers
    }

    pub fn type_index(&self, name: &str) -> SemanticTokensResult<u32> {
        self.type_index
            .get(name)
            .copied()
            .ok_or_else(|| SemanticTokensError::UnknownTokenType(name.to_string()))
    }

    /// `None` is an ordinary outcome: classifiers may emit modifiers this
    /// legend predates.
    pub fn modifier_index(&self, name: &str) -> Option<u32> {
        self.modifier_index.get(name).copied()
    }

    pub fn type_name(&self, index: u32) -> Option<&str> {
        self.token_types.get(index as usize).map(String::as_str)
    }

    /// Names of the bits set in `bitmask`, in legend order.
    pub fn modifier_names(&self, bitmask: u32) -> Vec<&str> {
        self.token_modifiers
            .iter()
            .enumerate()
            .filter(|(idx, _)| bitmask & (1u32 << idx) != 0)
            .map(|(_, name)| name.as_str())
            .collect()
    }

    /// The legend in the shape advertised during capability negotiation.
    pub fn lsp_legend(&self) -> SemanticTokensLegend {
        SemanticTokensLegend {
            token_types: self
                .token_types
                .iter()
                .map(|name| SemanticTokenType::from(name.clone()))
                .collect(),
            token_modifiers: self
                .token_modifiers
                .iter()
                .map(|name| SemanticTokenModifier::from(name.clone()))
                .collect(),
        }
    }
}

fn index_names(
    names: &[String],
    kind: LegendKind,
) -> SemanticTokensResult<FnvHashMap<String, u32>> {
    let mut index = FnvHashMap::default();
    for (idx, name) in names.iter().enumerate() {
        if index.insert(name.clone(), idx as u32).is_some() {
            return Err(SemanticTokensError::DuplicateLegendEntry {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_indices_follow_declaration_order() {
        let legend = legend();
        assert_eq!(legend.type_index("class"), Ok(0));
        assert_eq!(legend.type_index("variable"), Ok(8));
        assert_eq!(legend.type_index("keyword"), Ok(10));
        assert_eq!(legend.type_index("clsParameter"), Ok(24));
        assert_eq!(legend.modifier_index("definition"), Some(0));
        assert_eq!(legend.modifier_index("static"), Some(6));
        assert_eq!(legend.modifier_index("builtin"), Some(10));
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert_eq!(
            legend().type_index("widget"),
            Err(SemanticTokensError::UnknownTokenType("widget".to_string()))
        );
    }

    #[test]
    fn unknown_modifier_is_not_found() {
        assert_eq!(legend().modifier_index("widget"), None);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = Legend::new(["class", "class"], Vec::<String>::new()).unwrap_err();
        assert_eq!(
            err,
            SemanticTokensError::DuplicateLegendEntry {
                kind: LegendKind::Type,
                name: "class".to_string(),
            }
        );

        let err = Legend::new(["class"], ["static", "async", "static"]).unwrap_err();
        assert!(matches!(
            err,
            SemanticTokensError::DuplicateLegendEntry {
                kind: LegendKind::Modifier,
                ..
            }
        ));
    }

    #[test]
    fn rejects_modifiers_that_do_not_fit_the_bitmask() {
        let modifiers = (0..33).map(|i| format!("m{}", i));
        assert_eq!(
            Legend::new(["class"], modifiers).unwrap_err(),
            SemanticTokensError::TooManyModifiers(33)
        );
    }

    #[test]
    fn lsp_legend_publishes_names_verbatim() {
        let lsp = legend().lsp_legend();
        let types = lsp
            .token_types
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>();
        let modifiers = lsp
            .token_modifiers
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>();
        assert_eq!(types, TOKEN_TYPES.to_vec());
        assert_eq!(modifiers, TOKEN_MODIFIERS.to_vec());
    }

    #[test]
    fn modifier_names_decode_a_bitmask() {
        let legend = legend();
        assert_eq!(legend.modifier_names(0), Vec::<&str>::new());
        assert_eq!(
            legend.modifier_names((1 << 1) | (1 << 6)),
            vec!["declaration", "static"]
        );
        assert_eq!(legend.type_name(3), Some("function"));
        assert_eq!(legend.type_name(99), None);
    }
}
