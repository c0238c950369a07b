use super::legend::Legend;
use crate::errors::SemanticTokensResult;

pub fn encode_token_type(legend: &Legend, name: &str) -> SemanticTokensResult<u32> {
    legend.type_index(name)
}

/// Folds modifier names into a bitmask over the legend. Names the legend does
/// not contain set no bit.
pub fn encode_token_modifiers<I>(legend: &Legend, names: I) -> u32
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| legend.modifier_index(name.as_ref()))
        .fold(0, |bits, idx| bits | (1u32 << idx))
}
