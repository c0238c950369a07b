//! Computes the `textDocument/semanticTokens/full` payload for a document.
//!
//! Classification is owned by the program's walker. This module orders the
//! spans, maps them to positions, and encodes them against the legend.

use std::fmt;

use log::{debug, trace};

use super::{
    builder::{EncodedTokens, SemanticTokensBuilder},
    encoder::{encode_token_modifiers, encode_token_type},
    legend::{legend, Legend},
    walker::{ClassifiedSpan, SemanticWalker, WalkMode},
};
use crate::{
    cancellation::{throw_if_cancellation_requested, CancellationToken},
    errors::SemanticTokensResult,
    span::{convert_offsets_to_range, LineTable},
};

/// Tokenizer and parser output for one document snapshot.
pub trait ParseResults {
    type Token: Clone;
    type Tree: ?Sized;

    fn token_count(&self) -> usize;

    fn token_at(&self, index: usize) -> Self::Token;

    fn lines(&self) -> &LineTable;

    fn parse_tree(&self) -> &Self::Tree;
}

/// The analysis context a request runs against.
pub trait Program {
    type Document: fmt::Debug + ?Sized;
    type Parsed: ParseResults;
    type Walker<'a>: SemanticWalker<Tree = <Self::Parsed as ParseResults>::Tree>
    where
        Self: 'a;

    fn parse_results(&self, document: &Self::Document) -> Option<&Self::Parsed>;

    fn create_walker<'a>(
        &'a self,
        tokens: &'a [<Self::Parsed as ParseResults>::Token],
        mode: WalkMode,
    ) -> Self::Walker<'a>;
}

/// Encodes semantic tokens for `document` against the process-wide legend.
pub fn compute_semantic_tokens<P, C>(
    program: &P,
    document: &P::Document,
    token: &C,
) -> SemanticTokensResult<EncodedTokens>
where
    P: Program,
    C: CancellationToken + ?Sized,
{
    compute_semantic_tokens_with_legend(program, document, token, legend())
}

pub fn compute_semantic_tokens_with_legend<P, C>(
    program: &P,
    document: &P::Document,
    token: &C,
    legend: &Legend,
) -> SemanticTokensResult<EncodedTokens>
where
    P: Program,
    C: CancellationToken + ?Sized,
{
    let builder = SemanticTokensBuilder::new();
    let parse_results = match program.parse_results(document) {
        Some(parse_results) => parse_results,
        None => {
            debug!("semantic tokens: no parse results for {:?}", document);
            return Ok(builder.finish());
        }
    };

    // the walker looks tokens up by index
    let tokens = (0..parse_results.token_count())
        .map(|idx| parse_results.token_at(idx))
        .collect::<Vec<_>>();

    let mut walker = program.create_walker(&tokens, WalkMode::Comprehensive);
    walker.walk(parse_results.parse_tree());
    let mut items = walker.into_items();

    if let Err(err) = throw_if_cancellation_requested(token) {
        debug!("semantic tokens: cancelled for {:?}", document);
        return Err(err);
    }

    debug!(
        "semantic tokens: {} spans from {} lexical tokens for {:?}",
        items.len(),
        tokens.len(),
        document
    );

    sort_spans(&mut items);
    encode_spans(builder, &items, parse_results.lines(), legend)
}

/// Stable, so spans that share a start keep the walker's emission order.
fn sort_spans(items: &mut [ClassifiedSpan]) {
    items.sort_by_key(|item| item.start);
}

fn encode_spans(
    mut builder: SemanticTokensBuilder,
    items: &[ClassifiedSpan],
    lines: &LineTable,
    legend: &Legend,
) -> SemanticTokensResult<EncodedTokens> {
    for item in items {
        let range = convert_offsets_to_range(item.start, item.end(), lines);
        let token_type = encode_token_type(legend, &item.token_type)?;
        let modifiers = encode_token_modifiers(legend, &item.modifiers);
        trace!(
            "semantic tokens: {} len={} {}({}) mods={:#b}",
            range.start,
            item.length,
            item.token_type,
            token_type,
            modifiers
        );
        builder.push(
            range.start.line,
            range.start.character,
            item.length,
            token_type,
            modifiers,
        )?;
    }

    Ok(builder.finish())
}
