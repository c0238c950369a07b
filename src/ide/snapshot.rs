//! Replays recorded classifications through the semantic token provider.
//!
//! A snapshot is a JSON document holding the source text (inline or by path)
//! and the spans an analyzer produced for it: `syntax` spans come from the
//! tokenizer, `semantic` spans from name resolution. Snapshots let the encoder
//! run, and be inspected, without a live analyzer.

use std::{
    error::Error,
    fs,
    path::{Path, PathBuf},
};

use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};

use super::semantic_tokens::{ClassifiedSpan, ParseResults, Program, SemanticWalker, WalkMode};
use crate::span::LineTable;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    #[serde(default)]
    pub syntax: Vec<ClassifiedSpan>,
    #[serde(default)]
    pub semantic: Vec<ClassifiedSpan>,
}

impl Snapshot {
    /// Reads a snapshot file. A relative `sourcePath` is resolved against the
    /// snapshot's directory and loaded into `source`.
    pub fn load(path: &Path) -> Result<Snapshot, Box<dyn Error + Send + Sync>> {
        let text = fs::read_to_string(path)
            .map_err(|err| format!("failed to read {}: {}", path.display(), err))?;
        let mut snapshot: Snapshot = serde_json::from_str(&text)
            .map_err(|err| format!("invalid snapshot {}: {}", path.display(), err))?;

        if snapshot.source.is_none() {
            if let Some(source_path) = &snapshot.source_path {
                let full_path = match path.parent() {
                    Some(dir) if source_path.is_relative() => dir.join(source_path),
                    _ => source_path.clone(),
                };
                let source = fs::read_to_string(&full_path)
                    .map_err(|err| format!("failed to read {}: {}", full_path.display(), err))?;
                snapshot.source = Some(source);
            }
        }

        Ok(snapshot)
    }

    pub fn source_text(&self) -> &str {
        self.source.as_deref().unwrap_or("")
    }
}

#[derive(Debug)]
pub struct ParsedSnapshot {
    lines: LineTable,
    syntax: Vec<ClassifiedSpan>,
    semantic: Vec<ClassifiedSpan>,
}

impl From<Snapshot> for ParsedSnapshot {
    fn from(snapshot: Snapshot) -> Self {
        ParsedSnapshot {
            lines: LineTable::from_text(snapshot.source_text()),
            syntax: snapshot.syntax,
            semantic: snapshot.semantic,
        }
    }
}

impl ParseResults for ParsedSnapshot {
    type Token = ClassifiedSpan;
    type Tree = [ClassifiedSpan];

    fn token_count(&self) -> usize {
        self.syntax.len()
    }

    fn token_at(&self, index: usize) -> ClassifiedSpan {
        self.syntax[index].clone()
    }

    fn lines(&self) -> &LineTable {
        &self.lines
    }

    fn parse_tree(&self) -> &[ClassifiedSpan] {
        &self.semantic
    }
}

/// Emits the lexical spans (in comprehensive mode) followed by the semantic
/// ones, each in recorded order.
pub struct ReplayWalker<'a> {
    tokens: &'a [ClassifiedSpan],
    mode: WalkMode,
    items: Vec<ClassifiedSpan>,
}

impl SemanticWalker for ReplayWalker<'_> {
    type Tree = [ClassifiedSpan];

    fn walk(&mut self, tree: &[ClassifiedSpan]) {
        if self.mode.includes_syntax() {
            self.items.extend_from_slice(self.tokens);
        }
        self.items.extend_from_slice(tree);
    }

    fn into_items(self) -> Vec<ClassifiedSpan> {
        self.items
    }
}

/// Snapshots keyed by document name.
#[derive(Debug, Default)]
pub struct SnapshotProgram {
    documents: FnvHashMap<String, ParsedSnapshot>,
}

impl SnapshotProgram {
    pub fn new() -> SnapshotProgram {
        SnapshotProgram::default()
    }

    pub fn insert(&mut self, document: impl Into<String>, snapshot: Snapshot) {
        self.documents.insert(document.into(), snapshot.into());
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Program for SnapshotProgram {
    type Document = str;
    type Parsed = ParsedSnapshot;
    type Walker<'a> = ReplayWalker<'a>;

    fn parse_results(&self, document: &str) -> Option<&ParsedSnapshot> {
        self.documents.get(document)
    }

    fn create_walker<'a>(
        &'a self,
        tokens: &'a [ClassifiedSpan],
        mode: WalkMode,
    ) -> ReplayWalker<'a> {
        ReplayWalker {
            tokens,
            mode,
            items: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cancellation::NeverCancelled,
        ide::semantic_tokens::{compute_semantic_tokens, legend},
    };

    fn snapshot() -> Snapshot {
        serde_json::from_str(
            r#"{
                "source": "class Foo:\n    x = 1\n",
                "syntax": [
                    {"start": 0, "length": 5, "type": "keyword"},
                    {"start": 19, "length": 1, "type": "number"}
                ],
                "semantic": [
                    {"start": 15, "length": 1, "type": "variable", "modifiers": ["declaration"]},
                    {"start": 6, "length": 3, "type": "class", "modifiers": ["definition"]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn replays_syntax_and_semantic_spans() {
        let mut program = SnapshotProgram::new();
        program.insert("foo.py", snapshot());

        let tokens = compute_semantic_tokens(&program, "foo.py", &NeverCancelled).unwrap();
        let decoded = tokens
            .decode()
            .iter()
            .map(|t| {
                (
                    t.line,
                    t.character,
                    legend().type_name(t.token_type).unwrap_or(""),
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(
            decoded,
            vec![
                (0, 0, "keyword"),
                (0, 6, "class"),
                (1, 4, "variable"),
                (1, 8, "number"),
            ]
        );
    }

    #[test]
    fn semantic_only_walk_skips_lexical_spans() {
        let parsed = ParsedSnapshot::from(snapshot());
        let tokens = (0..parsed.token_count())
            .map(|idx| parsed.token_at(idx))
            .collect::<Vec<_>>();

        let program = SnapshotProgram::new();
        let mut walker = program.create_walker(&tokens, WalkMode::SemanticOnly);
        walker.walk(parsed.parse_tree());
        let items = walker.into_items();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|item| item.token_type != "keyword"));
    }

    #[test]
    fn unknown_document_has_no_tokens() {
        let mut program = SnapshotProgram::new();
        program.insert("foo.py", snapshot());
        let tokens = compute_semantic_tokens(&program, "bar.py", &NeverCancelled).unwrap();
        assert!(tokens.is_empty());
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn span_starting_at_the_offset_limit_clamps_to_the_end() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
                "source": "x\n",
                "semantic": [
                    {"start": 0, "length": 1, "type": "variable"},
                    {"start": 4294967295, "length": 1, "type": "variable"}
                ]
            }"#,
        )
        .unwrap();
        let mut program = SnapshotProgram::new();
        program.insert("edge.py", snapshot);

        let tokens = compute_semantic_tokens(&program, "edge.py", &NeverCancelled).unwrap();
        assert_eq!(tokens.data, vec![0, 0, 1, 8, 0, 0, 2, 1, 8, 0]);
    }

    #[test]
    fn load_resolves_source_path_next_to_the_snapshot() {
        let dir = std::env::temp_dir().join(format!("semtokens-snapshot-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("mod.py"), "pass\n").unwrap();
        fs::write(
            dir.join("mod.json"),
            r#"{"sourcePath": "mod.py", "syntax": [{"start": 0, "length": 4, "type": "keyword"}]}"#,
        )
        .unwrap();

        let snapshot = Snapshot::load(&dir.join("mod.json")).unwrap();
        assert_eq!(snapshot.source_text(), "pass\n");
        assert_eq!(snapshot.syntax.len(), 1);
        assert!(snapshot.semantic.is_empty());

        let missing = Snapshot::load(&dir.join("missing.json")).unwrap_err();
        assert!(missing.to_string().contains("failed to read"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
