use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info};
use structopt::StructOpt;

use super::CmdError;
use crate::{
    cancellation::{CancellationToken, NeverCancelled},
    ide::{
        semantic_tokens::{compute_semantic_tokens, legend, pretty_dump, EncodedTokens},
        snapshot::{Snapshot, SnapshotProgram},
    },
};

#[derive(Debug, StructOpt)]
pub struct EncodeOptions {
    #[structopt(
        parse(from_os_str),
        required = true,
        help = "Snapshot files holding source text and classified spans"
    )]
    pub snapshots: Vec<PathBuf>,

    #[structopt(long, help = "Print a decoded listing of every token to stderr")]
    pub dump: bool,
}

pub(super) fn action(options: EncodeOptions) -> Result<(), CmdError> {
    let start_time = Instant::now();
    let mut program = SnapshotProgram::new();
    let mut sources = Vec::with_capacity(options.snapshots.len());
    for path in &options.snapshots {
        let snapshot = Snapshot::load(path).map_err(|err| CmdError::new(err.to_string()))?;
        let document = path.display().to_string();
        sources.push((document.clone(), snapshot.source_text().to_string()));
        program.insert(document, snapshot);
    }

    for (document, source) in &sources {
        let tokens = encode_document(&program, document, &NeverCancelled)?;
        debug!("{}: {} tokens", document, tokens.len());
        if options.dump {
            eprint!("{}", pretty_dump(&tokens, source, legend()));
        }
        println!("{}", serde_json::to_string(&tokens.into_lsp())?);
    }

    info!(
        "encoded {} documents in {:?}",
        sources.len(),
        start_time.elapsed()
    );
    Ok(())
}

fn encode_document<C>(
    program: &SnapshotProgram,
    document: &str,
    token: &C,
) -> Result<EncodedTokens, CmdError>
where
    C: CancellationToken + ?Sized,
{
    compute_semantic_tokens(program, document, token)
        .map_err(|err| CmdError::new(format!("{}: {}", document, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cancellation::CancellationFlag, ide::semantic_tokens::ClassifiedSpan};

    fn program() -> SnapshotProgram {
        let mut program = SnapshotProgram::new();
        program.insert(
            "a.json",
            Snapshot {
                source: Some("pass\n".to_string()),
                syntax: vec![ClassifiedSpan::new(0, 4, "keyword")],
                ..Snapshot::default()
            },
        );
        program.insert(
            "b.json",
            Snapshot {
                source: Some("x\n".to_string()),
                semantic: vec![ClassifiedSpan::new(0, 1, "thing")],
                ..Snapshot::default()
            },
        );
        program
    }

    #[test]
    fn encodes_a_document() {
        let tokens = encode_document(&program(), "a.json", &NeverCancelled).unwrap();
        assert_eq!(tokens.data, vec![0, 0, 4, 10, 0]);
    }

    #[test]
    fn errors_name_the_document() {
        let err = encode_document(&program(), "b.json", &NeverCancelled).unwrap_err();
        assert_eq!(err.msg, "b.json: unknown token type: thing");
    }

    #[test]
    fn cancellation_is_reported_as_an_error() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let err = encode_document(&program(), "a.json", &flag).unwrap_err();
        assert_eq!(err.msg, "a.json: request cancelled");
    }
}
