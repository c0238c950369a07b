use structopt::StructOpt;

use super::CmdError;
use crate::ide::semantic_tokens::legend;

#[derive(Debug, StructOpt)]
pub struct LegendOptions {
    #[structopt(long, help = "Pretty-print the JSON output")]
    pub pretty: bool,
}

pub(super) fn action(options: LegendOptions) -> Result<(), CmdError> {
    let legend = legend().lsp_legend();
    let json = if options.pretty {
        serde_json::to_string_pretty(&legend)?
    } else {
        serde_json::to_string(&legend)?
    };
    println!("{}", json);
    Ok(())
}
