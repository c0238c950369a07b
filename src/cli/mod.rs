use colored::{Color, ColoredString, Colorize};
use log::Level;
use std::error::Error;
use std::io;
use std::process;
use structopt::StructOpt;

mod encode;
mod legend;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "semtokens",
    about = "Encodes classified source spans into LSP semantic tokens"
)]
pub struct Cli {
    #[structopt(
        long, env = "LOG_LEVEL",
        help = "Sets the log level",
        default_value = "info",
        possible_values = &["off", "error", "warn", "info", "debug", "trace"],
        global = true
    )]
    log_level: log::LevelFilter,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(Debug, StructOpt)]
pub enum Command {
    /// Prints the token legend advertised to clients
    Legend(legend::LegendOptions),
    /// Encodes recorded span snapshots
    Encode(encode::EncodeOptions),
}

#[derive(Debug)]
pub struct CmdError {
    msg: String,
}

impl CmdError {
    pub fn new(msg: impl Into<String>) -> Self {
        CmdError { msg: msg.into() }
    }
}

impl<E: Error> From<E> for CmdError {
    fn from(e: E) -> Self {
        CmdError { msg: e.to_string() }
    }
}

pub fn run() {
    // get the subcommand
    let cli: Cli = Cli::from_args();

    // set up logging
    if let Err(err) = setup_logging(cli.log_level) {
        eprintln!("{} {}", "logging error:".red(), err);
    }

    let result = match cli.cmd {
        Command::Legend(options) => legend::action(options),
        Command::Encode(options) => encode::action(options),
    };

    if let Err(err) = result {
        eprintln!("{} {}", "error:".bold().red(), err.msg.bold());
        process::exit(1);
    }
}

fn setup_logging(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = record.level();
            let color = match level {
                Level::Error => Color::Red,
                Level::Warn => Color::Yellow,
                Level::Info => Color::Blue,
                Level::Debug => Color::Magenta,
                Level::Trace => Color::Green,
            };
            out.finish(format_args!(
                "{} {}",
                ColoredString::from((level.to_string().to_lowercase() + ":").as_str())
                    .color(color)
                    .to_string(),
                message
            ))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}
