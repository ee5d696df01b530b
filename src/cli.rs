use std::{
    fs,
    io::{self, IsTerminal, Read, Write},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand, ValueEnum};
use clipboard::{ClipboardContext, ClipboardProvider};
use color_eyre::{
    eyre::{eyre, Report},
    Result, Section,
};
use colored_json::ColorMode;
use dynojson::{document, Direction};
use serde_json::Value;
use tracing::info;

use crate::config::{get_config_dir, get_data_dir, Config};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Maximum list/map nesting accepted by the converter
    #[arg(long, global = true, value_name = "DEPTH")]
    pub max_depth: Option<usize>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Convert DynamoDB JSON into plain JSON
    ToPlain(ConvertArgs),
    /// Convert plain JSON into DynamoDB JSON
    ToDynamo(ConvertArgs),
    /// Print a sample input document for a direction
    Sample {
        #[arg(value_enum, default_value_t = Direction::ToPlain)]
        direction: Direction,
    },
    /// Open the interactive converter (the default)
    Tui {
        /// Direction to start in; defaults to the configured one
        #[arg(short, long, value_enum)]
        direction: Option<Direction>,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ConvertArgs {
    /// Input file; standard input when omitted or `-`
    pub input: Option<PathBuf>,

    /// Write the result to a file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Single-line output
    #[arg(short, long, conflicts_with = "indent")]
    pub compact: bool,

    /// Spaces per indentation level
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Also copy the result to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    pub color: ColorWhen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ConvertArgs {
    fn indent(&self, config: &Config) -> usize {
        if self.compact {
            0
        } else {
            self.indent.unwrap_or(config.indent)
        }
    }

    /// Color only pretty output with the standard 2-space layout headed for stdout.
    fn colored(&self, config: &Config) -> bool {
        if self.output.is_some() || self.indent(config) != document::DEFAULT_INDENT {
            return false;
        }
        match self.color {
            ColorWhen::Always => true,
            ColorWhen::Never => false,
            ColorWhen::Auto => config.color && io::stdout().is_terminal(),
        }
    }
}

/// Run a one-shot conversion and write the result.
pub fn run_convert(direction: Direction, args: &ConvertArgs, config: &Config) -> Result<()> {
    let input = read_input(args.input.as_deref())?;
    let value = convert(&input, direction, config)?;
    let rendered = document::render(&value, args.indent(config))?;

    info!(%direction, bytes = rendered.len(), "converted document");

    if args.copy {
        copy_to_clipboard(&rendered)?;
    }

    match &args.output {
        Some(path) => fs::write(path, format!("{rendered}\n"))
            .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?,
        None => {
            let text = if args.colored(config) {
                colored_json::to_colored_json(&value, ColorMode::On)?
            } else {
                rendered
            };
            writeln!(io::stdout().lock(), "{text}")?;
        }
    }

    Ok(())
}

/// Parse and convert `input`, attaching the remediation hint on failure.
pub fn convert(input: &str, direction: Direction, config: &Config) -> Result<Value> {
    document::convert_text(input, direction, &config.converter()).map_err(|err| {
        let hint = err.hint();
        Report::new(err).suggestion(hint)
    })
}

pub fn print_sample(direction: Direction) -> Result<()> {
    writeln!(io::stdout().lock(), "{}", direction.sample())?;
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|e| eyre!("cannot read {}: {e}", path.display()))
        }
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut ctx: ClipboardContext =
        ClipboardProvider::new().map_err(|e| eyre!("cannot access clipboard: {e}"))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| eyre!("cannot copy to clipboard: {e}"))
}

const VERSION_MESSAGE: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_BUILD_DATE"),
    ", ",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
    ")"
);

pub fn version() -> String {
    let config_dir_path = get_config_dir().display().to_string();
    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}
