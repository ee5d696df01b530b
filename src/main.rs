use clap::Parser;
use color_eyre::Result;
use dynojson::Direction;

use crate::{
    app::App,
    cli::{Cli, Command},
    config::Config,
};

mod action;
mod app;
mod cli;
mod components;
mod config;
mod constants;
mod errors;
mod logging;

#[tokio::main]
async fn main() -> Result<()> {
    errors::init()?;
    logging::init()?;

    let args = Cli::parse();
    let mut config = Config::new()?;
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }

    match args.command.unwrap_or(Command::Tui { direction: None }) {
        Command::ToPlain(convert) => cli::run_convert(Direction::ToPlain, &convert, &config),
        Command::ToDynamo(convert) => cli::run_convert(Direction::ToDynamo, &convert, &config),
        Command::Sample { direction } => cli::print_sample(direction),
        Command::Tui { direction } => {
            let mut app = App::new(config, direction);
            app.run().await
        }
    }
}
