mod action;
mod app;
mod cli;
mod components;
mod config;
mod domain;
mod errors;
mod logging;
mod pages;
mod theme;
mod timer;
mod tui;

use clap::Parser;
use color_eyre::Result;

use crate::app::App;
use crate::cli::{Cli, Cmd};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    if let Some(Cmd::Scores) = args.cmd {
        return cli::print_scores();
    }

    crate::errors::init()?;
    crate::logging::init()?;
    paths::ensure_directories()?;

    let mut app = App::new(args)?;
    app.run().await?;
    Ok(())
}
