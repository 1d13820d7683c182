use clap::{Parser, Subcommand};
use color_eyre::Result;

use crate::domain::deck::Difficulty;
use crate::domain::scores::ScoreBook;
use crate::pages::PageId;

#[derive(Parser)]
#[command(
    name = "parlor",
    version,
    about = "Terminal guest desk: a feedback form and a memory game"
)]
pub struct Cli {
    /// Page to open at startup
    #[arg(long, value_enum, default_value_t = PageId::Contact)]
    pub page: PageId,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Print the persisted best scores without entering the TUI
    /// (scripts/monitoring)
    Scores,
}

pub fn print_scores() -> Result<()> {
    let book = ScoreBook::load(paths::scores_file());
    for difficulty in [Difficulty::Easy, Difficulty::Hard] {
        let best = book
            .best(difficulty)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "–".to_string());
        println!("{difficulty}: {best}");
    }
    Ok(())
}
