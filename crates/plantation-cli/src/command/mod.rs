use clap::{Parser, Subcommand};

use self::{serve::ServeArg, show_lineage::ShowLineageArg};

mod serve;
mod show_lineage;

/// Lineage directory used when none is given on the command line.
const DEFAULT_LINEAGE_DIR: &str = "lineages";

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play one game, reading JSON requests from stdin and answering on stdout
    Serve(#[clap(flatten)] ServeArg),
    /// Print a summary of a persisted lineage
    ShowLineage(#[clap(flatten)] ShowLineageArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Serve(ServeArg::default())) {
        Mode::Serve(arg) => serve::run(&arg)?,
        Mode::ShowLineage(arg) => show_lineage::run(&arg)?,
    }
    Ok(())
}
