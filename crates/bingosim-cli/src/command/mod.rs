use clap::{Parser, Subcommand};

use crate::util::TracingArgs;

use self::{analyze::AnalyzeArg, check::CheckArg, simulate::SimulateArg};

mod analyze;
mod check;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    tracing: TracingArgs,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a simulation and write it as JSON
    Simulate(#[clap(flatten)] SimulateArg),
    /// Compute turn distributions and the win heat map of a simulation
    Analyze(#[clap(flatten)] AnalyzeArg),
    /// Show which win patterns a card completes for a list of drawn numbers
    Check(#[clap(flatten)] CheckArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    args.tracing.init_tracing();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::Analyze(arg) => analyze::run(&arg)?,
        Mode::Check(arg) => check::run(&arg)?,
    }
    Ok(())
}
