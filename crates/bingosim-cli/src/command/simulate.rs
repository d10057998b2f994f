use std::path::PathBuf;

use crate::util::{Output, SimulationArgs};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[command(flatten)]
    simulation: SimulationArgs,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg { simulation, output } = arg;
    let simulation = simulation.generate()?;
    Output::save_json(&simulation, output.clone())?;
    Ok(())
}
