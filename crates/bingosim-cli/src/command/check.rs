use anyhow::Context as _;
use bingosim_engine::{BingoCard, get_win_types, winning_tile_indices};

use crate::util::RuleArgs;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CheckArg {
    /// The 25 card numbers in row-major order, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    card: Vec<u8>,
    /// Numbers drawn so far, comma separated
    #[arg(long, value_delimiter = ',')]
    drawn: Vec<u8>,
    #[command(flatten)]
    rules: RuleArgs,
}

pub(crate) fn run(arg: &CheckArg) -> anyhow::Result<()> {
    let card = BingoCard::new(arg.card.iter().copied()).context("Invalid card")?;
    if !card.follows_column_ranges() {
        tracing::warn!("card does not follow the B-I-N-G-O column ranges");
    }
    let config = arg.rules.config();

    println!("{card}");
    let wins = get_win_types(&card, &arg.drawn, config);
    if wins.is_empty() {
        println!("No win after {} draws", arg.drawn.len());
        return Ok(());
    }
    for win in wins {
        let cells = winning_tile_indices(win)
            .iter()
            .map(|pos| format!("({},{})", pos.row, pos.col))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{win}: {cells}");
    }
    Ok(())
}
