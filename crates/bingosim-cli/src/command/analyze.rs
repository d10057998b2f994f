use std::{path::PathBuf, time::Duration};

use bingosim_analysis::{
    analyzer::{Analyzer, SimulationAnalysis},
    cache::CacheConfig,
    heat_map::HeatMapData,
};
use bingosim_engine::{CARD_SIZE, HEADERS, WinRuleConfig};
use bingosim_stats::distribution::Distribution;

use crate::util::{self, Output, RuleArgs, SimulationArgs};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Simulation JSON written by `simulate` (a new one is generated if omitted)
    #[arg(long, conflicts_with_all = ["games", "players", "seed"])]
    input: Option<PathBuf>,
    #[command(flatten)]
    simulation: SimulationArgs,
    #[command(flatten)]
    rules: RuleArgs,
    /// Maximum number of cached results per cache
    #[arg(long, default_value_t = CacheConfig::DEFAULT_CAPACITY)]
    cache_capacity: usize,
    /// Seconds a cached result stays valid (0 keeps results until evicted)
    #[arg(long, default_value_t = CacheConfig::DEFAULT_TTL.as_secs())]
    cache_ttl_secs: u64,
    /// Output file path for the analysis JSON (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

impl AnalyzeArg {
    fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.cache_capacity,
            ttl: (self.cache_ttl_secs > 0).then(|| Duration::from_secs(self.cache_ttl_secs)),
        }
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let simulation = match &arg.input {
        Some(path) => {
            eprintln!("Loading simulation from {}...", path.display());
            util::read_simulation_file(path)?
        }
        None => arg.simulation.generate()?,
    };
    let config = arg.rules.config();

    eprintln!(
        "Analyzing {} games with {} players...",
        simulation.num_games(),
        simulation.num_players()
    );
    let analyzer = Analyzer::new(arg.cache_config());
    let analysis = analyzer.analyze(&simulation, config);
    tracing::debug!(stats = ?analyzer.stats(), "cache usage");

    print_report(&analysis, config);
    Output::save_json(&analysis, arg.output.clone())?;
    Ok(())
}

fn print_report(analysis: &SimulationAnalysis, config: WinRuleConfig) {
    let free_space = config.with_free_space();
    let rows = [
        (
            format!("first win ({})", describe_rules(config)),
            &analysis.winning_turn_distribution,
        ),
        (
            format!("first win ({})", describe_rules(free_space)),
            &analysis.with_free_space,
        ),
        (
            format!(
                "first win ({})",
                describe_rules(WinRuleConfig::new(true, true))
            ),
            &analysis.with_free_space_and_corners,
        ),
        (
            "turns to next winner".to_owned(),
            &analysis.turns_until_next_winner,
        ),
    ];
    for (label, dist) in rows {
        print_summary(&label, dist);
    }

    eprintln!();
    eprintln!("Winning turn distribution:");
    util::print_histogram(
        analysis
            .winning_turn_distribution
            .percentage_series()
            .into_iter()
            .map(|(turn, percent)| (format!("turn {turn}"), percent)),
    );

    eprintln!();
    eprintln!("Win participation per cell:");
    print_heat_map(&analysis.heat_map_data);
}

fn describe_rules(config: WinRuleConfig) -> String {
    match (config.check_corners, config.use_free_space) {
        (false, false) => "lines".to_owned(),
        (true, false) => "lines + corners".to_owned(),
        (false, true) => "lines, free space".to_owned(),
        (true, true) => "lines + corners, free space".to_owned(),
    }
}

fn print_summary(label: &str, dist: &Distribution) {
    match dist.summary() {
        Some(summary) => eprintln!(
            "{label:<40} min {:>3}  max {:>3}  mean {:>6.2}  ({} games)",
            summary.min, summary.max, summary.mean, summary.total
        ),
        None => eprintln!("{label:<40} no samples"),
    }
}

fn print_heat_map(data: &HeatMapData) {
    let header = HEADERS.iter().map(|h| format!("{h:>7}")).collect::<String>();
    eprintln!("{header}");
    for row in data.tiles.chunks(CARD_SIZE) {
        let line = row
            .iter()
            .map(|tile| format!("{:>6.1}%", tile.frequency * 100.0))
            .collect::<String>();
        eprintln!("{line}");
    }
    eprintln!(
        "({} games, {} win patterns)",
        data.games_counted, data.total_win_events
    );
}
