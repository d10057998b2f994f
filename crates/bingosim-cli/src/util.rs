use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context;
use bingosim_engine::{BingoSimulation, SimulationSeed, WinRuleConfig};
use rand::Rng as _;
use tracing_subscriber::EnvFilter;

/// Logging options shared by every sub-command.
#[derive(Debug, Clone, Default, clap::Args)]
pub(crate) struct TracingArgs {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

impl TracingArgs {
    pub(crate) fn init_tracing(&self) {
        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

/// How to generate a simulation.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulationArgs {
    /// Number of games to simulate
    #[arg(long, default_value_t = 10_000)]
    pub games: usize,
    /// Number of players (cards) per game
    #[arg(long, default_value_t = 10)]
    pub players: usize,
    /// 32-digit hex seed for a reproducible run (random if omitted)
    #[arg(long)]
    pub seed: Option<SimulationSeed>,
}

impl SimulationArgs {
    pub(crate) fn generate(&self) -> anyhow::Result<BingoSimulation> {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        eprintln!(
            "Simulating {} games with {} players (seed {seed})...",
            self.games, self.players
        );
        let start = Instant::now();
        let simulation = BingoSimulation::with_seed(self.games, self.players, seed)
            .context("Invalid simulation parameters")?;
        tracing::info!(
            simulation = %simulation.id(),
            elapsed = ?start.elapsed(),
            "simulation generated"
        );
        Ok(simulation)
    }
}

/// Optional win rules.
#[derive(Debug, Clone, Copy, Default, clap::Args)]
pub(crate) struct RuleArgs {
    /// Count the four corners as a win
    #[arg(long)]
    pub check_corners: bool,
    /// Treat the center cell as marked from the start
    #[arg(long)]
    pub free_space: bool,
}

impl RuleArgs {
    pub(crate) fn config(self) -> WinRuleConfig {
        WinRuleConfig::new(self.check_corners, self.free_space)
    }
}

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)?;
        if let Output::File { path, .. } = &output {
            eprintln!("Wrote {}", path.display());
        }
        Ok(())
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Read a simulation previously written by `bingosim simulate`
pub fn read_simulation_file<P>(path: P) -> anyhow::Result<BingoSimulation>
where
    P: AsRef<Path>,
{
    read_json_file("simulation", path)
}

/// Prints a percentage series to stderr as `#` bars scaled to the largest entry.
pub fn print_histogram<I, S>(data: I)
where
    I: Iterator<Item = (S, f64)>,
    S: fmt::Display,
{
    const MAX_BAR_WIDTH: f64 = 50.0;
    let data = data.collect::<Vec<_>>();
    let max_value = data.iter().map(|(_, v)| *v).fold(0.0, f64::max);
    for (label, value) in &data {
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar_width = if max_value > 0.0 {
            (value / max_value * MAX_BAR_WIDTH).round() as usize
        } else {
            0
        };
        eprintln!("{label:>15} | {value:>6.2}% {}", "#".repeat(bar_width));
    }
}
