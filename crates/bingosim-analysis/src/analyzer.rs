use std::{
    hash::Hash,
    sync::{Arc, Mutex, PoisonError},
};

use bingosim_engine::{
    BingoGame, BingoSimulation, GameId, SimulationId, WinRuleConfig, WinningTurns,
};
use bingosim_stats::distribution::Distribution;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    cache::{CacheConfig, CacheStats, MemoCache},
    heat_map::{HeatMapAccumulator, HeatMapData},
};

/// Every aggregate a simulation is summarized by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationAnalysis {
    /// First winning turn per game under the requested rules.
    pub winning_turn_distribution: Distribution,
    /// Same, with the free space forced on.
    pub with_free_space: Distribution,
    /// Same, with both the free space and four corners on.
    pub with_free_space_and_corners: Distribution,
    /// Draws between the first and the next winner, for games that have one.
    pub turns_until_next_winner: Distribution,
    pub heat_map_data: HeatMapData,
}

fn rule_variants(config: WinRuleConfig) -> [WinRuleConfig; 2] {
    [config.with_free_space(), WinRuleConfig::new(true, true)]
}

/// First winning turn of every game.
#[must_use]
pub fn winning_turn_distribution(
    simulation: &BingoSimulation,
    config: WinRuleConfig,
) -> Distribution {
    simulation
        .games()
        .iter()
        .map(|game| i64::from(WinningTurns::resolve(game, config).first()))
        .collect()
}

/// Gap between the first and next winning turn of every game.
///
/// Games in which nobody wins strictly after the first winner are left out.
#[must_use]
pub fn turns_until_next_winner_distribution(
    simulation: &BingoSimulation,
    config: WinRuleConfig,
) -> Distribution {
    simulation
        .games()
        .iter()
        .filter_map(|game| WinningTurns::resolve(game, config).turns_until_next_winner())
        .map(i64::from)
        .collect()
}

#[must_use]
pub fn generate_heat_map_data(simulation: &BingoSimulation, config: WinRuleConfig) -> HeatMapData {
    let mut acc = HeatMapAccumulator::new();
    for game in simulation.games() {
        acc.add_game(game, &WinningTurns::resolve(game, config), config);
    }
    acc.finish()
}

/// Computes a [`SimulationAnalysis`] without caching anything.
#[must_use]
pub fn analyze_simulation(
    simulation: &BingoSimulation,
    config: WinRuleConfig,
) -> SimulationAnalysis {
    let [free_space, free_space_and_corners] = rule_variants(config);
    SimulationAnalysis {
        winning_turn_distribution: winning_turn_distribution(simulation, config),
        with_free_space: winning_turn_distribution(simulation, free_space),
        with_free_space_and_corners: winning_turn_distribution(simulation, free_space_and_corners),
        turns_until_next_winner: turns_until_next_winner_distribution(simulation, config),
        heat_map_data: generate_heat_map_data(simulation, config),
    }
}

type GameKey = (GameId, WinRuleConfig);
type SimulationKey = (SimulationId, WinRuleConfig);

/// Cache counters of every layer of an [`Analyzer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerStats {
    pub winning_turns: CacheStats,
    pub turn_distributions: CacheStats,
    pub next_winner_distributions: CacheStats,
    pub heat_maps: CacheStats,
}

/// Memoizing front end for the aggregate functions.
///
/// Results are cached per `(game id, rules)` and `(simulation id, rules)`.
/// Ids are process-unique and games are immutable, so a cached value can
/// never go stale; entries only leave through capacity or TTL.
///
/// The analyzer can be shared between threads. Each cache sits behind its
/// own mutex, held only for the lookup and the insert, never while computing.
///
/// # Example
///
/// ```
/// use bingosim_analysis::analyzer::{Analyzer, winning_turn_distribution};
/// use bingosim_engine::{BingoSimulation, SimulationSeed, WinRuleConfig};
///
/// let seed = SimulationSeed::from_bytes([1; 16]);
/// let simulation = BingoSimulation::with_seed(50, 3, seed).unwrap();
/// let analyzer = Analyzer::default();
///
/// let dist = analyzer.winning_turn_distribution(&simulation, WinRuleConfig::STANDARD);
/// assert_eq!(dist.total_count(), 50);
/// assert_eq!(*dist, winning_turn_distribution(&simulation, WinRuleConfig::STANDARD));
/// ```
#[derive(Debug)]
pub struct Analyzer {
    winning_turns: Mutex<MemoCache<GameKey, Arc<WinningTurns>>>,
    turn_distributions: Mutex<MemoCache<SimulationKey, Arc<Distribution>>>,
    next_winner_distributions: Mutex<MemoCache<SimulationKey, Arc<Distribution>>>,
    heat_maps: Mutex<MemoCache<SimulationKey, Arc<HeatMapData>>>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl Analyzer {
    /// Creates an analyzer whose caches follow `config`.
    ///
    /// `config.capacity` bounds the per-simulation caches. The per-game cache
    /// holds that many games under each rule combination, so one
    /// [`Self::analyze`] of up to `capacity` games resolves every game at most
    /// once per rule set.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        let game_config = CacheConfig {
            capacity: config.capacity.saturating_mul(WinRuleConfig::ALL.len()),
            ..config
        };
        Self {
            winning_turns: Mutex::new(MemoCache::new(game_config)),
            turn_distributions: Mutex::new(MemoCache::new(config)),
            next_winner_distributions: Mutex::new(MemoCache::new(config)),
            heat_maps: Mutex::new(MemoCache::new(config)),
        }
    }

    #[must_use]
    pub fn stats(&self) -> AnalyzerStats {
        AnalyzerStats {
            winning_turns: lock(&self.winning_turns).stats(),
            turn_distributions: lock(&self.turn_distributions).stats(),
            next_winner_distributions: lock(&self.next_winner_distributions).stats(),
            heat_maps: lock(&self.heat_maps).stats(),
        }
    }

    /// Drops every cached result.
    pub fn clear(&self) {
        lock(&self.winning_turns).clear();
        lock(&self.turn_distributions).clear();
        lock(&self.next_winner_distributions).clear();
        lock(&self.heat_maps).clear();
    }

    #[must_use]
    pub fn winning_turns(&self, game: &BingoGame, config: WinRuleConfig) -> Arc<WinningTurns> {
        memoized(&self.winning_turns, (game.id(), config), || {
            WinningTurns::resolve(game, config)
        })
    }

    #[must_use]
    pub fn winning_turn_distribution(
        &self,
        simulation: &BingoSimulation,
        config: WinRuleConfig,
    ) -> Arc<Distribution> {
        memoized(&self.turn_distributions, (simulation.id(), config), || {
            debug!(simulation = %simulation.id(), ?config, "computing winning turn distribution");
            simulation
                .games()
                .iter()
                .map(|game| i64::from(self.winning_turns(game, config).first()))
                .collect()
        })
    }

    #[must_use]
    pub fn turns_until_next_winner_distribution(
        &self,
        simulation: &BingoSimulation,
        config: WinRuleConfig,
    ) -> Arc<Distribution> {
        memoized(&self.next_winner_distributions, (simulation.id(), config), || {
            debug!(simulation = %simulation.id(), ?config, "computing turns until next winner");
            simulation
                .games()
                .iter()
                .filter_map(|game| self.winning_turns(game, config).turns_until_next_winner())
                .map(i64::from)
                .collect()
        })
    }

    #[must_use]
    pub fn heat_map(
        &self,
        simulation: &BingoSimulation,
        config: WinRuleConfig,
    ) -> Arc<HeatMapData> {
        memoized(&self.heat_maps, (simulation.id(), config), || {
            debug!(simulation = %simulation.id(), ?config, "computing heat map");
            let mut acc = HeatMapAccumulator::new();
            for game in simulation.games() {
                acc.add_game(game, &self.winning_turns(game, config), config);
            }
            acc.finish()
        })
    }

    /// Memoized counterpart of [`analyze_simulation`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(simulation = %simulation.id(), config = ?config)
    )]
    #[must_use]
    pub fn analyze(
        &self,
        simulation: &BingoSimulation,
        config: WinRuleConfig,
    ) -> SimulationAnalysis {
        let [free_space, free_space_and_corners] = rule_variants(config);
        let analysis = SimulationAnalysis {
            winning_turn_distribution: Arc::unwrap_or_clone(
                self.winning_turn_distribution(simulation, config),
            ),
            with_free_space: Arc::unwrap_or_clone(
                self.winning_turn_distribution(simulation, free_space),
            ),
            with_free_space_and_corners: Arc::unwrap_or_clone(
                self.winning_turn_distribution(simulation, free_space_and_corners),
            ),
            turns_until_next_winner: Arc::unwrap_or_clone(
                self.turns_until_next_winner_distribution(simulation, config),
            ),
            heat_map_data: Arc::unwrap_or_clone(self.heat_map(simulation, config)),
        };
        debug!(stats = ?self.stats(), "analysis done");
        analysis
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    // cached values are immutable once inserted, so a poisoned lock is still usable
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn memoized<K, V, F>(cache: &Mutex<MemoCache<K, Arc<V>>>, key: K, f: F) -> Arc<V>
where
    K: Eq + Hash + Clone,
    F: FnOnce() -> V,
{
    if let Some(value) = lock(cache).get(&key) {
        return value;
    }
    let value = Arc::new(f());
    lock(cache).insert(key, Arc::clone(&value));
    value
}
