//! Aggregate statistics over bingo simulations.
//!
//! Turns a [`BingoSimulation`](bingosim_engine::BingoSimulation) into the
//! distributions and heat map that describe it:
//!
//! - [`analyzer`]: winning-turn and next-winner distributions, the combined
//!   [`SimulationAnalysis`](analyzer::SimulationAnalysis) report, and the
//!   memoizing [`Analyzer`](analyzer::Analyzer)
//! - [`heat_map`]: how often each card cell takes part in the first win of a game
//! - [`cache`]: the bounded result cache the analyzer is built on
//!
//! # Example
//!
//! ```
//! use bingosim_analysis::analyzer::Analyzer;
//! use bingosim_engine::{BingoSimulation, SimulationSeed, WinRuleConfig};
//!
//! let seed = SimulationSeed::from_bytes([3; 16]);
//! let simulation = BingoSimulation::with_seed(200, 4, seed).unwrap();
//! let analysis = Analyzer::default().analyze(&simulation, WinRuleConfig::STANDARD);
//!
//! let summary = analysis.winning_turn_distribution.summary().unwrap();
//! assert_eq!(summary.total, 200);
//! assert!(summary.min >= 5);
//! assert_eq!(analysis.heat_map_data.tiles.len(), 25);
//! ```

pub mod analyzer;
pub mod cache;
pub mod heat_map;
