//! Game generation and win resolution.
//!
//! This module builds on the card primitives in [`crate::core`]:
//!
//! - [`WinRuleConfig`] - Optional rules (four corners, free space) applied to every win check
//! - [`BingoGame`] - One game: a card per player plus a shuffled draw order
//! - [`BingoSimulation`] - A batch of games sharing one player count
//! - [`SimulationSeed`] - Seed for reproducible simulations
//! - [`WinningTurns`] - The turn each player of a game first wins
//!
//! # Example
//!
//! ```
//! use bingosim_engine::{BingoSimulation, SimulationSeed, WinRuleConfig, WinningTurns};
//!
//! let seed = SimulationSeed::from_bytes([42; 16]);
//! let simulation = BingoSimulation::with_seed(100, 4, seed).unwrap();
//!
//! for game in simulation.games() {
//!     let turns = WinningTurns::resolve(game, WinRuleConfig::STANDARD);
//!     assert!((4..=75).contains(&turns.first()));
//!     assert!(turns.first_winner().is_some());
//! }
//! ```

pub use self::{game::*, rules::*, simulation::*, turns::*};

mod game;
mod rules;
mod simulation;
mod turns;
