//! Bingo cards, draw orders and win detection.
//!
//! The [`core`] module holds the card model and win patterns, and the
//! [`engine`] module plays draw orders against cards to find out who wins
//! and when. Aggregate statistics over many games live in `bingosim-analysis`.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;
