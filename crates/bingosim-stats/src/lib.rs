//! Statistical helpers for bingo simulation results.
//!
//! # Modules
//!
//! - [`distribution`]: Frequency tables over integer-valued samples, with
//!   min / max / mean and a dense percentage series for charting
//!
//! # Examples
//!
//! ```
//! use bingosim_stats::distribution::Distribution;
//!
//! let turns = Distribution::new([40, 42, 42, 45]);
//! assert_eq!(turns.count(42), 2);
//! assert_eq!(turns.min(), Some(40));
//! assert_eq!(turns.max(), Some(45));
//! assert_eq!(turns.mean(), Some(42.25));
//! ```

pub mod distribution;
