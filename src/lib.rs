//! A blackjack round engine and Monte-Carlo bankroll simulator.
//!
//! The crate deals rounds from a multi-deck [`Shoe`] under configurable
//! [`Rules`], plays every player decision from fixed basic-strategy tables
//! ([`decide`]), and aggregates many rounds into bankroll [`Stats`] and a
//! profit [`Histogram`].
//!
//! # Example
//!
//! ```
//! use bjsim::{Rules, SimConfig, simulate};
//!
//! let config = SimConfig::new(Rules::default(), 10.0, 200)
//!     .with_seed(42)
//!     .with_trials(50);
//! let sim = simulate(&config, 500.0).unwrap();
//! assert_eq!(sim.results.len(), 50);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod result;
pub mod rng;
pub mod rules;
pub mod shoe;
pub mod simulate;
pub mod stats;
pub mod strategy;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank};
pub use error::{RoundError, RulesError, ShoeError, SimulationError};
pub use game::{RoundPhase, Table, play_round};
pub use hand::Hand;
pub use result::{DealTarget, HandOutcome, HandResult, RoundEvent, RoundResult};
pub use rng::{SimRng, create_rng};
pub use rules::{BlackjackPayout, Rules};
pub use shoe::{CardSource, Shoe, ShuffleCallback, ShuffleSink, StackedCards};
pub use simulate::{SimConfig, Simulation, TrialResult, simulate};
pub use stats::{Histogram, RunningStats, Stats, confidence_interval, risk_of_ruin};
pub use strategy::{Action, Constraints, decide};
