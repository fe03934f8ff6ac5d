//! Error types for rules, shoes, rounds, and simulations.

use thiserror::Error;

/// Errors raised when a rule set is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RulesError {
    /// The shoe must hold at least one deck.
    #[error("deck count must be at least one")]
    ZeroDecks,
    /// Penetration must lie in (0, 1].
    #[error("penetration must be in (0, 1]")]
    InvalidPenetration,
    /// At least one hand must be allowed.
    #[error("maximum hand count must be at least one")]
    InvalidMaxHands,
}

/// Errors that can occur when drawing a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No card could be produced.
    #[error("no cards left in the shoe")]
    Exhausted,
}

/// Errors that can occur while playing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Bet amount is zero, negative, or not finite.
    #[error("bet must be a positive, finite amount")]
    InvalidBet,
    /// Bankroll cannot cover the bet.
    #[error("insufficient funds for this bet")]
    InsufficientFunds,
    /// The rules are invalid.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// The card source failed.
    #[error(transparent)]
    Shoe(#[from] ShoeError),
}

/// Errors that can occur while running a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SimulationError {
    /// Bet amount is zero, negative, or not finite.
    #[error("bet must be a positive, finite amount")]
    InvalidBet,
    /// Starting bankroll is negative or not finite.
    #[error("starting bankroll must be a non-negative, finite amount")]
    InvalidBankroll,
    /// A histogram needs at least one bin.
    #[error("histogram needs at least one bin")]
    ZeroHistogramBins,
    /// The rules are invalid.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// A round failed.
    #[error(transparent)]
    Round(#[from] RoundError),
}
