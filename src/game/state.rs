//! Round phase types.

/// Phase of a round, in the order a round passes through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundPhase {
    /// Dealing the two initial cards to player and dealer.
    Dealing,
    /// Dealer checks the hole card for blackjack.
    Peeking,
    /// Player hands are being played, left to right.
    PlayerActing,
    /// Dealer turns over the hole card.
    DealerRevealing,
    /// Dealer draws to a standing total.
    DealerActing,
    /// Player hands are paid or collected.
    Settling,
    /// The round is over.
    Done,
}
