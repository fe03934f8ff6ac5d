//! Round result and trace types.

use crate::card::Card;
use crate::hand::Hand;
use crate::strategy::Action;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has the higher total).
    Win,
    /// Player loses (player busts, dealer blackjack, or lower total).
    Loss,
    /// Push (tie).
    Push,
    /// Player has a natural blackjack.
    Blackjack,
    /// Player surrendered.
    Surrender,
}

/// Result for a single player hand.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandResult {
    /// The hand as it stood at settlement.
    pub hand: Hand,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Signed payout: profit if positive, loss if negative.
    pub payout: f64,
}

impl HandResult {
    /// Returns whether the hand was produced by a split.
    #[must_use]
    pub const fn is_split(&self) -> bool {
        self.hand.is_from_split()
    }
}

/// Who a card was dealt to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DealTarget {
    /// A player hand.
    Player,
    /// The dealer.
    Dealer,
}

/// One step of a round, recorded in chronological order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundEvent {
    /// The shoe was reshuffled.
    Shuffle,
    /// A card was dealt.
    Deal {
        /// Recipient of the card.
        target: DealTarget,
        /// The card.
        card: Card,
        /// Player hand index (always 0 for the dealer).
        hand_index: usize,
        /// Whether the card was dealt face up.
        revealed: bool,
    },
    /// The player acted on a hand.
    Action {
        /// Player hand index.
        hand_index: usize,
        /// The action taken.
        action: Action,
    },
    /// The dealer turned over the hole card.
    DealerReveal {
        /// The hole card.
        card: Card,
    },
    /// A player hand was settled.
    Result {
        /// Player hand index.
        hand_index: usize,
        /// Outcome of the hand.
        outcome: HandOutcome,
        /// Signed payout.
        payout: f64,
    },
}

/// Result of the entire round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundResult {
    /// Results for each player hand, left to right.
    pub hands: Vec<HandResult>,
    /// The dealer's final hand.
    pub dealer_hand: Hand,
    /// Net payout across all player hands.
    pub net: f64,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Every deal, action, reveal, shuffle, and settlement, in order.
    pub events: Vec<RoundEvent>,
}
