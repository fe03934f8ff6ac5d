//! Hand representation and evaluation.

use crate::card::Card;
use crate::rules::Rules;

/// Sums a set of cards, demoting aces from 11 to 1 while the total busts.
///
/// Returns the total and whether an ace is still counted as 11.
fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        value = value.saturating_add(card.value());
    }

    while value > 21 && aces > 0 {
        value -= 10;
        aces -= 1;
    }

    let is_soft = aces > 0 && value <= 21;
    (value, is_soft)
}

/// One hand of cards with its wager.
///
/// The dealer's hand uses the same type with a zero wager.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Wager riding on this hand.
    bet: f64,
    /// Whether this hand came from a split.
    from_split: bool,
    /// Whether this hand came from splitting aces.
    split_aces: bool,
    /// Whether the wager was doubled.
    doubled: bool,
    /// Whether the hand was surrendered.
    surrendered: bool,
    /// Whether no further action will be taken on this hand.
    completed: bool,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: f64) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            from_split: false,
            split_aces: false,
            doubled: false,
            surrendered: false,
            completed: false,
        }
    }

    /// Creates a one-card hand produced by a split.
    #[must_use]
    pub fn from_split(card: Card, bet: f64) -> Self {
        Self {
            cards: vec![card],
            bet,
            from_split: true,
            split_aces: card.is_ace(),
            doubled: false,
            surrendered: false,
            completed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the wager on this hand.
    #[must_use]
    pub const fn bet(&self) -> f64 {
        self.bet
    }

    /// Doubles the wager and marks the hand doubled.
    pub fn double_bet(&mut self) {
        self.bet *= 2.0;
        self.doubled = true;
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns whether this hand is from a split of aces.
    #[must_use]
    pub const fn is_split_aces(&self) -> bool {
        self.split_aces
    }

    /// Returns whether the wager was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether the hand was surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Marks the hand surrendered and complete.
    pub const fn surrender(&mut self) {
        self.surrendered = true;
        self.completed = true;
    }

    /// Returns whether play on this hand is over.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }

    /// Marks the hand complete.
    pub const fn complete(&mut self) {
        self.completed = true;
    }

    /// Best total: the highest total not over 21, or the lowest bust total.
    ///
    /// Aces count 11 unless that would bust the hand.
    #[must_use]
    pub fn best_total(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether an ace is counted as 11 in [`Hand::best_total`].
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is two cards totalling 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.best_total() == 21
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.best_total() > 21
    }

    /// Returns whether the hand is two cards of equal value.
    #[must_use]
    pub fn is_pair(&self) -> bool {
        matches!(self.cards.as_slice(), [a, b] if a.value() == b.value())
    }

    /// Returns whether the hand may be split under `rules` when the round
    /// already holds `hand_count` hands.
    #[must_use]
    pub fn can_split(&self, rules: &Rules, hand_count: usize) -> bool {
        hand_count < rules.max_hands as usize && self.is_split_eligible(rules)
    }

    /// Returns whether the cards and `rules` permit a split, ignoring how
    /// many hands the round already holds.
    #[must_use]
    pub fn is_split_eligible(&self, rules: &Rules) -> bool {
        let [a, b] = self.cards.as_slice() else {
            return false;
        };
        if a.is_ace() && self.split_aces && !rules.resplit_aces {
            return false;
        }
        a.rank == b.rank || a.value() == b.value()
    }
}
