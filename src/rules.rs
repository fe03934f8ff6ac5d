//! Table rule configuration.

use crate::error::RulesError;

/// Payout ratio for a natural blackjack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlackjackPayout {
    /// Pays 3:2.
    #[default]
    ThreeToTwo,
    /// Pays 6:5.
    SixToFive,
}

impl BlackjackPayout {
    /// Winnings per unit wagered.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::ThreeToTwo => 1.5,
            Self::SixToFive => 1.2,
        }
    }
}

/// Casino rules for a blackjack session.
///
/// Use the builder pattern to customize rules:
///
/// ```
/// use bjsim::{BlackjackPayout, Rules};
///
/// let rules = Rules::default()
///     .with_decks(8)
///     .with_blackjack_payout(BlackjackPayout::SixToFive)
///     .with_stand_on_soft_17(false);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rules {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the dealer stands on soft 17.
    pub stand_on_soft_17: bool,
    /// Blackjack payout ratio.
    pub blackjack_payout: BlackjackPayout,
    /// Whether doubling is allowed after a split.
    pub double_after_split: bool,
    /// Whether late surrender is allowed.
    pub surrender: bool,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Whether the dealer peeks for blackjack under a ten or ace.
    pub peek: bool,
    /// Fraction of the shoe dealt before the cut card forces a reshuffle.
    pub penetration: f64,
    /// Maximum number of player hands a round may reach through splits.
    pub max_hands: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            decks: 6,
            stand_on_soft_17: true,
            blackjack_payout: BlackjackPayout::ThreeToTwo,
            double_after_split: true,
            surrender: false,
            resplit_aces: false,
            peek: true,
            penetration: 0.75,
            max_hands: 4,
        }
    }
}

impl Rules {
    /// Checks that every field is in range.
    ///
    /// # Errors
    ///
    /// Returns an error if there are zero decks, the penetration is outside
    /// `(0, 1]`, or `max_hands` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::{Rules, RulesError};
    ///
    /// let rules = Rules::default().with_penetration(1.5);
    /// assert_eq!(rules.validate(), Err(RulesError::InvalidPenetration));
    /// ```
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.decks == 0 {
            return Err(RulesError::ZeroDecks);
        }
        if !(self.penetration > 0.0 && self.penetration <= 1.0) {
            return Err(RulesError::InvalidPenetration);
        }
        if self.max_hands == 0 {
            return Err(RulesError::InvalidMaxHands);
        }
        Ok(())
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::Rules;
    ///
    /// let rules = Rules::default().with_decks(2);
    /// assert_eq!(rules.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the dealer stands on soft 17.
    #[must_use]
    pub const fn with_stand_on_soft_17(mut self, stand: bool) -> Self {
        self.stand_on_soft_17 = stand;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_payout(mut self, payout: BlackjackPayout) -> Self {
        self.blackjack_payout = payout;
        self
    }

    /// Sets whether doubling is allowed after a split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets whether late surrender is allowed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::Rules;
    ///
    /// let rules = Rules::default().with_surrender(true);
    /// assert!(rules.surrender);
    /// ```
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether split aces may be split again.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets whether the dealer peeks for blackjack.
    #[must_use]
    pub const fn with_peek(mut self, peek: bool) -> Self {
        self.peek = peek;
        self
    }

    /// Sets the shoe penetration.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the maximum number of hands reachable by splitting.
    #[must_use]
    pub const fn with_max_hands(mut self, max_hands: u8) -> Self {
        self.max_hands = max_hands;
        self
    }
}
