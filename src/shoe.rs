//! The card shoe: shuffling, cut card, and reshuffle.

use core::fmt;
use std::collections::VecDeque;

use rand::Rng;

use crate::card::{Card, DECK_SIZE, Rank};
use crate::error::{RulesError, ShoeError};
use crate::rules::Rules;

/// Receives a notification every time a shoe reshuffles.
pub trait ShuffleSink {
    /// Called once per shuffle, before the next card is dealt.
    fn shuffled(&mut self);
}

impl<F: FnMut()> ShuffleSink for F {
    fn shuffled(&mut self) {
        self();
    }
}

/// Anything the round engine can draw cards from.
pub trait CardSource {
    /// Draws the next card, reporting any reshuffle to `sink` first.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Exhausted`] if no card can be produced.
    fn draw_card(&mut self, sink: &mut dyn ShuffleSink) -> Result<Card, ShoeError>;
}

/// Callback fired on every shuffle.
pub type ShuffleCallback = Box<dyn FnMut() + Send>;

/// A multi-deck shoe with a cut card.
///
/// The shoe shuffles on construction and again whenever the cursor reaches
/// the cut card or the end of the cards.
pub struct Shoe<R> {
    cards: Vec<Card>,
    cursor: usize,
    cutoff: usize,
    decks: u8,
    penetration: f64,
    shuffles: u64,
    rng: R,
    on_shuffle: Option<ShuffleCallback>,
}

impl<R: Rng> Shoe<R> {
    /// Creates a shuffled shoe for the given rules.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules are invalid.
    ///
    /// # Example
    ///
    /// ```
    /// use bjsim::{Rules, Shoe, create_rng};
    ///
    /// let mut rng = create_rng(Some(1));
    /// let mut shoe = Shoe::new(&Rules::default().with_decks(1), &mut rng).unwrap();
    /// assert_eq!(shoe.remaining(), 52);
    /// shoe.draw().unwrap();
    /// assert_eq!(shoe.remaining(), 51);
    /// ```
    pub fn new(rules: &Rules, rng: R) -> Result<Self, RulesError> {
        rules.validate()?;

        let mut shoe = Self {
            cards: Vec::with_capacity(rules.decks as usize * DECK_SIZE),
            cursor: 0,
            cutoff: 0,
            decks: rules.decks,
            penetration: rules.penetration,
            shuffles: 0,
            rng,
            on_shuffle: None,
        };
        shoe.shuffle(&mut || {});
        Ok(shoe)
    }

    /// Creates a shoe with a shuffle callback.
    ///
    /// The callback also fires for the initial shuffle.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules are invalid.
    pub fn with_shuffle_callback(
        rules: &Rules,
        rng: R,
        callback: ShuffleCallback,
    ) -> Result<Self, RulesError> {
        let mut shoe = Self::new(rules, rng)?;
        shoe.on_shuffle = Some(callback);
        if let Some(cb) = shoe.on_shuffle.as_mut() {
            cb();
        }
        Ok(shoe)
    }

    /// Replaces the shuffle callback. `None` removes it.
    pub fn set_shuffle_callback(&mut self, callback: Option<ShuffleCallback>) {
        self.on_shuffle = callback;
    }

    /// Rebuilds and shuffles every card with a Fisher-Yates pass.
    fn shuffle(&mut self, sink: &mut dyn ShuffleSink) {
        self.cards.clear();
        for _ in 0..self.decks {
            for rank in Rank::ALL {
                for _ in 0..4 {
                    self.cards.push(Card::new(rank));
                }
            }
        }

        for i in (1..self.cards.len()).rev() {
            let u: f64 = self.rng.random();
            #[expect(
                clippy::cast_precision_loss,
                reason = "shoe sizes are far below f64 integer precision"
            )]
            let j = ((u * (i + 1) as f64).floor() as usize).min(i);
            self.cards.swap(i, j);
        }

        self.cursor = 0;
        #[expect(
            clippy::cast_precision_loss,
            reason = "shoe sizes are far below f64 integer precision"
        )]
        let cut = (self.cards.len() as f64 * self.penetration).floor() as usize;
        self.cutoff = cut.clamp(1, self.cards.len());
        self.shuffles += 1;

        tracing::debug!(
            cards = self.cards.len(),
            cutoff = self.cutoff,
            shuffle = self.shuffles,
            "shoe shuffled"
        );

        if let Some(cb) = self.on_shuffle.as_mut() {
            cb();
        }
        sink.shuffled();
    }

    /// Draws a card, reshuffling first if the cut card has been reached.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Exhausted`] only if the shoe holds no cards after
    /// shuffling, which valid rules rule out.
    pub fn draw(&mut self) -> Result<Card, ShoeError> {
        self.draw_card(&mut || {})
    }

    /// Returns the number of undealt cards.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// Returns the number of cards dealt since the last shuffle.
    #[must_use]
    pub const fn dealt(&self) -> usize {
        self.cursor
    }

    /// Returns the cursor position at which the shoe reshuffles.
    #[must_use]
    pub const fn cutoff(&self) -> usize {
        self.cutoff
    }

    /// Returns the number of cards in a full shoe.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.cards.len()
    }

    /// Returns how many times the shoe has shuffled, including construction.
    #[must_use]
    pub const fn shuffle_count(&self) -> u64 {
        self.shuffles
    }

}

impl<R: Rng> CardSource for Shoe<R> {
    fn draw_card(&mut self, sink: &mut dyn ShuffleSink) -> Result<Card, ShoeError> {
        if self.cursor >= self.cards.len() || self.cursor >= self.cutoff {
            self.shuffle(sink);
        }
        let card = self
            .cards
            .get(self.cursor)
            .copied()
            .ok_or(ShoeError::Exhausted)?;
        self.cursor += 1;
        Ok(card)
    }
}

impl<R> fmt::Debug for Shoe<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shoe")
            .field("decks", &self.decks)
            .field("remaining", &(self.cards.len() - self.cursor))
            .field("cursor", &self.cursor)
            .field("cutoff", &self.cutoff)
            .field("shuffles", &self.shuffles)
            .finish_non_exhaustive()
    }
}

/// A scripted card sequence dealt strictly in order.
///
/// Useful for replaying a recorded round or setting up exact scenarios.
/// It never shuffles and reports [`ShoeError::Exhausted`] once empty.
///
/// ```
/// use bjsim::{Card, CardSource, Rank, StackedCards};
///
/// let mut cards = StackedCards::new([Rank::Ace, Rank::King]);
/// assert_eq!(cards.draw_card(&mut || {}), Ok(Card::new(Rank::Ace)));
/// assert_eq!(cards.remaining(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StackedCards {
    cards: VecDeque<Card>,
}

impl StackedCards {
    /// Creates a stack that deals `cards` front to back.
    pub fn new<I, C>(cards: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Card>,
    {
        Self {
            cards: cards.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the number of cards left.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

impl CardSource for StackedCards {
    fn draw_card(&mut self, _sink: &mut dyn ShuffleSink) -> Result<Card, ShoeError> {
        self.cards.pop_front().ok_or(ShoeError::Exhausted)
    }
}
