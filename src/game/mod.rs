//! Round engine and the interactive table.

use std::collections::VecDeque;

use rand::Rng;

use crate::card::Card;
use crate::error::{RoundError, RulesError, ShoeError};
use crate::hand::Hand;
use crate::result::{RoundEvent, RoundResult};
use crate::rules::Rules;
use crate::shoe::{CardSource, Shoe};

mod actions;
mod deal;
mod dealer;
pub mod state;

pub use state::RoundPhase;

/// A bet must be positive and finite.
pub(crate) fn valid_bet(bet: f64) -> bool {
    bet.is_finite() && bet > 0.0
}

/// Plays one full round against `shoe` with a flat `bet`.
///
/// The player follows basic strategy. `bankroll` is the player's total funds
/// and caps how much extra may be wagered on doubles and splits. Shuffles
/// that happen mid-round show up as [`RoundEvent::Shuffle`] in the trace.
///
/// # Errors
///
/// Returns an error if the bet is not positive, the rules are invalid, or
/// the card source runs dry.
///
/// # Example
///
/// ```
/// use bjsim::{HandOutcome, Rank, Rules, StackedCards, play_round};
///
/// // player A, dealer 9, player K, dealer 5
/// let mut cards = StackedCards::new([Rank::Ace, Rank::Nine, Rank::King, Rank::Five]);
/// let round = play_round(&mut cards, &Rules::default(), 10.0, 1000.0).unwrap();
/// assert_eq!(round.hands[0].outcome, HandOutcome::Blackjack);
/// assert_eq!(round.net, 15.0);
/// ```
pub fn play_round<S>(
    shoe: &mut S,
    rules: &Rules,
    bet: f64,
    bankroll: f64,
) -> Result<RoundResult, RoundError>
where
    S: CardSource + ?Sized,
{
    if !valid_bet(bet) {
        return Err(RoundError::InvalidBet);
    }
    rules.validate()?;

    Round::new(shoe, rules, bet, bankroll).run()
}

/// State of one round in progress.
struct Round<'a, S: ?Sized> {
    shoe: &'a mut S,
    rules: &'a Rules,
    bet: f64,
    bankroll: f64,
    phase: RoundPhase,
    events: Vec<RoundEvent>,
    dealer: Hand,
    /// Hands still to be played, front first.
    pending: VecDeque<Hand>,
    /// Hands whose play is over, left to right.
    finished: Vec<Hand>,
    total_wagered: f64,
    player_blackjack: bool,
    dealer_blackjack: bool,
    hole_revealed: bool,
}

impl<'a, S: CardSource + ?Sized> Round<'a, S> {
    fn new(shoe: &'a mut S, rules: &'a Rules, bet: f64, bankroll: f64) -> Self {
        Self {
            shoe,
            rules,
            bet,
            bankroll,
            phase: RoundPhase::Dealing,
            events: Vec::new(),
            dealer: Hand::new(0.0),
            pending: VecDeque::new(),
            finished: Vec::new(),
            total_wagered: bet,
            player_blackjack: false,
            dealer_blackjack: false,
            hole_revealed: false,
        }
    }

    fn enter(&mut self, phase: RoundPhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "round phase");
        self.phase = phase;
    }

    fn run(mut self) -> Result<RoundResult, RoundError> {
        let upcard = self.deal_initial()?;

        self.enter(RoundPhase::Peeking);
        self.peek(upcard);

        self.enter(RoundPhase::PlayerActing);
        self.play_hands(upcard)?;

        self.enter(RoundPhase::DealerRevealing);
        self.reveal_hole();

        self.enter(RoundPhase::DealerActing);
        self.dealer_play()?;

        self.enter(RoundPhase::Settling);
        let hands = self.settle();
        let net = hands.iter().map(|h| h.payout).sum::<f64>();

        self.enter(RoundPhase::Done);
        tracing::trace!(
            hands = hands.len(),
            net,
            dealer_total = self.dealer.best_total(),
            "round settled"
        );

        Ok(RoundResult {
            hands,
            dealer_hand: self.dealer,
            net,
            dealer_blackjack: self.dealer_blackjack,
            events: self.events,
        })
    }

    /// Draws the next card, recording any reshuffle in the trace.
    fn draw(&mut self) -> Result<Card, ShoeError> {
        let events = &mut self.events;
        self.shoe
            .draw_card(&mut || events.push(RoundEvent::Shuffle))
    }

    /// Number of player hands in the round, including the one in play.
    fn hand_count(&self) -> usize {
        self.finished.len() + self.pending.len() + 1
    }
}

/// A single-player table for interactive play.
///
/// The table owns its shoe and tracks the player's bankroll across rounds.
///
/// ```
/// use bjsim::{Rules, Table, create_rng};
///
/// let mut table = Table::new(Rules::default(), create_rng(Some(3)), 100.0).unwrap();
/// let round = table.play(10.0).unwrap();
/// assert_eq!(table.bankroll(), 100.0 + round.net);
/// assert_eq!(table.rounds_played(), 1);
/// ```
#[derive(Debug)]
pub struct Table<R> {
    shoe: Shoe<R>,
    rules: Rules,
    bankroll: f64,
    rounds_played: u64,
}

impl<R: Rng> Table<R> {
    /// Opens a table with a freshly shuffled shoe.
    ///
    /// # Errors
    ///
    /// Returns an error if the rules are invalid.
    pub fn new(rules: Rules, rng: R, bankroll: f64) -> Result<Self, RulesError> {
        let shoe = Shoe::new(&rules, rng)?;
        Ok(Self {
            shoe,
            rules,
            bankroll,
            rounds_played: 0,
        })
    }

    /// Plays one round and applies its net result to the bankroll.
    ///
    /// # Errors
    ///
    /// Returns an error if the bet is not positive or exceeds the bankroll.
    pub fn play(&mut self, bet: f64) -> Result<RoundResult, RoundError> {
        if !valid_bet(bet) {
            return Err(RoundError::InvalidBet);
        }
        if bet > self.bankroll {
            return Err(RoundError::InsufficientFunds);
        }

        let result = play_round(&mut self.shoe, &self.rules, bet, self.bankroll)?;
        self.bankroll += result.net;
        self.rounds_played += 1;
        Ok(result)
    }

    /// Returns the current bankroll.
    #[must_use]
    pub const fn bankroll(&self) -> f64 {
        self.bankroll
    }

    /// Returns the number of rounds played since the table opened or reset.
    #[must_use]
    pub const fn rounds_played(&self) -> u64 {
        self.rounds_played
    }

    /// Returns the table rules.
    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe<R> {
        &self.shoe
    }

    /// Sets a new bankroll and clears the round counter. The shoe is kept.
    pub const fn reset(&mut self, bankroll: f64) {
        self.bankroll = bankroll;
        self.rounds_played = 0;
    }
}
