use crate::card::Card;
use crate::error::ShoeError;
use crate::hand::Hand;
use crate::result::RoundEvent;
use crate::shoe::CardSource;
use crate::strategy::{Action, Constraints, decide};

use super::Round;

impl<S: CardSource + ?Sized> Round<'_, S> {
    /// Plays every player hand left to right.
    ///
    /// Hands wait in `pending`; a split pushes the right-hand half back to the
    /// front of the queue and keeps playing the left-hand half.
    pub(super) fn play_hands(&mut self, upcard: Card) -> Result<(), ShoeError> {
        // A player natural has nothing to play. A peeked dealer blackjack does
        // not stop the player, so surrenders and doubles still settle as such.
        let skip = self.player_blackjack;

        while let Some(mut hand) = self.pending.pop_front() {
            let index = self.finished.len();
            if skip {
                hand.complete();
            }

            while !hand.is_completed() {
                if hand.is_bust() {
                    hand.complete();
                    break;
                }

                let action = self.choose_action(&hand, upcard);
                self.events.push(RoundEvent::Action {
                    hand_index: index,
                    action,
                });

                match action {
                    Action::Stand => hand.complete(),
                    Action::Surrender => hand.surrender(),
                    Action::Hit => {
                        self.deal_player(&mut hand, index)?;
                        if hand.is_bust() {
                            hand.complete();
                        }
                    }
                    Action::Double => {
                        self.total_wagered += hand.bet();
                        hand.double_bet();
                        self.deal_player(&mut hand, index)?;
                        hand.complete();
                    }
                    Action::Split => hand = self.split(hand, index)?,
                }
            }

            self.finished.push(hand);
        }
        Ok(())
    }

    /// Asks the strategy tables for an action, re-asking with an option
    /// removed when the table picks something the round cannot afford.
    fn choose_action(&self, hand: &Hand, upcard: Card) -> Action {
        let two_cards = hand.len() == 2;
        let by_rules = Constraints {
            allow_split: two_cards && hand.is_split_eligible(self.rules),
            allow_double: two_cards
                && (!hand.is_from_split() || self.rules.double_after_split)
                && !hand.is_split_aces(),
        };

        let headroom = self.total_wagered + hand.bet() <= self.bankroll;
        let allow_split =
            by_rules.allow_split && headroom && hand.can_split(self.rules, self.hand_count());
        let allow_double = by_rules.allow_double && headroom;

        let mut action = decide(hand, upcard, self.rules, by_rules);
        if action == Action::Split && !allow_split {
            action = decide(
                hand,
                upcard,
                self.rules,
                Constraints {
                    allow_split: false,
                    allow_double: by_rules.allow_double,
                },
            );
        }
        if action == Action::Double && !allow_double {
            action = decide(
                hand,
                upcard,
                self.rules,
                Constraints {
                    allow_split,
                    allow_double: false,
                },
            );
        }
        action
    }

    /// Splits a pair into two one-card hands and deals each a second card.
    ///
    /// Returns the left-hand half, which is played next.
    fn split(&mut self, mut hand: Hand, index: usize) -> Result<Hand, ShoeError> {
        // Only two-card pairs are ever offered a split.
        let &[first, second] = hand.cards() else {
            hand.complete();
            return Ok(hand);
        };

        let bet = hand.bet();
        self.total_wagered += bet;

        let mut left = Hand::from_split(first, bet);
        let mut right = Hand::from_split(second, bet);

        self.deal_player(&mut left, index)?;
        if left.is_split_aces() {
            left.complete();
        }
        self.deal_player(&mut right, index + 1)?;
        if right.is_split_aces() {
            right.complete();
        }

        self.pending.push_front(right);
        Ok(left)
    }
}
