use crate::error::ShoeError;
use crate::hand::Hand;
use crate::result::{HandOutcome, HandResult, RoundEvent};
use crate::rules::Rules;
use crate::shoe::CardSource;

use super::Round;

/// Dealer draws below 17, and on soft 17 when the dealer hits soft 17.
fn dealer_should_hit(hand: &Hand, rules: &Rules) -> bool {
    let total = hand.best_total();
    total < 17 || (total == 17 && !rules.stand_on_soft_17 && hand.is_soft())
}

impl<S: CardSource + ?Sized> Round<'_, S> {
    /// Reveals the hole card if the peek did not, then checks for blackjack.
    pub(super) fn reveal_hole(&mut self) {
        if self.dealer_blackjack {
            return;
        }
        self.reveal_hole_card();
        if self.dealer.is_blackjack() {
            self.dealer_blackjack = true;
        }
    }

    /// Checks if any player hand can still collect against the dealer.
    fn any_live_hands(&self) -> bool {
        self.finished
            .iter()
            .any(|hand| !hand.is_surrendered() && !hand.is_bust())
    }

    /// Dealer plays the hand according to the soft-17 rule.
    ///
    /// The dealer only draws when a live player hand remains and neither side
    /// holds a blackjack.
    pub(super) fn dealer_play(&mut self) -> Result<(), ShoeError> {
        if self.player_blackjack || self.dealer_blackjack || !self.any_live_hands() {
            return Ok(());
        }

        while dealer_should_hit(&self.dealer, self.rules) {
            self.deal_dealer(true)?;
        }
        Ok(())
    }

    /// Pays or collects every player hand, left to right.
    pub(super) fn settle(&mut self) -> Vec<HandResult> {
        let dealer_total = self.dealer.best_total();
        let dealer_bust = self.dealer.is_bust();
        let multiplier = self.rules.blackjack_payout.multiplier();

        let hands = core::mem::take(&mut self.finished);
        let mut results = Vec::with_capacity(hands.len());

        for (hand_index, hand) in hands.into_iter().enumerate() {
            let bet = hand.bet();
            let natural = self.player_blackjack && hand_index == 0 && !hand.is_from_split();

            let (outcome, payout) = if hand.is_surrendered() {
                (HandOutcome::Surrender, -bet / 2.0)
            } else if natural {
                if self.dealer_blackjack {
                    (HandOutcome::Push, 0.0)
                } else {
                    (HandOutcome::Blackjack, bet * multiplier)
                }
            } else if hand.is_bust() || self.dealer_blackjack {
                (HandOutcome::Loss, -bet)
            } else if dealer_bust {
                (HandOutcome::Win, bet)
            } else {
                let player_total = hand.best_total();
                if player_total > dealer_total {
                    (HandOutcome::Win, bet)
                } else if player_total < dealer_total {
                    (HandOutcome::Loss, -bet)
                } else {
                    (HandOutcome::Push, 0.0)
                }
            };

            self.events.push(RoundEvent::Result {
                hand_index,
                outcome,
                payout,
            });
            results.push(HandResult {
                hand,
                outcome,
                payout,
            });
        }

        results
    }
}
