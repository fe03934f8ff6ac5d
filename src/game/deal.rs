use crate::card::Card;
use crate::error::ShoeError;
use crate::hand::Hand;
use crate::result::{DealTarget, RoundEvent};
use crate::shoe::CardSource;

use super::Round;

impl<S: CardSource + ?Sized> Round<'_, S> {
    /// Deals one face-up card to a player hand.
    pub(super) fn deal_player(
        &mut self,
        hand: &mut Hand,
        hand_index: usize,
    ) -> Result<(), ShoeError> {
        let card = self.draw()?;
        hand.add_card(card);
        self.events.push(RoundEvent::Deal {
            target: DealTarget::Player,
            card,
            hand_index,
            revealed: true,
        });
        Ok(())
    }

    /// Deals one card to the dealer.
    pub(super) fn deal_dealer(&mut self, revealed: bool) -> Result<Card, ShoeError> {
        let card = self.draw()?;
        self.dealer.add_card(card);
        self.events.push(RoundEvent::Deal {
            target: DealTarget::Dealer,
            card,
            hand_index: 0,
            revealed,
        });
        Ok(card)
    }

    /// Deals player, dealer up, player, dealer hole. Returns the upcard.
    pub(super) fn deal_initial(&mut self) -> Result<Card, ShoeError> {
        let mut hand = Hand::new(self.bet);

        self.deal_player(&mut hand, 0)?;
        let upcard = self.deal_dealer(true)?;
        self.deal_player(&mut hand, 0)?;
        self.deal_dealer(false)?;

        self.player_blackjack = hand.is_blackjack();
        self.pending.push_back(hand);
        Ok(upcard)
    }

    /// Checks the hole card under a ten or ace when the rules allow a peek.
    pub(super) fn peek(&mut self, upcard: Card) {
        if !self.rules.peek || !(upcard.rank.is_ten_value() || upcard.is_ace()) {
            return;
        }
        if self.dealer.is_blackjack() {
            self.dealer_blackjack = true;
            self.reveal_hole_card();
        }
    }

    /// Turns the hole card face up and records it, once per round.
    pub(super) fn reveal_hole_card(&mut self) {
        if self.hole_revealed {
            return;
        }
        if let Some(&card) = self.dealer.cards().get(1) {
            self.hole_revealed = true;
            self.events.push(RoundEvent::DealerReveal { card });
        }
    }
}
