//! Round engine, shoe, and hand integration tests.

#![expect(clippy::float_cmp, reason = "payouts are exact binary fractions")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bjsim::{
    Action, BlackjackPayout, Card, DECK_SIZE, DealTarget, Hand, HandOutcome, Rank, RoundError,
    RoundEvent, Rules, RulesError, Shoe, ShoeError, StackedCards, Table, create_rng, play_round,
};

use Rank::{Ace, Eight, Five, King, Nine, Seven, Six, Ten, Two};

const BET: f64 = 10.0;
const BANKROLL: f64 = 1000.0;

fn hand_of(ranks: &[Rank]) -> Hand {
    let mut hand = Hand::new(BET);
    for &rank in ranks {
        hand.add_card(Card::new(rank));
    }
    hand
}

fn actions(events: &[RoundEvent]) -> Vec<Action> {
    events
        .iter()
        .filter_map(|event| match event {
            RoundEvent::Action { action, .. } => Some(*action),
            _ => None,
        })
        .collect()
}

fn counting_callback() -> (Arc<AtomicUsize>, Box<dyn FnMut() + Send>) {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&count);
    (
        count,
        Box::new(move || {
            seen.fetch_add(1, Ordering::SeqCst);
        }),
    )
}

#[test]
fn hand_totals_and_softness() {
    let pair_of_aces = hand_of(&[Ace, Ace]);
    assert_eq!(pair_of_aces.best_total(), 12);
    assert!(pair_of_aces.is_soft());

    let soft_17 = hand_of(&[Ace, Six]);
    assert_eq!(soft_17.best_total(), 17);
    assert!(soft_17.is_soft());

    let hard_17 = hand_of(&[Ten, Six, Ace]);
    assert_eq!(hard_17.best_total(), 17);
    assert!(!hard_17.is_soft());

    let soft_21 = hand_of(&[Ace, Ace, Nine]);
    assert_eq!(soft_21.best_total(), 21);
    assert!(soft_21.is_soft());
    assert!(!soft_21.is_blackjack());

    let bust = hand_of(&[Ten, King, Five]);
    assert_eq!(bust.best_total(), 25);
    assert!(bust.is_bust());
    assert!(!bust.is_soft());
}

#[test]
fn every_two_card_21_is_blackjack() {
    for rank in [Ten, Rank::Jack, Rank::Queen, King] {
        assert!(hand_of(&[Ace, rank]).is_blackjack());
        assert!(hand_of(&[rank, Ace]).is_blackjack());
    }
    assert!(!hand_of(&[Seven, Seven, Seven]).is_blackjack());
}

#[test]
fn split_eligibility() {
    let rules = Rules::default();

    assert!(hand_of(&[King, Ten]).is_pair());
    assert!(hand_of(&[King, Ten]).can_split(&rules, 1));
    assert!(!hand_of(&[Nine, Ten]).can_split(&rules, 1));
    assert!(!hand_of(&[Eight, Eight]).can_split(&rules, usize::from(rules.max_hands)));
    assert!(!hand_of(&[Eight, Eight, Two]).can_split(&rules, 1));

    let mut resplit = Hand::from_split(Card::new(Ace), BET);
    resplit.add_card(Card::new(Ace));
    assert!(resplit.is_split_aces());
    assert!(!resplit.can_split(&rules, 2));
    assert!(resplit.can_split(&rules.clone().with_resplit_aces(true), 2));
}

#[test]
fn rules_validation() {
    assert_eq!(Rules::default().validate(), Ok(()));
    assert_eq!(
        Rules::default().with_decks(0).validate(),
        Err(RulesError::ZeroDecks)
    );
    assert_eq!(
        Rules::default().with_penetration(0.0).validate(),
        Err(RulesError::InvalidPenetration)
    );
    assert_eq!(
        Rules::default().with_penetration(f64::NAN).validate(),
        Err(RulesError::InvalidPenetration)
    );
    assert_eq!(Rules::default().with_penetration(1.0).validate(), Ok(()));
    assert_eq!(
        Rules::default().with_max_hands(0).validate(),
        Err(RulesError::InvalidMaxHands)
    );
}

#[test]
fn shoe_rejects_invalid_rules() {
    let err = Shoe::new(&Rules::default().with_decks(0), create_rng(Some(1))).unwrap_err();
    assert_eq!(err, RulesError::ZeroDecks);
}

#[test]
fn fresh_shoe_holds_four_of_each_rank_per_deck() {
    let rules = Rules::default().with_decks(2).with_penetration(1.0);
    let mut shoe = Shoe::new(&rules, create_rng(Some(9))).unwrap();
    assert_eq!(shoe.total_cards(), 2 * DECK_SIZE);
    assert_eq!(shoe.remaining(), 2 * DECK_SIZE);

    let mut counts = [0_usize; 13];
    for _ in 0..2 * DECK_SIZE {
        let card = shoe.draw().unwrap();
        let index = Rank::ALL.iter().position(|&r| r == card.rank).unwrap();
        counts[index] += 1;
    }
    assert_eq!(counts, [8; 13]);
    assert_eq!(shoe.shuffle_count(), 1);
}

#[test]
fn shoe_reshuffles_at_cut_card() {
    let rules = Rules::default().with_decks(1).with_penetration(0.5);
    let (count, callback) = counting_callback();
    let mut shoe = Shoe::with_shuffle_callback(&rules, create_rng(Some(1)), callback).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(shoe.cutoff(), 26);

    for _ in 0..26 {
        shoe.draw().unwrap();
    }
    assert_eq!(count.load(Ordering::SeqCst), 1);

    shoe.draw().unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(shoe.shuffle_count(), 2);
    assert_eq!(shoe.remaining(), DECK_SIZE - 1);
}

#[test]
fn shuffle_callback_fires_once_per_reshuffle() {
    let rules = Rules::default().with_decks(1).with_penetration(0.25);
    let mut shoe = Shoe::new(&rules, create_rng(Some(5))).unwrap();
    let (count, callback) = counting_callback();
    shoe.set_shuffle_callback(Some(callback));

    for _ in 0..1_000 {
        shoe.draw().unwrap();
        assert!(shoe.dealt() <= shoe.cutoff());
        assert!(shoe.cutoff() <= shoe.total_cards());
    }

    let reshuffles = shoe.shuffle_count() - 1;
    assert_eq!(count.load(Ordering::SeqCst) as u64, reshuffles);
    // 13 cards per pass, so 1000 draws cross the cut card 76 times.
    assert_eq!(reshuffles, 76);
}

#[test]
fn same_seed_same_cards() {
    let rules = Rules::default().with_decks(1).with_penetration(0.6);
    let mut a = Shoe::new(&rules, create_rng(Some(1234))).unwrap();
    let mut b = Shoe::new(&rules, create_rng(Some(1234))).unwrap();

    let left: Vec<Card> = (0..300).map(|_| a.draw().unwrap()).collect();
    let right: Vec<Card> = (0..300).map(|_| b.draw().unwrap()).collect();
    assert_eq!(left, right);
}

#[test]
fn blackjack_pays_three_to_two() {
    // player A, dealer 9, player K, dealer 5
    let mut cards = StackedCards::new([Ace, Nine, King, Five]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert_eq!(round.hands.len(), 1);
    assert_eq!(round.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(round.net, 15.0);
    assert!(actions(&round.events).is_empty());
    assert_eq!(round.dealer_hand.len(), 2);
}

#[test]
fn blackjack_pays_six_to_five() {
    let rules = Rules::default().with_blackjack_payout(BlackjackPayout::SixToFive);
    let mut cards = StackedCards::new([Ace, Nine, King, Five]);
    let round = play_round(&mut cards, &rules, BET, BANKROLL).unwrap();

    assert_eq!(round.hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(round.net, 12.0);
}

#[test]
fn double_down_wins_double() {
    // player 6, dealer 6, player 5, dealer 10, player double 10, dealer 9
    let mut cards = StackedCards::new([Six, Six, Five, Ten, Ten, Nine]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    let hand = &round.hands[0];
    assert!(hand.hand.is_doubled());
    assert_eq!(hand.hand.bet(), 20.0);
    assert_eq!(hand.hand.best_total(), 21);
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert_eq!(round.net, 20.0);
    assert_eq!(actions(&round.events), vec![Action::Double]);
    assert!(round.dealer_hand.is_bust());
}

#[test]
fn double_without_headroom_becomes_hit() {
    let mut cards = StackedCards::new([Six, Six, Five, Ten, Ten, Nine]);
    let round = play_round(&mut cards, &Rules::default(), BET, 15.0).unwrap();

    assert!(!round.hands[0].hand.is_doubled());
    assert_eq!(actions(&round.events), vec![Action::Hit, Action::Stand]);
    assert_eq!(round.net, 10.0);
}

#[test]
fn split_eights_into_two_hands() {
    // player 8, dealer 6, player 8, dealer 10, split cards 10 and 9, dealer 7
    let mut cards = StackedCards::new([Eight, Six, Eight, Ten, Ten, Nine, Seven]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert_eq!(round.hands.len(), 2);
    assert!(round.hands.iter().all(bjsim::HandResult::is_split));
    assert_eq!(round.hands[0].hand.best_total(), 18);
    assert_eq!(round.hands[1].hand.best_total(), 17);
    assert_eq!(round.net, 20.0);
    assert_eq!(
        actions(&round.events),
        vec![Action::Split, Action::Stand, Action::Stand]
    );
}

#[test]
fn resplit_keeps_hands_in_order() {
    let mut cards = StackedCards::new([
        Eight, Six, Eight, Ten, // initial deal
        Eight, Nine, // first split
        Ten, Ten, // second split
        Ten, // dealer
    ]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    let totals: Vec<u8> = round.hands.iter().map(|h| h.hand.best_total()).collect();
    assert_eq!(totals, vec![18, 18, 17]);
    assert_eq!(round.net, 30.0);
}

#[test]
fn split_stops_at_hand_ceiling() {
    let rules = Rules::default().with_max_hands(2);
    let mut cards = StackedCards::new([Eight, Six, Eight, Ten, Eight, Eight, Ten]);
    let round = play_round(&mut cards, &rules, BET, BANKROLL).unwrap();

    assert_eq!(round.hands.len(), 2);
    assert_eq!(
        actions(&round.events),
        vec![Action::Split, Action::Stand, Action::Stand]
    );
    assert_eq!(round.net, 20.0);
}

#[test]
fn split_without_headroom_plays_the_total() {
    // 8-8 against a 6 stands on hard 16 when the bankroll cannot cover a second bet.
    let mut cards = StackedCards::new([Eight, Six, Eight, Ten, Ten]);
    let round = play_round(&mut cards, &Rules::default(), BET, 15.0).unwrap();

    assert_eq!(round.hands.len(), 1);
    assert_eq!(actions(&round.events), vec![Action::Stand]);
    assert_eq!(round.hands[0].outcome, HandOutcome::Win);
    assert_eq!(round.net, 10.0);
}

#[test]
fn split_aces_take_one_card_each() {
    let mut cards = StackedCards::new([Ace, Five, Ace, Ten, Nine, Two, Ten]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert_eq!(round.hands.len(), 2);
    for result in &round.hands {
        assert!(result.hand.is_split_aces());
        assert_eq!(result.hand.len(), 2);
        assert_eq!(result.outcome, HandOutcome::Win);
    }
    // A-10 after a split is 21 but not a natural.
    assert_eq!(actions(&round.events), vec![Action::Split]);
    assert_eq!(round.net, 20.0);
}

#[test]
fn late_surrender_loses_half() {
    let rules = Rules::default().with_surrender(true);
    // player 10, dealer 10, player 6, dealer 9
    let mut cards = StackedCards::new([Ten, Ten, Six, Nine]);
    let round = play_round(&mut cards, &rules, BET, BANKROLL).unwrap();

    assert!(round.hands[0].hand.is_surrendered());
    assert_eq!(round.hands[0].outcome, HandOutcome::Surrender);
    assert_eq!(round.net, -5.0);
    assert_eq!(round.dealer_hand.len(), 2);
}

#[test]
fn exhausted_card_source_is_an_error() {
    // Without surrender, 16 against a ten hits and needs a fifth card.
    let mut cards = StackedCards::new([Ten, Ten, Six, Nine]);
    let err = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap_err();
    assert_eq!(err, RoundError::Shoe(ShoeError::Exhausted));
}

#[test]
fn dealer_stands_on_soft_17() {
    let mut cards = StackedCards::new([Ten, Ace, Seven, Six, Five, Five]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert_eq!(round.dealer_hand.len(), 2);
    assert_eq!(round.hands[0].outcome, HandOutcome::Push);
}

#[test]
fn dealer_hits_soft_17() {
    let rules = Rules::default().with_stand_on_soft_17(false);
    let mut cards = StackedCards::new([Ten, Ace, Seven, Six, Five, Five]);
    let round = play_round(&mut cards, &rules, BET, BANKROLL).unwrap();

    assert!(round.dealer_hand.len() > 2);
    assert_eq!(round.dealer_hand.best_total(), 17);
    assert!(!round.dealer_hand.is_soft());
}

#[test]
fn peeked_blackjack_is_revealed_before_player_acts() {
    // player 9, dealer A, player 7, dealer K, player hits 2
    let mut cards = StackedCards::new([Nine, Ace, Seven, King, Two]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert!(round.dealer_blackjack);
    assert!(matches!(
        round.events[4],
        RoundEvent::DealerReveal { card } if card.rank == King
    ));
    assert_eq!(actions(&round.events), vec![Action::Hit, Action::Stand]);
    assert_eq!(round.hands[0].outcome, HandOutcome::Loss);
    assert_eq!(round.net, -10.0);
    assert_eq!(round.dealer_hand.len(), 2);
}

#[test]
fn surrender_against_peeked_blackjack_loses_half() {
    let rules = Rules::default().with_surrender(true);
    // player 10, dealer A, player 6, dealer K
    let mut cards = StackedCards::new([Ten, Ace, Six, King]);
    let round = play_round(&mut cards, &rules, BET, BANKROLL).unwrap();

    assert!(round.dealer_blackjack);
    assert_eq!(actions(&round.events), vec![Action::Surrender]);
    assert_eq!(round.hands[0].outcome, HandOutcome::Surrender);
    assert_eq!(round.net, -5.0);
}

#[test]
fn double_against_peeked_blackjack_loses_both_wagers() {
    // player 6, dealer 10, player 5, dealer A, player doubles into 2
    let mut cards = StackedCards::new([Six, Ten, Five, Ace, Two]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert!(round.dealer_blackjack);
    assert_eq!(actions(&round.events), vec![Action::Double]);
    assert!(round.hands[0].hand.is_doubled());
    assert_eq!(round.hands[0].outcome, HandOutcome::Loss);
    assert_eq!(round.net, -20.0);
    assert_eq!(cards.remaining(), 0);
}

#[test]
fn unpeeked_blackjack_found_at_reveal() {
    let rules = Rules::default().with_peek(false);
    let mut cards = StackedCards::new([Nine, Ace, Seven, King, Five]);
    let round = play_round(&mut cards, &rules, BET, BANKROLL).unwrap();

    assert!(round.dealer_blackjack);
    assert_eq!(actions(&round.events), vec![Action::Hit, Action::Stand]);
    assert_eq!(round.hands[0].hand.best_total(), 21);
    assert_eq!(round.net, -10.0);
}

#[test]
fn blackjack_against_blackjack_pushes() {
    let mut cards = StackedCards::new([Ace, Ace, King, King]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    assert!(round.dealer_blackjack);
    assert_eq!(round.hands[0].outcome, HandOutcome::Push);
    assert_eq!(round.net, 0.0);
}

#[test]
fn trace_is_chronological() {
    let mut cards = StackedCards::new([Six, Six, Five, Ten, Ten, Nine]);
    let round = play_round(&mut cards, &Rules::default(), BET, BANKROLL).unwrap();

    let deal = |target, rank, revealed| RoundEvent::Deal {
        target,
        card: Card::new(rank),
        hand_index: 0,
        revealed,
    };
    assert_eq!(
        round.events,
        vec![
            deal(DealTarget::Player, Six, true),
            deal(DealTarget::Dealer, Six, true),
            deal(DealTarget::Player, Five, true),
            deal(DealTarget::Dealer, Ten, false),
            RoundEvent::Action {
                hand_index: 0,
                action: Action::Double,
            },
            deal(DealTarget::Player, Ten, true),
            RoundEvent::DealerReveal {
                card: Card::new(Ten),
            },
            deal(DealTarget::Dealer, Nine, true),
            RoundEvent::Result {
                hand_index: 0,
                outcome: HandOutcome::Win,
                payout: 20.0,
            },
        ]
    );
}

#[test]
fn mid_round_shuffle_is_traced() {
    // Cut card after two cards forces a reshuffle on the third deal.
    let rules = Rules::default().with_decks(1).with_penetration(0.05);
    let mut shoe = Shoe::new(&rules, create_rng(Some(11))).unwrap();
    let round = play_round(&mut shoe, &rules, BET, BANKROLL).unwrap();

    let position = round
        .events
        .iter()
        .position(|e| *e == RoundEvent::Shuffle)
        .unwrap();
    assert_eq!(position, 2);
    assert!(matches!(round.events[3], RoundEvent::Deal { .. }));
    assert!(shoe.shuffle_count() >= 2);
}

#[test]
fn invalid_bets_are_rejected() {
    let mut cards = StackedCards::new([Ace, Nine, King, Five]);
    for bet in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(
            play_round(&mut cards, &Rules::default(), bet, BANKROLL).unwrap_err(),
            RoundError::InvalidBet
        );
    }
    assert_eq!(cards.remaining(), 4);
}

#[test]
fn table_tracks_bankroll() {
    let mut table = Table::new(Rules::default(), create_rng(Some(21)), BANKROLL).unwrap();

    let mut expected = BANKROLL;
    for _ in 0..5 {
        let round = table.play(BET).unwrap();
        expected += round.net;
        assert_eq!(table.bankroll(), expected);
    }
    assert_eq!(table.rounds_played(), 5);

    assert_eq!(
        table.play(table.bankroll() + 1.0).unwrap_err(),
        RoundError::InsufficientFunds
    );
    assert_eq!(table.play(0.0).unwrap_err(), RoundError::InvalidBet);

    table.reset(50.0);
    assert_eq!(table.bankroll(), 50.0);
    assert_eq!(table.rounds_played(), 0);
    assert!(table.shoe().shuffle_count() >= 1);
}
