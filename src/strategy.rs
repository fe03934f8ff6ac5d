//! Basic-strategy decision tables.
//!
//! Each table row holds one action per dealer upcard, in the column order
//! 2, 3, 4, 5, 6, 7, 8, 9, 10, A.

use core::fmt;

use crate::card::Card;
use crate::hand::Hand;
use crate::rules::Rules;

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Draw a card.
    Hit,
    /// Keep the hand.
    Stand,
    /// Double the wager and take exactly one card.
    Double,
    /// Split a pair into two hands.
    Split,
    /// Forfeit half the wager.
    Surrender,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::Double => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
        })
    }
}

/// Game-state limits on the options available at a decision point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constraints {
    /// Whether splitting is currently possible.
    pub allow_split: bool,
    /// Whether doubling is currently possible.
    pub allow_double: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            allow_split: true,
            allow_double: true,
        }
    }
}

use Action::{Double as D, Hit as H, Split as P, Stand as S};

type Row = [Action; 10];

const ALL_STAND: Row = [S; 10];
const ALL_HIT: Row = [H; 10];

/// Hard totals. Totals below the table hit, totals above it stand.
const HARD_S17: &[(u8, Row)] = &[
    (8, ALL_HIT),
    (9, [H, D, D, D, D, H, H, H, H, H]),
    (10, [D, D, D, D, D, D, D, D, H, H]),
    (11, [D, D, D, D, D, D, D, D, D, H]),
    (12, [H, H, S, S, S, H, H, H, H, H]),
    (13, [S, S, S, S, S, H, H, H, H, H]),
    (14, [S, S, S, S, S, H, H, H, H, H]),
    (15, [S, S, S, S, S, H, H, H, H, H]),
    (16, [S, S, S, S, S, H, H, H, H, H]),
    (17, ALL_STAND),
];

/// Hard strategy does not depend on the soft-17 rule.
const HARD_H17: &[(u8, Row)] = HARD_S17;

const SOFT_S17: &[(u8, Row)] = &[
    (13, [H, H, H, D, D, H, H, H, H, H]),
    (14, [H, H, H, D, D, H, H, H, H, H]),
    (15, [H, H, D, D, D, H, H, H, H, H]),
    (16, [H, H, D, D, D, H, H, H, H, H]),
    (17, [H, D, D, D, D, H, H, H, H, H]),
    (18, [S, D, D, D, D, S, S, H, H, H]),
    (19, [S, S, S, S, D, S, S, S, S, S]),
    (20, ALL_STAND),
];

const SOFT_H17: &[(u8, Row)] = &[
    (13, [H, H, H, D, D, H, H, H, H, H]),
    (14, [H, H, H, D, D, H, H, H, H, H]),
    (15, [H, H, D, D, D, H, H, H, H, H]),
    (16, [H, H, D, D, D, H, H, H, H, H]),
    (17, [H, D, D, D, D, H, H, H, H, H]),
    (18, [D, D, D, D, D, S, S, S, H, H]),
    (19, [S, S, S, S, D, S, S, S, S, S]),
    (20, ALL_STAND),
];

/// Pairs, indexed by card value minus two (so aces sit last).
const PAIRS_S17: [Row; 10] = [
    [P, P, P, P, P, P, H, H, H, H], // 2-2
    [P, P, P, P, P, P, H, H, H, H], // 3-3
    [H, H, H, P, P, H, H, H, H, H], // 4-4
    [D, D, D, D, D, D, D, D, H, H], // 5-5
    [P, P, P, P, P, H, H, H, H, H], // 6-6
    [P, P, P, P, P, P, H, H, H, H], // 7-7
    [P; 10],                        // 8-8
    [P, P, P, P, P, S, P, P, S, S], // 9-9
    ALL_STAND,                      // 10-10
    [P; 10],                        // A-A
];

const PAIRS_H17: [Row; 10] = PAIRS_S17;

/// Late-surrender entries: hard total and the dealer upcard values it applies to.
const SURRENDER: &[(u8, &[u8])] = &[(16, &[9, 10, 11]), (15, &[10])];

/// Column index of a dealer upcard: 2..=9 map to 0..=7, tens to 8, aces to 9.
const fn dealer_index(upcard: Card) -> usize {
    upcard.value() as usize - 2
}

fn lookup(table: &[(u8, Row)], total: u8, column: usize) -> Action {
    table
        .iter()
        .find(|(t, _)| *t == total)
        .map_or_else(|| default_action(total), |(_, row)| row[column])
}

const fn default_action(total: u8) -> Action {
    if total >= 17 { S } else { H }
}

fn surrender_applies(total: u8, upcard: Card) -> bool {
    SURRENDER
        .iter()
        .any(|(t, dealers)| *t == total && dealers.contains(&upcard.value()))
}

/// Picks the basic-strategy action for `hand` against `upcard`.
///
/// Checks run in order: surrender, pairs, soft totals, hard totals. A Double
/// the constraints forbid becomes Hit, or Stand on soft 18+ and hard 17+.
///
/// ```
/// use bjsim::{Action, Card, Constraints, Hand, Rank, Rules, decide};
///
/// let mut hand = Hand::new(10.0);
/// hand.add_card(Card::new(Rank::Ten));
/// hand.add_card(Card::new(Rank::Two));
/// let rules = Rules::default();
/// let up = |rank| Card::new(rank);
/// assert_eq!(decide(&hand, up(Rank::Two), &rules, Constraints::default()), Action::Hit);
/// assert_eq!(decide(&hand, up(Rank::Four), &rules, Constraints::default()), Action::Stand);
/// ```
#[must_use]
pub fn decide(hand: &Hand, upcard: Card, rules: &Rules, constraints: Constraints) -> Action {
    let column = dealer_index(upcard);
    let total = hand.best_total();
    let soft = hand.is_soft();

    if rules.surrender
        && hand.len() == 2
        && !hand.is_from_split()
        && !soft
        && surrender_applies(total, upcard)
    {
        return Action::Surrender;
    }

    if constraints.allow_split && hand.is_pair() {
        if let Some(first) = hand.cards().first() {
            let table = if rules.stand_on_soft_17 {
                &PAIRS_S17
            } else {
                &PAIRS_H17
            };
            let mut action = table[first.value() as usize - 2][column];
            if action == P && first.value() == 4 && !rules.double_after_split {
                action = H;
            }
            if action == D && !constraints.allow_double {
                action = H;
            }
            return action;
        }
    }

    let table = match (soft, rules.stand_on_soft_17) {
        (true, true) => SOFT_S17,
        (true, false) => SOFT_H17,
        (false, true) => HARD_S17,
        (false, false) => HARD_H17,
    };
    let action = lookup(table, total, column);
    if action == D && !constraints.allow_double {
        let stand_from = if soft { 18 } else { 17 };
        return if total >= stand_from { S } else { H };
    }
    action
}
