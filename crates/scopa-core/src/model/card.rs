use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::cmp::Ordering;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Field order makes the derived ordering compare by rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const SEVEN_OF_COINS: Card = Card::new(Rank::Seven, Suit::Coins);

    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Orders by (suit, rank); used to break ties between capture candidates.
    pub fn cmp_suit_first(&self, other: &Card) -> Ordering {
        self.suit.cmp(&other.suit).then(self.rank.cmp(&other.rank))
    }

    /// Dense index in 0..40, suit-major.
    pub const fn index(self) -> usize {
        self.suit.index() * 10 + (self.rank.value() as usize - 1)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.rank, self.suit)
    }
}
