use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Coins = 0,
    Cups = 1,
    Swords = 2,
    Clubs = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Coins, Suit::Cups, Suit::Swords, Suit::Clubs];

    /// Suit counted by the "most cards of one suit" award and holding the seven.
    pub const SCORING: Suit = Suit::Coins;

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Suit::Coins => "Coins",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Clubs => "Clubs",
        };
        f.write_str(label)
    }
}
