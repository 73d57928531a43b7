#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    /// Parse the two-character wire form, e.g. "Ah".
    pub fn parse(s: &str) -> Option<Self> {
        let (rank, suit) = s.split_at_checked(s.len().checked_sub(1)?)?;
        Some(Self {
            rank: Rank::parse(rank)?,
            suit: Suit::parse(suit)?,
        })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_wire_form() {
        let card = Card::parse("Ah").unwrap();
        assert_eq!(card.rank(), Rank::Ace);
        assert_eq!(card.suit(), Suit::Heart);
        assert_eq!(card.to_string(), "Ah");
    }

    #[test]
    fn parse_rejects_noise() {
        assert!(Card::parse("").is_none());
        assert!(Card::parse("A").is_none());
        assert!(Card::parse("1h").is_none());
        assert!(Card::parse("Ax").is_none());
    }
}

use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result};
