/// The nine hand classes the strategy tables key on. Display yields the
/// wire labels the tables were generated with, so they must not change.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Category {
    #[default]
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    /// Pre-flop shortcut: a pocket pair keys as Par, anything else as
    /// the high-card class. The oracle is only consulted post-flop.
    pub fn preflop(hole: &[Card]) -> Self {
        match hole {
            [a, b] if a.rank() == b.rank() => Self::Pair,
            _ => Self::HighCard,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Category::HighCard => "Carta Alta",
                Category::Pair => "Par",
                Category::TwoPair => "Doble Par",
                Category::Trips => "Trío",
                Category::Straight => "Escalera",
                Category::Flush => "Color",
                Category::FullHouse => "Full House",
                Category::Quads => "Poker",
                Category::StraightFlush => "Escalera de Color",
            }
        )
    }
}

/// Seam for the external hand-ranking engine: two hole cards plus up to
/// five board cards in, one of the nine classes out.
pub trait Oracle {
    fn category(&self, hole: &[Card], board: &[Card]) -> Category;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preflop_pair() {
        let hole = [Card::parse("Qd").unwrap(), Card::parse("Qs").unwrap()];
        assert_eq!(Category::preflop(&hole), Category::Pair);
        assert_eq!(Category::preflop(&hole).to_string(), "Par");
    }

    #[test]
    fn preflop_unpaired() {
        let hole = [Card::parse("Ah").unwrap(), Card::parse("Kd").unwrap()];
        assert_eq!(Category::preflop(&hole), Category::HighCard);
        assert_eq!(Category::preflop(&hole).to_string(), "Carta Alta");
    }
}

use super::card::Card;
