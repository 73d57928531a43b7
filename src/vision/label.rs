/// The fixed detection-label set the object model emits. Closed enum so
/// every consumer match is checked at compile time instead of falling
/// through a string-keyed dictionary at runtime.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    /// Action glyph floating near a seat ("Fold", "Raise", ...).
    ActionTag,
    /// A chip stack pushed in front of a seat this street.
    Bet,
    /// The main pot readout.
    Pot,
    /// The side "bet carry" pot readout (also doubles as the ante cue).
    PotCarry,
    DealerButton,
    BoardCard,
    HoleCard,
    ShowdownCard,
    /// Suit glyphs, one label per suit.
    Hearts,
    Diamonds,
    Spades,
    Clubs,
    /// Between-hands idle marker.
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Winner,
    /// Seat frames by lifecycle state; Hero is the seat we advise.
    SeatHero,
    SeatActive,
    SeatIdle,
    SeatAway,
    PlayerName,
    Stack,
    /// The whole table being visible at all.
    Table,
    /// Active-turn highlight.
    TurnMarker,
    /// Rank glyph inside a card box.
    CardValue,
}

impl Label {
    /// The suit a suit-glyph label encodes, if any.
    pub fn suit(&self) -> Option<Suit> {
        match self {
            Label::Hearts => Some(Suit::Heart),
            Label::Diamonds => Some(Suit::Diamond),
            Label::Spades => Some(Suit::Spade),
            Label::Clubs => Some(Suit::Club),
            _ => None,
        }
    }
    /// The street a phase-marker label encodes, if any.
    pub fn street(&self) -> Option<Street> {
        match self {
            Label::Waiting => Some(Street::Waiting),
            Label::Preflop => Some(Street::Preflop),
            Label::Flop => Some(Street::Flop),
            Label::Turn => Some(Street::Turn),
            Label::River => Some(Street::River),
            Label::Showdown => Some(Street::Showdown),
            _ => None,
        }
    }
    /// Seat-frame labels in hero-first priority order, paired with the
    /// lifecycle state they imply.
    pub const fn seats() -> &'static [(Self, Status)] {
        &[
            (Label::SeatHero, Status::Active),
            (Label::SeatActive, Status::Active),
            (Label::SeatIdle, Status::Idle),
            (Label::SeatAway, Status::Away),
        ]
    }
    pub const fn suits() -> &'static [Self] {
        &[Label::Hearts, Label::Diamonds, Label::Spades, Label::Clubs]
    }
}

use crate::cards::suit::Suit;
use crate::gameplay::phase::Street;
use crate::gameplay::player::Status;
use serde::Deserialize;
use serde::Serialize;
