/// Seat lifecycle as the detector reports it. Idle means the seat is
/// drawn but out of the hand; Away means sitting out entirely.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Status {
    Active,
    #[default]
    Idle,
    Away,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "activo"),
            Self::Idle => write!(f, "no_activo"),
            Self::Away => write!(f, "ausente"),
        }
    }
}

/// One tracked seat. Identity is the name, held stable across cycles by
/// spatial proximity matching so a single bad text read does not spawn
/// a phantom player.
#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub stack: Chips,
    pub stack_bb: f64,
    pub prev_stack: Chips,
    pub prev_stack_bb: f64,
    /// Chips committed this street.
    pub bet: Chips,
    pub bet_bb: f64,
    pub prev_bet: Chips,
    pub prev_bet_bb: f64,
    pub position: Option<Position>,
    pub seat: Option<usize>,
    pub hero: bool,
    pub turn: bool,
    pub shoved: bool,
    pub status: Status,
    pub prev_status: Status,
    /// Hole cards as displayed; always mirrors the persistent union.
    pub cards: Vec<Card>,
    persistent: Vec<Card>,
    pub zone: Zone,
    pub last: Option<Action>,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            stack: 0.0,
            stack_bb: 0.0,
            prev_stack: 0.0,
            prev_stack_bb: 0.0,
            bet: 0.0,
            bet_bb: 0.0,
            prev_bet: 0.0,
            prev_bet_bb: 0.0,
            position: None,
            seat: None,
            hero: false,
            turn: false,
            shoved: false,
            status: Status::Idle,
            prev_status: Status::Idle,
            cards: vec![],
            persistent: vec![],
            zone: Zone::default(),
            last: None,
        }
    }

    /// Shift current readings into the previous-cycle slots before this
    /// cycle's observations overwrite them.
    pub fn flip(&mut self) {
        self.prev_status = self.status;
        self.prev_stack = self.stack;
        self.prev_stack_bb = self.stack_bb;
        self.prev_bet = self.bet;
        self.prev_bet_bb = self.bet_bb;
    }

    /// Grow-only merge of freshly observed hole cards: a frame that
    /// shows fewer cards than we have already seen is occlusion, not
    /// information.
    pub fn absorb(&mut self, observed: Vec<Card>) {
        if observed.len() > self.persistent.len() {
            self.persistent = observed;
        }
        self.cards = self.persistent.clone();
    }

    pub fn hole(&self) -> &[Card] {
        &self.persistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &[&str]) -> Vec<Card> {
        s.iter().map(|c| Card::parse(c).unwrap()).collect()
    }

    #[test]
    fn absorb_never_shrinks() {
        let mut player = Player::new("hero");
        player.absorb(cards(&["Ah", "Kd"]));
        assert_eq!(player.cards.len(), 2);
        player.absorb(cards(&["Ah"]));
        assert_eq!(player.cards.len(), 2);
        player.absorb(cards(&[]));
        assert_eq!(player.cards, cards(&["Ah", "Kd"]));
    }

    #[test]
    fn flip_snapshots_previous() {
        let mut player = Player::new("v");
        player.bet = 3.0;
        player.bet_bb = 30.0;
        player.status = Status::Active;
        player.flip();
        player.bet = 9.0;
        assert_eq!(player.prev_bet, 3.0);
        assert_eq!(player.prev_bet_bb, 30.0);
        assert_eq!(player.prev_status, Status::Active);
    }
}

use super::action::Action;
use super::position::Position;
use crate::Chips;
use crate::cards::card::Card;
use crate::vision::zone::Zone;
use serde::Deserialize;
use serde::Serialize;
