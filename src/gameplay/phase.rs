/// Betting rounds in table order, plus the non-sequenced idle state
/// between hands. Waiting has no index so it never participates in the
/// monotonic street comparison.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum Street {
    #[default]
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    pub const fn index(&self) -> Option<usize> {
        match self {
            Self::Waiting => None,
            Self::Preflop => Some(0),
            Self::Flop => Some(1),
            Self::Turn => Some(2),
            Self::River => Some(3),
            Self::Showdown => Some(4),
        }
    }
    /// How many board cards this street shows once fully dealt.
    pub const fn n_observed(&self) -> Option<usize> {
        match self {
            Self::Flop => Some(3),
            Self::Turn => Some(4),
            Self::River => Some(5),
            _ => None,
        }
    }
    pub const fn all() -> &'static [Self] {
        &[
            Self::Preflop,
            Self::Flop,
            Self::Turn,
            Self::River,
            Self::Showdown,
            Self::Waiting,
        ]
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "Espera"),
            Self::Preflop => write!(f, "PreFlop"),
            Self::Flop => write!(f, "Flop"),
            Self::Turn => write!(f, "Turn"),
            Self::River => write!(f, "River"),
            Self::Showdown => write!(f, "Showdown"),
        }
    }
}

/// One recorded betting event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub player: String,
    pub action: Action,
    pub amount: Chips,
}

/// Context kept per recorded raise so later raises can be classified
/// relative to it.
#[derive(Debug, Clone)]
pub struct RaiseContext {
    pub player: String,
    pub amount_bb: f64,
    pub action: Action,
    pub pot_before_bb: f64,
}

/// State of one betting round. Replaced wholesale on street transitions
/// (players and blinds carried over by value); everything that persists
/// within the round only ever grows.
#[derive(Debug, Clone)]
pub struct Phase {
    pub street: Street,
    pub players: BTreeMap<String, Player>,
    pub pot: Chips,
    pub pot_bb: f64,
    /// Side "bet carry" readout next to the main pot.
    pub carry: Chips,
    pub carry_bb: f64,
    /// Board as displayed; truncated per street, backed by the union.
    pub board: Vec<Card>,
    persistent: Vec<Card>,
    pub actions: Vec<Event>,
    pub sb: Chips,
    pub bb: Chips,
    pub ante: bool,
    /// Dealer seat index within the clockwise ordering.
    pub dealer: Option<usize>,
    pub seated: bool,
    pub seats: usize,
    pub raises: Vec<RaiseContext>,
    /// Pot captured just before the most recent bet or raise landed.
    pub pot_before: Chips,
    pub pot_before_bb: f64,
}

impl Phase {
    pub fn new(street: Street) -> Self {
        Self {
            street,
            players: BTreeMap::new(),
            pot: 0.0,
            pot_bb: 0.0,
            carry: 0.0,
            carry_bb: 0.0,
            board: vec![],
            persistent: vec![],
            actions: vec![],
            sb: crate::DEFAULT_SB,
            bb: crate::DEFAULT_BB,
            ante: false,
            dealer: None,
            seated: false,
            seats: 0,
            raises: vec![],
            pot_before: 0.0,
            pot_before_bb: 0.0,
        }
    }

    /// Append an event; raises also capture their context for later
    /// classification.
    pub fn record(&mut self, name: &str, action: Action, amount: Chips) {
        self.actions.push(Event {
            player: name.to_string(),
            action,
            amount,
        });
        if action.is_raise() {
            if let Some(player) = self.players.get(name) {
                self.raises.push(RaiseContext {
                    player: name.to_string(),
                    amount_bb: player.bet_bb,
                    action,
                    pot_before_bb: self.pot_before_bb,
                });
            }
        }
    }

    pub fn max_bet(&self) -> Chips {
        self.players.values().map(|p| p.bet).fold(0.0, f64::max)
    }
    pub fn max_bet_bb(&self) -> f64 {
        self.players.values().map(|p| p.bet_bb).fold(0.0, f64::max)
    }

    /// Grow-only merge of the observed board into the persistent union.
    pub fn absorb(&mut self, observed: Vec<Card>) {
        if observed.len() > self.persistent.len() {
            self.persistent = observed;
        }
    }
    pub fn community(&self) -> &[Card] {
        &self.persistent
    }

    /// The most recent non-hero action for the infoset: the action of
    /// the player immediately preceding the hero in seat order when
    /// seats are resolved, otherwise the latest non-hero event.
    pub fn last_action(&self, hero: &str) -> Option<Action> {
        let valid = self
            .actions
            .iter()
            .filter(|e| e.player != hero)
            .collect::<Vec<_>>();
        if valid.is_empty() {
            return None;
        }
        let mut ordered = self
            .players
            .values()
            .filter(|p| p.status == Status::Active)
            .collect::<Vec<_>>();
        if ordered.len() >= 2 && self.seated {
            ordered.sort_by_key(|p| p.seat);
            if let Some(at) = ordered.iter().position(|p| p.hero) {
                for before in ordered[..at].iter().rev() {
                    for event in valid.iter().rev() {
                        if event.player == before.name {
                            return Some(event.action);
                        }
                    }
                }
            }
        }
        valid.last().map(|e| e.action)
    }

    /// Collapse repeated (player, action) records that carry the same
    /// amount; re-detections of one gesture, not new events.
    pub fn collapse(&mut self) {
        let mut seen = BTreeMap::<(String, Action), Chips>::new();
        let mut kept = Vec::with_capacity(self.actions.len());
        for event in self.actions.drain(..) {
            let key = (event.player.clone(), event.action);
            if seen.get(&key) != Some(&event.amount) {
                seen.insert(key, event.amount);
                kept.push(event);
            }
        }
        self.actions = kept;
    }

    /// Debug-friendly rendering of the street's event log.
    pub fn history(&self) -> String {
        if self.actions.is_empty() {
            return "Sin acciones".to_string();
        }
        self.actions
            .iter()
            .map(|e| {
                if e.amount > 0.0 {
                    format!("{}:{}(${:.2})", e.player, e.action, e.amount)
                } else {
                    format!("{}:{}", e.player, e.action)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::action::Raise;

    #[test]
    fn street_indices_are_ordered() {
        assert!(Street::Waiting.index().is_none());
        assert!(Street::Preflop.index() < Street::Flop.index());
        assert!(Street::River.index() < Street::Showdown.index());
    }

    #[test]
    fn board_union_grows_only() {
        let mut phase = Phase::new(Street::Flop);
        let flop = ["7h", "8d", "9s"]
            .iter()
            .map(|c| Card::parse(c).unwrap())
            .collect::<Vec<_>>();
        phase.absorb(flop.clone());
        phase.absorb(vec![]);
        assert_eq!(phase.community(), &flop[..]);
    }

    #[test]
    fn collapse_drops_re_detections() {
        let mut phase = Phase::new(Street::Flop);
        phase.record("a", Action::Call, 2.0);
        phase.record("a", Action::Call, 2.0);
        phase.record("b", Action::Fold, 0.0);
        phase.record("a", Action::Call, 4.0);
        phase.collapse();
        assert_eq!(phase.actions.len(), 3);
        assert_eq!(phase.actions[2].amount, 4.0);
    }

    #[test]
    fn last_action_prefers_seat_order() {
        let mut phase = Phase::new(Street::Flop);
        for (name, seat, hero) in [("btn", 0, false), ("sb", 1, false), ("hero", 2, true)] {
            let mut p = Player::new(name);
            p.status = Status::Active;
            p.seat = Some(seat);
            p.hero = hero;
            phase.players.insert(name.to_string(), p);
        }
        phase.seated = true;
        phase.record("btn", Action::Raise(Raise::Min), 2.0);
        phase.record("sb", Action::Call, 2.0);
        // the seat right before hero is sb, whose action is Call
        assert_eq!(phase.last_action("hero"), Some(Action::Call));
    }

    #[test]
    fn last_action_falls_back_to_latest() {
        let mut phase = Phase::new(Street::Flop);
        phase.record("x", Action::Check, 0.0);
        phase.record("y", Action::Call, 1.0);
        assert_eq!(phase.last_action("hero"), Some(Action::Call));
        assert_eq!(phase.last_action("y"), Some(Action::Check));
    }
}

use super::action::Action;
use super::player::Player;
use super::player::Status;
use crate::Chips;
use crate::cards::card::Card;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
