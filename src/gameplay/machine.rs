//! The monotonic hand state machine. One `advance` per capture cycle:
//! resolve the street, re-identify seats, read stacks and bets, merge
//! the board, then hand the phase to inference. Within a hand, streets
//! only move forward and card sets only grow; noise can delay what we
//! know but never rewind it.

#[derive(Debug, Default)]
pub struct GameState {
    current: Option<Phase>,
    previous: Option<Phase>,
    /// 1-based hand counter, bumped when a finished hand is archived.
    hand: usize,
    history: VecDeque<Phase>,
    hero: String,
    changed: bool,
    prev_bets: usize,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            current: None,
            previous: None,
            hand: 1,
            history: VecDeque::new(),
            hero: String::new(),
            changed: false,
            prev_bets: 0,
        }
    }

    /// Fold one cycle of detections into the tracked state.
    pub fn advance(&mut self, obs: &Observations) {
        self.previous = self.current.clone();
        if !obs.any(Label::Table) {
            if self.current.is_some() {
                log::debug!("table out of frame, suspending state");
            }
            self.current = None;
            self.changed = false;
            return;
        }
        let mut street = self.street_of(obs);
        // two turn highlights at once is a transition frame, not a table
        if obs.count(Label::TurnMarker) > 1 {
            street = Street::Waiting;
        }
        if street == Street::Waiting {
            self.finish();
            self.changed = false;
            return;
        }
        // streets never run backwards within a hand
        if let Some(cur) = self.current.as_ref() {
            if let (Some(old), Some(new)) = (cur.street.index(), street.index()) {
                if new < old {
                    log::debug!("ignoring street regression {} -> {}", cur.street, street);
                    street = cur.street;
                }
            }
        }
        let mut phase = match self.current.take() {
            Some(cur) if cur.street == street => cur,
            Some(cur) if cur.street == Street::Waiting => Phase::new(street),
            Some(cur) => {
                log::info!("hand {}: street {} -> {}", self.hand, cur.street, street);
                carry(cur, street)
            }
            None => Phase::new(street),
        };
        if phase.street == Street::Preflop {
            blinds(&mut phase, obs);
            phase.ante = obs.any(Label::PotCarry);
        }
        self.seats(&mut phase, obs);
        let actives = phase
            .players
            .values()
            .filter(|p| p.status == Status::Active)
            .count();
        if (phase.street == Street::Preflop || !phase.seated) && actives >= 2 {
            let button = obs.first(Label::DealerButton).map(|d| d.zone.center());
            position::assign(&mut phase, button);
        }
        pots(&mut phase, obs);
        board(&mut phase, obs);
        let bets = phase.players.values().filter(|p| p.bet > 0.0).count();
        let mut changed = bets != self.prev_bets
            || self.previous.as_ref().map(|p| p.street) != Some(phase.street);
        self.prev_bets = bets;
        changed |= infer::detect(&mut phase, obs);
        phase.collapse();
        if changed {
            log::debug!("hand {} {}: {}", self.hand, phase.street, phase.history());
        }
        self.changed = changed;
        self.current = Some(phase);
    }

    /// First street marker present, in forward street order; no marker
    /// keeps the current street (or Waiting if there is no hand yet).
    fn street_of(&self, obs: &Observations) -> Street {
        [
            Label::Preflop,
            Label::Flop,
            Label::Turn,
            Label::River,
            Label::Showdown,
            Label::Waiting,
        ]
        .into_iter()
        .filter(|marker| obs.any(*marker))
        .find_map(|marker| marker.street())
        .unwrap_or_else(|| {
            self.current
                .as_ref()
                .map(|p| p.street)
                .unwrap_or(Street::Waiting)
        })
    }

    /// Archive a finished hand and park in the between-hands state.
    fn finish(&mut self) {
        if let Some(done) = self.current.take() {
            if done.street != Street::Waiting {
                log::info!("hand {} complete: {}", self.hand, done.history());
                if self.history.len() == crate::HISTORY_LIMIT {
                    self.history.pop_front();
                }
                self.history.push_back(done);
                self.hand += 1;
            }
        }
        self.current = Some(Phase::new(Street::Waiting));
        self.prev_bets = 0;
    }

    /// Re-identify every visible seat and refresh its readouts.
    fn seats(&mut self, phase: &mut Phase, obs: &Observations) {
        let mut claimed: Vec<Zone> = vec![];
        for &(label, status) in Label::seats() {
            for det in obs.get(label) {
                // hero-first priority: a frame already claimed by an
                // earlier label does not demote the seat
                if claimed
                    .iter()
                    .any(|z| z.distance(&det.zone) < crate::MATCH_RADIUS)
                {
                    continue;
                }
                claimed.push(det.zone);
                let name = identify(phase, det, obs);
                let player = phase
                    .players
                    .entry(name.clone())
                    .or_insert_with(|| Player::new(&name));
                player.flip();
                player.zone = det.zone;
                player.status = status;
                player.hero = label == Label::SeatHero;
                if player.hero {
                    self.hero = name.clone();
                }
                for readout in obs.get(Label::Stack) {
                    if det.zone.contains(&readout.zone, crate::CONTAINMENT) {
                        if text::shoved(readout.text()) {
                            player.shoved = true;
                            player.stack = 0.0;
                            player.stack_bb = 0.0;
                        } else if let Some(v) = text::money(readout.text()) {
                            player.stack = v;
                            player.stack_bb = norm(v, phase.bb);
                        }
                        break;
                    }
                }
                player.bet = 0.0;
                player.bet_bb = 0.0;
                let mut best = f64::INFINITY;
                for marker in obs.get(Label::Bet) {
                    let d = det.zone.distance(&marker.zone);
                    if d < best && d < crate::BET_RADIUS {
                        if let Some(v) = text::money(marker.text()) {
                            best = d;
                            player.bet = v;
                            player.bet_bb = norm(v, phase.bb);
                        }
                    }
                }
                player.turn = obs
                    .get(Label::TurnMarker)
                    .iter()
                    .any(|t| t.zone.iou(&det.zone) > crate::TURN_IOU);
                if player.hero {
                    let boxes = obs
                        .get(Label::HoleCard)
                        .iter()
                        .filter(|c| det.zone.contains(&c.zone, crate::CARD_CONTAINMENT))
                        .collect::<Vec<_>>();
                    let cards = assemble(&boxes, obs);
                    if !cards.is_empty() {
                        player.absorb(cards);
                    }
                }
            }
        }
        phase.seats = phase
            .players
            .values()
            .filter(|p| p.status != Status::Away)
            .count();
    }

    pub fn phase(&self) -> Option<&Phase> {
        self.current.as_ref()
    }
    pub fn hand(&self) -> usize {
        self.hand
    }
    pub fn hero_name(&self) -> &str {
        &self.hero
    }
    pub fn hero(&self) -> Option<&Player> {
        self.current
            .as_ref()
            .and_then(|p| p.players.values().find(|p| p.hero))
    }
    pub fn has_hero(&self) -> bool {
        self.hero().is_some()
    }
    pub fn is_hero_turn(&self) -> bool {
        self.hero().map(|p| p.turn).unwrap_or(false)
    }
    /// Whether anything new was credited this cycle; reading resets it.
    pub fn take_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }
    /// Whether a displayed recommendation should be withdrawn: the
    /// table or hero vanished, or betting ended in an all-in.
    pub fn should_clear(&self) -> bool {
        let Some(phase) = self.current.as_ref() else {
            return true;
        };
        if !self.has_hero() {
            return true;
        }
        phase.actions.iter().any(|e| e.action == Action::AllIn)
    }

    /// Export the tracked state for the overlay or a post-mortem dump.
    /// The infoset key is pre-flop-keyed here; the decision path builds
    /// its own with the oracle consulted.
    pub fn snapshot(&self) -> Option<Snapshot> {
        let phase = self.current.as_ref()?;
        let infoset = self.hero().map(|hero| infoset::key(phase, hero, None));
        Some(Snapshot {
            hand: self.hand,
            street: phase.street.to_string(),
            pot: phase.pot,
            pot_bb: phase.pot_bb,
            carry: phase.carry,
            carry_bb: phase.carry_bb,
            sb: phase.sb,
            bb: phase.bb,
            board: phase.board.iter().map(Card::to_string).collect(),
            players: phase
                .players
                .values()
                .map(|p| PlayerSummary {
                    name: p.name.clone(),
                    stack: p.stack,
                    stack_bb: p.stack_bb,
                    bet: p.bet,
                    bet_bb: p.bet_bb,
                    position: p.position.map(|x| x.to_string()),
                    status: p.status.to_string(),
                    cards: p.cards.iter().map(Card::to_string).collect(),
                    hero: p.hero,
                    turn: p.turn,
                    last: p.last.map(|a| a.to_string()),
                })
                .collect(),
            actions: phase.history(),
            infoset,
        })
    }
}

/// Start the next street, keeping what survives a street change.
fn carry(mut done: Phase, street: Street) -> Phase {
    let mut next = Phase::new(street);
    next.sb = done.sb;
    next.bb = done.bb;
    next.ante = done.ante;
    next.dealer = done.dealer;
    next.seated = done.seated;
    next.seats = done.seats;
    next.carry = done.carry;
    next.carry_bb = done.carry_bb;
    next.absorb(done.community().to_vec());
    for (name, mut player) in std::mem::take(&mut done.players) {
        player.last = None;
        player.bet = 0.0;
        player.bet_bb = 0.0;
        player.prev_bet = 0.0;
        player.prev_bet_bb = 0.0;
        player.shoved = false;
        next.players.insert(name, player);
    }
    next
}

/// Read the blinds off the posted bets while pre-flop. Two or more
/// amounts give both blinds outright; a lone amount refreshes whichever
/// blind it sits closer to.
fn blinds(phase: &mut Phase, obs: &Observations) {
    let mut amounts = obs
        .get(Label::Bet)
        .iter()
        .filter_map(|d| text::money(d.text()))
        .filter(|v| *v > 0.0)
        .collect::<Vec<_>>();
    amounts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    amounts.dedup();
    match amounts.len() {
        0 => {}
        1 => {
            let v = amounts[0];
            if (v - phase.sb).abs() <= (v - phase.bb).abs() {
                phase.sb = v;
            } else {
                phase.bb = v;
            }
        }
        _ => {
            phase.sb = amounts[0];
            phase.bb = amounts[1];
        }
    }
    if phase.bb < crate::BB_FLOOR {
        phase.bb = crate::DEFAULT_BB;
    }
}

/// Normalize a currency amount to big blinds.
fn norm(v: Chips, bb: Chips) -> f64 {
    if bb > 0.0 { crate::round2(v / bb) } else { 0.0 }
}

/// Resolve a seat frame to a player name: spatial match against known
/// players first, then a name readout inside the frame, then a stable
/// placeholder.
fn identify(phase: &Phase, det: &Detection, obs: &Observations) -> String {
    for (name, player) in phase.players.iter() {
        if player.zone.distance(&det.zone) < crate::MATCH_RADIUS {
            return name.clone();
        }
    }
    for tag in obs.get(Label::PlayerName) {
        if det.zone.contains(&tag.zone, crate::CONTAINMENT) {
            let read = text::name(tag.text());
            if !read.is_empty() {
                return read;
            }
        }
    }
    // no name read: a placeholder derived from the frame position is
    // stable enough for the spatial matcher to pick up next cycle
    let (cx, cy) = det.zone.center();
    format!("Seat_{}_{}", cx.round() as i64, cy.round() as i64)
}

fn pots(phase: &mut Phase, obs: &Observations) {
    if let Some(det) = obs.first(Label::Pot) {
        if let Some(v) = text::pot(det.text()) {
            phase.pot = v;
            phase.pot_bb = norm(v, phase.bb);
        }
    }
    if let Some(det) = obs.first(Label::PotCarry) {
        if let Some(v) = text::pot(det.text()) {
            phase.carry = v;
            phase.carry_bb = norm(v, phase.bb);
        }
    }
}

/// Merge observed board cards into the hand-long union, then display
/// exactly what the street can legally show.
fn board(phase: &mut Phase, obs: &Observations) {
    let boxes = obs
        .get(Label::BoardCard)
        .iter()
        .chain(obs.get(Label::ShowdownCard).iter())
        .collect::<Vec<_>>();
    let observed = assemble(&boxes, obs);
    if !observed.is_empty() {
        phase.absorb(observed);
    }
    phase.board = match phase.street.n_observed() {
        Some(n) => phase.community().iter().take(n).copied().collect(),
        None if phase.street == Street::Showdown => phase.community().to_vec(),
        None => vec![],
    };
}

/// Pair rank glyphs with suit glyphs inside card boxes. A box missing
/// either half yields nothing rather than a guess.
fn assemble(boxes: &[&Detection], obs: &Observations) -> Vec<Card> {
    let mut cards = vec![];
    for cardbox in boxes {
        let rank = obs
            .get(Label::CardValue)
            .iter()
            .filter(|v| cardbox.zone.contains(&v.zone, crate::CONTAINMENT))
            .find_map(|v| text::rank(v.text()));
        let suit = Label::suits()
            .iter()
            .find(|l| {
                obs.get(**l)
                    .iter()
                    .any(|s| cardbox.zone.contains(&s.zone, crate::CONTAINMENT))
            })
            .and_then(|l| l.suit());
        if let (Some(rank), Some(suit)) = (rank, suit) {
            cards.push(Card::new(rank, suit));
        }
    }
    cards.sort();
    cards.dedup();
    cards
}

/// Serializable view of the tracked state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub hand: usize,
    pub street: String,
    pub pot: Chips,
    pub pot_bb: f64,
    pub carry: Chips,
    pub carry_bb: f64,
    pub sb: Chips,
    pub bb: Chips,
    pub board: Vec<String>,
    pub players: Vec<PlayerSummary>,
    pub actions: String,
    pub infoset: Option<String>,
}

impl Snapshot {
    /// JSON form for the outbound queue and post-mortem dumps.
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub stack: Chips,
    pub stack_bb: f64,
    pub bet: Chips,
    pub bet_bb: f64,
    pub position: Option<String>,
    pub status: String,
    pub cards: Vec<String>,
    pub hero: bool,
    pub turn: bool,
    pub last: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Detection> {
        vec![Detection::new(Label::Table, Zone::new(0.0, 0.0, 1000.0, 700.0))]
    }

    fn marker(label: Label) -> Detection {
        Detection::new(label, Zone::new(480.0, 10.0, 520.0, 30.0))
    }

    fn cycle(extra: Vec<Detection>) -> Observations {
        let mut all = table();
        all.extend(extra);
        Observations::from(all)
    }

    #[test]
    fn no_table_suspends() {
        let mut state = GameState::new();
        state.advance(&cycle(vec![marker(Label::Flop)]));
        assert!(state.phase().is_some());
        state.advance(&Observations::from(vec![marker(Label::Flop)]));
        assert!(state.phase().is_none());
        assert!(state.should_clear());
    }

    #[test]
    fn streets_never_regress() {
        let mut state = GameState::new();
        state.advance(&cycle(vec![marker(Label::Turn)]));
        assert_eq!(state.phase().unwrap().street, Street::Turn);
        state.advance(&cycle(vec![marker(Label::Flop)]));
        assert_eq!(state.phase().unwrap().street, Street::Turn);
        state.advance(&cycle(vec![marker(Label::River)]));
        assert_eq!(state.phase().unwrap().street, Street::River);
    }

    #[test]
    fn waiting_archives_the_hand() {
        let mut state = GameState::new();
        state.advance(&cycle(vec![marker(Label::Flop)]));
        assert_eq!(state.hand(), 1);
        state.advance(&cycle(vec![marker(Label::Waiting)]));
        assert_eq!(state.phase().unwrap().street, Street::Waiting);
        assert_eq!(state.hand(), 2);
        // the next pre-flop starts clean
        state.advance(&cycle(vec![marker(Label::Preflop)]));
        assert_eq!(state.phase().unwrap().street, Street::Preflop);
        assert!(state.phase().unwrap().players.is_empty());
    }

    #[test]
    fn doubled_turn_marker_reads_as_waiting() {
        let mut state = GameState::new();
        state.advance(&cycle(vec![
            marker(Label::Flop),
            Detection::new(Label::TurnMarker, Zone::new(0.0, 0.0, 10.0, 10.0)),
            Detection::new(Label::TurnMarker, Zone::new(500.0, 0.0, 510.0, 10.0)),
        ]));
        assert_eq!(state.phase().unwrap().street, Street::Waiting);
    }

    #[test]
    fn hero_seat_and_cards() {
        let seat = Zone::new(400.0, 500.0, 600.0, 650.0);
        let mut state = GameState::new();
        state.advance(&cycle(vec![
            marker(Label::Preflop),
            Detection::new(Label::SeatHero, seat),
            Detection::with_text(Label::PlayerName, Zone::new(450.0, 510.0, 550.0, 530.0), "Hero99"),
            Detection::new(Label::HoleCard, Zone::new(420.0, 540.0, 460.0, 600.0)),
            Detection::with_text(Label::CardValue, Zone::new(425.0, 545.0, 440.0, 560.0), "A"),
            Detection::new(Label::Hearts, Zone::new(425.0, 565.0, 440.0, 580.0)),
        ]));
        assert_eq!(state.hero_name(), "Hero99");
        let hero = state.hero().unwrap();
        assert_eq!(hero.hole(), &[Card::parse("Ah").unwrap()]);
        assert!(state.has_hero());
    }

    #[test]
    fn seat_identity_survives_bad_name_read() {
        let seat = Zone::new(400.0, 500.0, 600.0, 650.0);
        let mut state = GameState::new();
        state.advance(&cycle(vec![
            marker(Label::Flop),
            Detection::new(Label::SeatActive, seat),
            Detection::with_text(Label::PlayerName, Zone::new(450.0, 510.0, 550.0, 530.0), "Alice"),
        ]));
        // next cycle the name is garbage, but the frame barely moved
        state.advance(&cycle(vec![
            marker(Label::Flop),
            Detection::new(Label::SeatActive, Zone::new(405.0, 502.0, 605.0, 652.0)),
        ]));
        let phase = state.phase().unwrap();
        assert_eq!(phase.players.len(), 1);
        assert!(phase.players.contains_key("Alice"));
    }

    #[test]
    fn blinds_from_posted_bets() {
        let mut state = GameState::new();
        state.advance(&cycle(vec![
            marker(Label::Preflop),
            Detection::with_text(Label::Bet, Zone::new(100.0, 100.0, 120.0, 110.0), "$0.25"),
            Detection::with_text(Label::Bet, Zone::new(300.0, 100.0, 320.0, 110.0), "$0.50"),
        ]));
        let phase = state.phase().unwrap();
        assert_eq!(phase.sb, 0.25);
        assert_eq!(phase.bb, 0.50);
    }

    #[test]
    fn board_is_truncated_to_street() {
        let mut cards = vec![marker(Label::Flop)];
        let glyphs = [
            ("7", Label::Hearts),
            ("8", Label::Diamonds),
            ("9", Label::Spades),
            ("T", Label::Clubs),
        ];
        for (i, &(rank, suit)) in glyphs.iter().enumerate() {
            let x = 300.0 + i as f64 * 60.0;
            cards.push(Detection::new(Label::BoardCard, Zone::new(x, 300.0, x + 50.0, 370.0)));
            cards.push(Detection::with_text(
                Label::CardValue,
                Zone::new(x + 5.0, 305.0, x + 20.0, 320.0),
                rank,
            ));
            cards.push(Detection::new(suit, Zone::new(x + 5.0, 325.0, x + 20.0, 340.0)));
        }
        let mut state = GameState::new();
        state.advance(&cycle(cards));
        let phase = state.phase().unwrap();
        // four cards observed, only three legal on the flop
        assert_eq!(phase.community().len(), 4);
        assert_eq!(phase.board.len(), 3);
    }

    #[test]
    fn all_in_means_clear() {
        let mut state = GameState::new();
        let seat = Zone::new(400.0, 500.0, 600.0, 650.0);
        state.advance(&cycle(vec![
            marker(Label::Flop),
            Detection::new(Label::SeatHero, seat),
            Detection::with_text(Label::PlayerName, Zone::new(450.0, 510.0, 550.0, 530.0), "Hero"),
        ]));
        assert!(!state.should_clear());
        if let Some(phase) = state.current.as_mut() {
            phase.record("villain", Action::AllIn, 50.0);
        }
        assert!(state.should_clear());
    }
}

use super::action::Action;
use super::infer;
use super::phase::Phase;
use super::phase::Street;
use super::player::Player;
use super::player::Status;
use super::position;
use crate::Chips;
use crate::decide::infoset;
use crate::cards::card::Card;
use crate::vision::detection::Detection;
use crate::vision::detection::Observations;
use crate::vision::label::Label;
use crate::vision::text;
use crate::vision::zone::Zone;
use serde::Deserialize;
use serde::Serialize;
use std::collections::VecDeque;
