//! Per-cycle action inference: a de-duplication layer over the street's
//! append-only event log. Detections are sampled independently each
//! frame, so the same gesture shows up again and again; everything here
//! is about crediting each voluntary action exactly once.

/// Run one cycle of inference against the current phase. Returns whether
/// anything new was credited.
pub fn detect(phase: &mut Phase, obs: &Observations) -> bool {
    // posted blinds are not voluntary actions: while pre-flop shows at
    // most two bets, no recorded events, and no action glyphs, hold off
    if blinds_only(phase) && phase.actions.is_empty() && !obs.any(Label::ActionTag) {
        log::debug!("pre-flop blinds only, waiting for a first real action");
        return false;
    }
    phase.pot_before = phase.pot;
    phase.pot_before_bb = phase.pot_bb;
    let mut changed = false;
    changed |= tagged(phase, obs);
    changed |= deltas(phase, obs);
    changed |= folded(phase);
    changed |= shoves(phase);
    changed
}

/// Pre-flop with at most the two blinds posted.
fn blinds_only(phase: &Phase) -> bool {
    phase.street == Street::Preflop
        && phase.players.values().filter(|p| p.bet > 0.0).count() <= 2
}

/// Whether this exact action was already credited. All-In is terminal
/// for betting, so it is checked against the whole street; everything
/// else only against a short trailing window.
fn recorded(phase: &Phase, name: &str, action: Action) -> bool {
    match action {
        Action::AllIn => phase
            .actions
            .iter()
            .any(|e| e.player == name && e.action == Action::AllIn),
        _ => phase
            .actions
            .iter()
            .rev()
            .take(crate::DUPLICATE_WINDOW)
            .any(|e| e.player == name && e.action == action),
    }
}

/// Whether any raise variant was recently credited to this player.
fn recorded_raise(phase: &Phase, name: &str) -> bool {
    phase
        .actions
        .iter()
        .rev()
        .take(crate::DUPLICATE_WINDOW)
        .any(|e| e.player == name && e.action.is_raise())
}

/// Step 1: action glyphs the detector read outright.
fn tagged(phase: &mut Phase, obs: &Observations) -> bool {
    let mut changed = false;
    for det in obs.get(Label::ActionTag) {
        let mut nearest: Option<String> = None;
        let mut best = f64::INFINITY;
        for (name, player) in phase.players.iter() {
            if player.zone.contains(&det.zone, crate::TAG_CONTAINMENT) {
                nearest = Some(name.clone());
                break;
            }
            let distance = player.zone.distance(&det.zone);
            if distance < best && distance < crate::ACTION_RADIUS {
                best = distance;
                nearest = Some(name.clone());
            }
        }
        let Some(name) = nearest else { continue };
        let Some(cue) = text::cue(det.text()) else {
            continue;
        };
        log::debug!("action glyph near {}: {:?}", name, cue);
        changed |= apply(phase, &name, cue, obs);
    }
    changed
}

/// Credit one cued action, subject to the duplicate windows.
fn apply(phase: &mut Phase, name: &str, cue: Cue, obs: &Observations) -> bool {
    let Some(bet) = phase.players.get(name).map(|p| p.bet) else {
        return false;
    };
    let action = match cue {
        Cue::Fold => Action::Fold,
        Cue::Check => Action::Check,
        Cue::Call => Action::Call,
        Cue::AllIn => Action::AllIn,
        Cue::Raise(Some(kind)) => Action::Raise(kind),
        Cue::Raise(None) if bet > 0.0 => classify(phase, name, Some(obs)),
        Cue::Raise(None) => Action::Raise(Raise::Min),
    };
    let duplicate = match action {
        a if a.is_raise() => recorded_raise(phase, name),
        a => recorded(phase, name, a),
    };
    if duplicate {
        return false;
    }
    let amount = match cue {
        Cue::Raise(None) if bet <= 0.0 => 0.0,
        Cue::Fold => 0.0,
        _ => bet,
    };
    credit(phase, name, action, amount);
    true
}

/// Step 2: bets that moved without a legible glyph.
fn deltas(phase: &mut Phase, obs: &Observations) -> bool {
    // pre-flop with two or fewer live bets, everything visible is blinds
    if blinds_only(phase) {
        return false;
    }
    let names = phase.players.keys().cloned().collect::<Vec<_>>();
    let mut changed = false;
    for name in names {
        let player = &phase.players[&name];
        if player.hero {
            continue;
        }
        if (player.bet_bb - player.prev_bet_bb).abs() <= crate::BET_EPSILON {
            continue;
        }
        let (bet, bet_bb) = (player.bet, player.bet_bb);
        let exhausted = player.stack_bb < crate::SHOVE_FLOOR || player.shoved;
        let rivals = phase
            .players
            .iter()
            .filter(|(n, p)| **n != name && p.bet_bb > 0.0)
            .map(|(_, p)| p.bet_bb)
            .fold(0.0, f64::max);
        if exhausted {
            if !recorded(phase, &name, Action::AllIn) {
                credit(phase, &name, Action::AllIn, bet);
                log::debug!("{} is all-in by bet", name);
                changed = true;
            }
            continue;
        }
        if recorded(phase, &name, Action::Call) || recorded_raise(phase, &name) {
            continue;
        }
        if (bet_bb - rivals).abs() < crate::CALL_EPSILON {
            credit(phase, &name, Action::Call, bet);
            log::debug!("{} called {:.2} BB", name, bet_bb);
            changed = true;
        } else if bet_bb > rivals {
            let action = classify(phase, &name, Some(obs));
            credit(phase, &name, action, bet);
            log::debug!("{} raised to {:.2} BB as {}", name, bet_bb, action);
            changed = true;
        }
    }
    changed
}

/// Step 3: a seat that went from active to idle folded, even if the
/// fold glyph was never legible.
fn folded(phase: &mut Phase) -> bool {
    // without a recorded action pre-flop, an idle seat is just a seat
    // that was never in the hand
    if phase.street == Street::Preflop && phase.actions.is_empty() {
        return false;
    }
    let names = phase.players.keys().cloned().collect::<Vec<_>>();
    let mut changed = false;
    for name in names {
        let player = &phase.players[&name];
        if player.hero {
            continue;
        }
        if player.prev_status == Status::Active
            && player.status == Status::Idle
            && !recorded(phase, &name, Action::Fold)
        {
            credit(phase, &name, Action::Fold, 0.0);
            log::debug!("{} folded out of the frame", name);
            changed = true;
        }
    }
    changed
}

/// Step 4: exhausted stacks with a live bet are all-in whether or not
/// any glyph said so.
fn shoves(phase: &mut Phase) -> bool {
    if blinds_only(phase) && phase.actions.is_empty() {
        return false;
    }
    let names = phase.players.keys().cloned().collect::<Vec<_>>();
    let mut changed = false;
    for name in names {
        let player = &phase.players[&name];
        if player.status != Status::Active {
            continue;
        }
        if (player.stack_bb < crate::SHOVE_FLOOR || player.shoved)
            && player.bet_bb > 0.0
            && !recorded(phase, &name, Action::AllIn)
        {
            let bet = player.bet;
            credit(phase, &name, Action::AllIn, bet);
            log::debug!("{} is all-in by stack", name);
            changed = true;
        }
    }
    changed
}

fn credit(phase: &mut Phase, name: &str, action: Action, amount: Chips) {
    phase.record(name, action, amount);
    if let Some(player) = phase.players.get_mut(name) {
        player.last = Some(action);
        if action == Action::AllIn {
            player.shoved = true;
        }
    }
}

/// Classify a raise into its sizing family. Band thresholds are the
/// ones the strategy tables were generated against; do not re-derive.
pub fn classify(phase: &Phase, name: &str, obs: Option<&Observations>) -> Action {
    let Some(player) = phase.players.get(name) else {
        return Action::Raise(Raise::Min);
    };
    let new_bb = player.bet_bb;
    let rivals = phase
        .players
        .iter()
        .filter(|(n, p)| n.as_str() != name && p.bet_bb > 0.0)
        .map(|(_, p)| p.bet_bb)
        .fold(0.0, f64::max);
    let increment = new_bb - rivals;
    if player.stack_bb < crate::SHOVE_FLOOR || player.shoved {
        return Action::AllIn;
    }
    if let Some(obs) = obs {
        for det in obs.get(Label::ActionTag) {
            if player.zone.contains(&det.zone, crate::CONTAINMENT)
                && det.text().to_lowercase().contains("all")
            {
                return Action::AllIn;
            }
        }
    }
    if increment < crate::SHOVE_FLOOR {
        return Action::Call;
    }
    let opened = phase.actions.iter().any(|e| e.action.is_raise());
    // pre-flop opens have their own conventions over the bare blind
    if phase.street == Street::Preflop && !opened && rivals <= 1.0 {
        if (1.8..=2.5).contains(&new_bb) {
            return Action::Raise(Raise::Min);
        }
        if new_bb > 2.5 && new_bb <= 3.5 {
            return Action::Raise(Raise::X3);
        }
    }
    for prior in phase.raises.iter().rev() {
        if prior.amount_bb > 0.0 {
            let ratio = new_bb / prior.amount_bb;
            if (1.8..=2.2).contains(&ratio) {
                return Action::Raise(Raise::X2);
            }
            if (2.7..=3.3).contains(&ratio) {
                return Action::Raise(Raise::X3);
            }
        }
    }
    if phase.street == Street::Preflop && !opened && (new_bb - 2.0).abs() < 0.3 {
        return Action::Raise(Raise::Min);
    }
    if !phase.raises.is_empty() {
        let min_to = if phase.raises.len() >= 2 {
            let last = phase.raises[phase.raises.len() - 1].amount_bb;
            let prior = phase.raises[phase.raises.len() - 2].amount_bb;
            rivals + (last - prior).max(1.0)
        } else {
            rivals + 1.0
        };
        if (new_bb - min_to).abs() < 0.3 {
            return Action::Raise(Raise::Min);
        }
    }
    let mut pot_before = phase.pot_before_bb;
    if pot_before <= 0.0 {
        pot_before = phase.pot_bb + phase.carry_bb;
        for (n, p) in phase.players.iter() {
            if n.as_str() != name {
                pot_before += p.bet_bb;
            }
        }
    }
    if pot_before > 0.0 {
        let ratio = increment / pot_before;
        let pct = if ratio < 0.4 {
            33
        } else if ratio < 0.6 {
            50
        } else if ratio < 0.85 {
            75
        } else if ratio < 1.2 {
            100
        } else if ratio < 1.7 {
            150
        } else if ratio < 2.2 {
            200
        } else if ratio < 2.7 {
            250
        } else {
            300
        };
        return Action::Raise(Raise::Pct(pct));
    }
    Action::Raise(Raise::Min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::player::Player;
    use crate::vision::detection::Detection;
    use crate::vision::zone::Zone;

    fn seat(phase: &mut Phase, name: &str, bet_bb: f64, prev_bet_bb: f64, stack_bb: f64) {
        let mut player = Player::new(name);
        player.status = Status::Active;
        player.bet = bet_bb * phase.bb;
        player.bet_bb = bet_bb;
        player.prev_bet_bb = prev_bet_bb;
        player.stack = stack_bb * phase.bb;
        player.stack_bb = stack_bb;
        player.zone = Zone::new(0.0, 0.0, 50.0, 50.0);
        phase.players.insert(name.to_string(), player);
    }

    fn nothing() -> Observations {
        Observations::from(vec![])
    }

    #[test]
    fn delta_within_tolerance_is_call() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "hero", 2.1, 2.1, 100.0);
        phase.players.get_mut("hero").unwrap().hero = true;
        seat(&mut phase, "villain", 2.0, 0.0, 100.0);
        assert!(detect(&mut phase, &nothing()));
        assert_eq!(phase.players["villain"].last, Some(Action::Call));
    }

    #[test]
    fn delta_beyond_max_is_raise_never_both() {
        let mut phase = Phase::new(Street::Flop);
        phase.pot_bb = 10.0;
        phase.pot = 1.0;
        seat(&mut phase, "hero", 1.0, 1.0, 100.0);
        phase.players.get_mut("hero").unwrap().hero = true;
        seat(&mut phase, "villain", 6.0, 0.0, 100.0);
        assert!(detect(&mut phase, &nothing()));
        let credited = phase
            .actions
            .iter()
            .filter(|e| e.player == "villain")
            .collect::<Vec<_>>();
        assert_eq!(credited.len(), 1);
        assert!(credited[0].action.is_raise());
    }

    #[test]
    fn preflop_blinds_fire_nothing() {
        let mut phase = Phase::new(Street::Preflop);
        seat(&mut phase, "sb", 0.5, 0.0, 100.0);
        seat(&mut phase, "bb", 1.0, 0.0, 100.0);
        assert!(!detect(&mut phase, &nothing()));
        assert!(phase.actions.is_empty());
    }

    #[test]
    fn fold_by_disappearance() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "villain", 0.0, 0.0, 100.0);
        {
            let p = phase.players.get_mut("villain").unwrap();
            p.prev_status = Status::Active;
            p.status = Status::Idle;
        }
        assert!(detect(&mut phase, &nothing()));
        assert_eq!(phase.players["villain"].last, Some(Action::Fold));
        // second cycle in the same shape must not double-credit
        assert!(!detect(&mut phase, &nothing()));
    }

    #[test]
    fn shove_by_exhausted_stack() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "villain", 20.0, 20.0, 0.05);
        assert!(detect(&mut phase, &nothing()));
        assert_eq!(phase.players["villain"].last, Some(Action::AllIn));
        assert!(phase.players["villain"].shoved);
    }

    #[test]
    fn all_in_stays_terminal_past_the_window() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "villain", 20.0, 20.0, 0.05);
        seat(&mut phase, "a", 1.0, 1.0, 100.0);
        seat(&mut phase, "b", 1.0, 1.0, 100.0);
        assert!(detect(&mut phase, &nothing()));
        // four later events push the all-in out of the look-back window
        phase.record("a", Action::Call, 2.0);
        phase.record("b", Action::Call, 2.0);
        phase.record("a", Action::Check, 0.0);
        phase.record("b", Action::Check, 0.0);
        assert!(!detect(&mut phase, &nothing()));
        let shoves = phase
            .actions
            .iter()
            .filter(|e| e.player == "villain" && e.action == Action::AllIn)
            .count();
        assert_eq!(shoves, 1);
    }

    #[test]
    fn glyph_credits_nearest_seat_once() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "villain", 0.0, 0.0, 100.0);
        let glyph = Detection::with_text(Label::ActionTag, Zone::new(10.0, 10.0, 30.0, 20.0), "Fold");
        let obs = Observations::from(vec![glyph.clone()]);
        assert!(detect(&mut phase, &obs));
        assert_eq!(phase.players["villain"].last, Some(Action::Fold));
        let obs = Observations::from(vec![glyph]);
        assert!(!detect(&mut phase, &obs));
        assert_eq!(phase.actions.len(), 1);
    }

    #[test]
    fn classify_pot_ratio_bands() {
        let mut phase = Phase::new(Street::Flop);
        phase.pot_before_bb = 10.0;
        seat(&mut phase, "villain", 6.5, 0.0, 100.0);
        seat(&mut phase, "other", 1.0, 1.0, 100.0);
        // increment 5.5 over a 10 BB pot is a 55% raise
        assert_eq!(
            classify(&phase, "villain", None),
            Action::Raise(Raise::Pct(50))
        );
    }

    #[test]
    fn classify_bare_call() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "villain", 2.05, 0.0, 100.0);
        seat(&mut phase, "other", 2.0, 2.0, 100.0);
        assert_eq!(classify(&phase, "villain", None), Action::Call);
    }

    #[test]
    fn classify_preflop_open_families() {
        let mut phase = Phase::new(Street::Preflop);
        seat(&mut phase, "villain", 2.2, 0.0, 100.0);
        seat(&mut phase, "bb", 1.0, 1.0, 100.0);
        assert_eq!(
            classify(&phase, "villain", None),
            Action::Raise(Raise::Min)
        );
        phase.players.get_mut("villain").unwrap().bet_bb = 3.0;
        assert_eq!(classify(&phase, "villain", None), Action::Raise(Raise::X3));
    }

    #[test]
    fn classify_exhausted_stack_is_all_in() {
        let mut phase = Phase::new(Street::Flop);
        seat(&mut phase, "villain", 30.0, 0.0, 0.01);
        assert_eq!(classify(&phase, "villain", None), Action::AllIn);
    }
}

use super::action::Action;
use super::action::Cue;
use super::action::Raise;
use super::phase::Phase;
use super::phase::Street;
use super::player::Status;
use crate::Chips;
use crate::vision::detection::Observations;
use crate::vision::label::Label;
use crate::vision::text;
