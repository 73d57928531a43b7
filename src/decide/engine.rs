//! The decision engine: one immutable set of tables loaded at startup,
//! queried once per hero turn. Lookups that miss, tables that never
//! loaded, and labels we cannot parse all degrade to the same safe
//! fallback; nothing on this path is allowed to fail outward.

pub struct Engine {
    tables: Tables,
}

impl Engine {
    pub fn new(tables: Tables) -> Self {
        Self { tables }
    }

    pub fn from_dir(dir: &Path) -> Result<Self, TableError> {
        Ok(Self::new(loader::load_dir(dir)?))
    }

    pub fn tables(&self) -> &Tables {
        &self.tables
    }

    /// Advise the hero at the current decision point. None only when no
    /// hero seat is tracked at all.
    pub fn advise(&self, phase: &Phase, oracle: Option<&dyn Oracle>) -> Option<Recommendation> {
        let hero = phase.players.values().find(|p| p.hero)?;
        let infoset = infoset::key(phase, hero, oracle);
        let seats = phase
            .players
            .values()
            .filter(|p| p.status == Status::Active)
            .count()
            .max(2);
        let entries = self.tables.resolve(seats).and_then(|t| t.lookup(&infoset));
        let rival = rivals(phase);
        let to_call = (rival - hero.bet_bb).max(0.0);
        let (action, probability, found) = match entries {
            None | Some([]) => {
                log::debug!("no strategy for {}, safe fallback", infoset);
                let safe = if to_call > 0.0 { Action::Fold } else { Action::Check };
                (safe, 0.0, false)
            }
            Some(entries) => select(entries),
        };
        let mut rec = Recommendation::new(action, probability, found, infoset, phase.street);
        if let Action::Raise(kind) = action {
            let bb = size(phase, hero, kind);
            rec = rec.sized(crate::round2(bb * phase.bb), bb);
        }
        log::info!("advice: {} [{}]", rec, rec.infoset);
        Some(rec)
    }
}

/// Pick from a non-empty node: the heaviest non-negative cumulative
/// strategy weight, or the least-regretted action when the trainer
/// never accumulated weight here.
fn select(entries: &[Entry]) -> (Action, Probability, bool) {
    let total = entries.iter().map(|e| e.weight.max(0.0)).sum::<f64>();
    let chosen = if total <= 1e-9 {
        entries
            .iter()
            .min_by(|a, b| a.regret.partial_cmp(&b.regret).unwrap_or(std::cmp::Ordering::Equal))
    } else {
        entries
            .iter()
            .filter(|e| e.weight >= 0.0)
            .max_by(|a, b| a.weight.partial_cmp(&b.weight).unwrap_or(std::cmp::Ordering::Equal))
    };
    let Some(chosen) = chosen else {
        return (Action::Fold, 0.0, false);
    };
    let Ok(action) = chosen.action.parse::<Action>() else {
        log::warn!("unknown action label in table: {:?}", chosen.action);
        return (Action::Fold, 0.0, false);
    };
    let probability = if total <= 1e-9 { 0.0 } else { chosen.weight / total };
    (action, probability, true)
}

/// Largest opposing current bet, in BB.
fn rivals(phase: &Phase) -> f64 {
    phase
        .players
        .values()
        .filter(|p| !p.hero)
        .map(|p| p.bet_bb)
        .fold(0.0, f64::max)
}

/// Raise-to amount in BB for a chosen sizing family. An amount past the
/// hero's effective stack is the stack, full stop; only amounts the
/// hero can actually cover get lifted to the legal minimum.
fn size(phase: &Phase, hero: &Player, kind: Raise) -> f64 {
    let rival = rivals(phase);
    let to_call = (rival - hero.bet_bb).max(0.0);
    let mut target = match kind {
        Raise::Min => {
            let mut bets = phase
                .players
                .values()
                .map(|p| p.bet_bb)
                .filter(|b| *b > 0.0)
                .collect::<Vec<_>>();
            bets.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
            let increment = match bets.as_slice() {
                [first, second, ..] => (first - second).max(1.0),
                _ => 1.0,
            };
            rival + increment
        }
        Raise::X2 => {
            if rival > 0.0 {
                rival * 2.0
            } else {
                2.0
            }
        }
        Raise::X3 => {
            if rival > 0.0 {
                rival * 3.0
            } else {
                3.0
            }
        }
        Raise::Pct(pct) => {
            let effective = phase.pot_bb
                + phase.carry_bb
                + phase
                    .players
                    .values()
                    .filter(|p| !p.hero)
                    .map(|p| p.bet_bb)
                    .sum::<f64>();
            to_call + effective * (pct as f64 / 100.0)
        }
    };
    let stack = hero.stack_bb + hero.bet_bb;
    if stack > 0.0 && target > stack {
        return crate::round2(stack);
    }
    let floor = (rival + 1.0).max(2.0);
    if target < floor {
        target = floor;
    }
    crate::round2(target)
}


use super::infoset;
use super::recommendation::Recommendation;
use crate::Probability;
use crate::cards::category::Oracle;
use crate::gameplay::action::Action;
use crate::gameplay::action::Raise;
use crate::gameplay::phase::Phase;
use crate::gameplay::player::Player;
use crate::gameplay::player::Status;
use crate::strategy::error::TableError;
use crate::strategy::loader;
use crate::strategy::table::Entry;
use crate::strategy::table::Tables;
use std::path::Path;
