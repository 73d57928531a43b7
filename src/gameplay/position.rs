/// Table positions, including the long-form aliases the text engine
/// sometimes reads off themed tables.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Position {
    Btn,
    Sb,
    Bb,
    #[default]
    Utg,
    Utg1,
    Utg2,
    Utg3,
    Lj,
    Hj,
    Co,
    Mp,
    Ep,
}

impl Position {
    /// Normalize a position readout; long forms collapse to their
    /// abbreviations and anything unrecognized defaults to UTG.
    pub fn from_alias(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "BTN" | "BUTTON" => Self::Btn,
            "SB" | "SMALL_BLIND" => Self::Sb,
            "BB" | "BIG_BLIND" => Self::Bb,
            "UTG" | "UNDER_THE_GUN" => Self::Utg,
            "UTG+1" => Self::Utg1,
            "UTG+2" => Self::Utg2,
            "UTG+3" => Self::Utg3,
            "LJ" | "LOJACK" => Self::Lj,
            "HJ" | "HIJACK" => Self::Hj,
            "CO" | "CUTOFF" => Self::Co,
            "MP" | "MIDDLE" => Self::Mp,
            "EP" | "EARLY" => Self::Ep,
            _ => Self::Utg,
        }
    }

    /// Seat labels in clockwise order from the dealer, per seat count.
    /// Heads-up is special-cased by the assigner (dealer posts SB).
    pub fn table(seats: usize) -> Option<&'static [Self]> {
        match seats {
            2 => Some(&[Self::Sb, Self::Bb]),
            3 => Some(&[Self::Btn, Self::Sb, Self::Bb]),
            4 => Some(&[Self::Btn, Self::Sb, Self::Bb, Self::Co]),
            5 => Some(&[Self::Btn, Self::Sb, Self::Bb, Self::Utg, Self::Co]),
            6 => Some(&[
                Self::Btn,
                Self::Sb,
                Self::Bb,
                Self::Utg,
                Self::Hj,
                Self::Co,
            ]),
            7 => Some(&[
                Self::Btn,
                Self::Sb,
                Self::Bb,
                Self::Utg,
                Self::Utg1,
                Self::Hj,
                Self::Co,
            ]),
            8 => Some(&[
                Self::Btn,
                Self::Sb,
                Self::Bb,
                Self::Utg,
                Self::Utg1,
                Self::Lj,
                Self::Hj,
                Self::Co,
            ]),
            9 => Some(&[
                Self::Btn,
                Self::Sb,
                Self::Bb,
                Self::Utg,
                Self::Utg1,
                Self::Utg2,
                Self::Lj,
                Self::Hj,
                Self::Co,
            ]),
            10 => Some(&[
                Self::Btn,
                Self::Sb,
                Self::Bb,
                Self::Utg,
                Self::Utg1,
                Self::Utg2,
                Self::Utg3,
                Self::Lj,
                Self::Hj,
                Self::Co,
            ]),
            _ => None,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Btn => "BTN",
                Self::Sb => "SB",
                Self::Bb => "BB",
                Self::Utg => "UTG",
                Self::Utg1 => "UTG+1",
                Self::Utg2 => "UTG+2",
                Self::Utg3 => "UTG+3",
                Self::Lj => "LJ",
                Self::Hj => "HJ",
                Self::Co => "CO",
                Self::Mp => "MP",
                Self::Ep => "EP",
            }
        )
    }
}

/// Assign seat positions once at least two active players are known.
/// Players are walked clockwise around the centroid; the dealer seat is
/// the one nearest the button marker (seat 0 when no marker is seen).
pub fn assign(phase: &mut Phase, button: Option<(f64, f64)>) {
    let actives = phase
        .players
        .values()
        .filter(|p| p.status == Status::Active)
        .map(|p| (p.name.clone(), p.zone.center()))
        .collect::<Vec<_>>();
    let n = actives.len();
    if n < 2 {
        return;
    }
    let Some(table) = Position::table(n) else {
        return;
    };
    let centers = actives.iter().map(|a| a.1).collect::<Vec<_>>();
    let order = zone::clockwise(&centers);
    let dealer = match button {
        Some((bx, by)) => order
            .iter()
            .enumerate()
            .min_by(|&(_, &a), &(_, &b)| {
                let da = (centers[a].0 - bx).hypot(centers[a].1 - by);
                let db = (centers[b].0 - bx).hypot(centers[b].1 - by);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
            .unwrap_or(0),
        None => 0,
    };
    phase.dealer = Some(dealer);
    for (i, &original) in order.iter().enumerate() {
        let name = &actives[original].0;
        let index = if n == 2 {
            if i == dealer { 0 } else { 1 }
        } else {
            (i + n - dealer) % n
        };
        if let Some(player) = phase.players.get_mut(name) {
            player.position = Some(table[index]);
            player.seat = Some(index);
        }
    }
    phase.seated = true;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::phase::Street;
    use crate::gameplay::player::Player;
    use crate::vision::zone::Zone;

    fn seated(names: &[(&str, f64, f64)]) -> Phase {
        let mut phase = Phase::new(Street::Preflop);
        for &(name, x, y) in names {
            let mut player = Player::new(name);
            player.status = Status::Active;
            player.zone = Zone::new(x - 10.0, y - 10.0, x + 10.0, y + 10.0);
            phase.players.insert(name.to_string(), player);
        }
        phase
    }

    #[test]
    fn aliases_collapse() {
        assert_eq!(Position::from_alias("button"), Position::Btn);
        assert_eq!(Position::from_alias(" CO "), Position::Co);
        assert_eq!(Position::from_alias("??"), Position::Utg);
    }

    #[test]
    fn heads_up_dealer_is_small_blind() {
        let mut phase = seated(&[("a", 0.0, 50.0), ("b", 100.0, 50.0)]);
        assign(&mut phase, Some((95.0, 50.0)));
        assert_eq!(phase.players["b"].position, Some(Position::Sb));
        assert_eq!(phase.players["a"].position, Some(Position::Bb));
        assert!(phase.seated);
    }

    #[test]
    fn six_max_walks_from_button() {
        // hexagon, clockwise on screen starting at three o'clock
        let mut phase = seated(&[
            ("p0", 200.0, 100.0),
            ("p1", 150.0, 187.0),
            ("p2", 50.0, 187.0),
            ("p3", 0.0, 100.0),
            ("p4", 50.0, 13.0),
            ("p5", 150.0, 13.0),
        ]);
        assign(&mut phase, Some((205.0, 100.0)));
        assert_eq!(phase.players["p0"].position, Some(Position::Btn));
        assert_eq!(phase.players["p1"].position, Some(Position::Sb));
        assert_eq!(phase.players["p2"].position, Some(Position::Bb));
        assert_eq!(phase.players["p5"].position, Some(Position::Co));
    }
}

use super::phase::Phase;
use super::player::Status;
use crate::vision::zone;
use serde::Deserialize;
use serde::Serialize;
