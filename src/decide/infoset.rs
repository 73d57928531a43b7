//! Infoset key construction. The key is the wire contract with whatever
//! trained the tables: `<hand>:<category>:<position>:<street>:<last>`,
//! e.g. "AKo:Par:BTN:Flop:Call". A mismatch here does not error, it
//! just degrades every lookup to the safe fallback, so the token
//! spellings below must not drift.

/// Build the lookup key for the hero's current decision point.
pub fn key(phase: &Phase, hero: &Player, oracle: Option<&dyn Oracle>) -> String {
    let hand = hand_token(hero.hole());
    let category = match (phase.street, oracle) {
        (Street::Flop | Street::Turn | Street::River | Street::Showdown, Some(oracle)) => {
            oracle.category(hero.hole(), phase.community())
        }
        _ => Category::preflop(hero.hole()),
    };
    let position = hero.position.unwrap_or_default();
    let last = phase
        .last_action(&hero.name)
        .map(|a| a.to_string())
        .unwrap_or_else(|| "Ninguna".to_string());
    format!(
        "{}:{}:{}:{}:{}",
        hand,
        category,
        position,
        street_key(phase.street),
        last
    )
}

/// Canonical hole-card token: ranks high-first, then s/o for suitedness,
/// bare for pairs. Unknown or partial holes collapse to "XX".
pub fn hand_token(hole: &[Card]) -> String {
    match hole {
        [a, b] => {
            let (hi, lo) = if a.rank() >= b.rank() { (a, b) } else { (b, a) };
            if hi.rank() == lo.rank() {
                format!("{}{}", hi.rank(), lo.rank())
            } else if hi.suit() == lo.suit() {
                format!("{}{}s", hi.rank(), lo.rank())
            } else {
                format!("{}{}o", hi.rank(), lo.rank())
            }
        }
        _ => "XX".to_string(),
    }
}

/// Streets as the tables spell them. Tables only key the four betting
/// rounds; anything else falls back to the pre-flop key space.
fn street_key(street: Street) -> &'static str {
    match street {
        Street::Flop => "Flop",
        Street::Turn => "Turn",
        Street::River => "River",
        _ => "Preflop",
    }
}


use crate::cards::card::Card;
use crate::cards::category::Category;
use crate::cards::category::Oracle;
use crate::gameplay::phase::Phase;
use crate::gameplay::phase::Street;
use crate::gameplay::player::Player;
