/// What the overlay shows the user for one decision point. Serialized
/// as-is onto the outbound queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Wire label of the chosen action ("Raise 50%", "Fold", ...).
    pub action: String,
    /// Localized phrase for display.
    pub phrase: String,
    /// Raise-to amount in table currency; zero for non-raises.
    pub amount: Chips,
    pub amount_bb: f64,
    /// Selection probability from the strategy weights; zero whenever
    /// the table had nothing to say.
    pub probability: Probability,
    /// Whether the infoset was actually present in the table.
    pub found: bool,
    pub infoset: String,
    pub street: String,
}

impl Recommendation {
    pub fn new(action: Action, probability: Probability, found: bool, infoset: String, street: Street) -> Self {
        Self {
            action: action.to_string(),
            phrase: if found {
                action.spanish()
            } else {
                "Pasar / No Ir".to_string()
            },
            amount: 0.0,
            amount_bb: 0.0,
            probability,
            found,
            infoset,
            street: street.to_string(),
        }
    }

    /// Attach a concrete raise-to amount; the phrase gains the figure.
    pub fn sized(mut self, amount: Chips, amount_bb: f64) -> Self {
        self.amount = amount;
        self.amount_bb = amount_bb;
        if amount > 0.0 {
            self.phrase = format!("Igualar o Subir a ${:.2}", amount);
        }
        self
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.amount > 0.0 {
            write!(f, "{} (${:.2}, p={:.2})", self.phrase, self.amount, self.probability)
        } else {
            write!(f, "{} (p={:.2})", self.phrase, self.probability)
        }
    }
}

use crate::Chips;
use crate::Probability;
use crate::gameplay::action::Action;
use crate::gameplay::phase::Street;
use serde::Deserialize;
use serde::Serialize;
