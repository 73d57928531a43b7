/// The 15-token action vocabulary shared with the strategy tables. The
/// Display forms are the wire labels the tables key on, bit for bit.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Fold,
    Check,
    Call,
    AllIn,
    Raise(Raise),
}

/// Raise sizing families. Pct carries one of the eight fixed pot
/// percentages (33, 50, 75, 100, 150, 200, 250, 300).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Raise {
    Min,
    X2,
    X3,
    Pct(u16),
}

impl Raise {
    pub const PERCENTAGES: [u16; 8] = [33, 50, 75, 100, 150, 200, 250, 300];

    pub fn pct(n: u16) -> Option<Self> {
        Self::PERCENTAGES.contains(&n).then_some(Self::Pct(n))
    }
}

impl Action {
    pub const fn all() -> [Self; 15] {
        [
            Self::Fold,
            Self::Check,
            Self::Call,
            Self::AllIn,
            Self::Raise(Raise::Min),
            Self::Raise(Raise::X2),
            Self::Raise(Raise::X3),
            Self::Raise(Raise::Pct(33)),
            Self::Raise(Raise::Pct(50)),
            Self::Raise(Raise::Pct(75)),
            Self::Raise(Raise::Pct(100)),
            Self::Raise(Raise::Pct(150)),
            Self::Raise(Raise::Pct(200)),
            Self::Raise(Raise::Pct(250)),
            Self::Raise(Raise::Pct(300)),
        ]
    }

    pub fn is_raise(&self) -> bool {
        matches!(self, Self::Raise(_))
    }

    /// Localized phrase shown to the user by the overlay.
    pub fn spanish(&self) -> String {
        match self {
            Self::Fold => "No Ir".to_string(),
            Self::Check => "Pasar".to_string(),
            Self::Call => "Pagar".to_string(),
            Self::AllIn => "All In".to_string(),
            Self::Raise(Raise::Min) => "Subir Mínimo".to_string(),
            Self::Raise(Raise::X2) => "Subir x2".to_string(),
            Self::Raise(Raise::X3) => "Subir x3".to_string(),
            Self::Raise(Raise::Pct(n)) => format!("Subir {}%", n),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Fold => write!(f, "Fold"),
            Self::Check => write!(f, "Check"),
            Self::Call => write!(f, "Call"),
            Self::AllIn => write!(f, "All-In"),
            Self::Raise(Raise::Min) => write!(f, "Raise Min"),
            Self::Raise(Raise::X2) => write!(f, "Raise x2"),
            Self::Raise(Raise::X3) => write!(f, "Raise x3"),
            Self::Raise(Raise::Pct(n)) => write!(f, "Raise {}%", n),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|a| a.to_string() == s)
            .ok_or(())
    }
}

/// What an action glyph's text says before any bet-context is applied.
/// A raise cue may or may not name its sizing family outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Fold,
    Check,
    Call,
    AllIn,
    Raise(Option<Raise>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn wire_labels_round_trip() {
        for action in Action::all() {
            assert_eq!(Action::from_str(&action.to_string()), Ok(action));
        }
    }

    #[test]
    fn wire_labels_exact() {
        assert_eq!(Action::AllIn.to_string(), "All-In");
        assert_eq!(Action::Raise(Raise::Min).to_string(), "Raise Min");
        assert_eq!(Action::Raise(Raise::X2).to_string(), "Raise x2");
        assert_eq!(Action::Raise(Raise::Pct(33)).to_string(), "Raise 33%");
    }

    #[test]
    fn percentages_are_closed() {
        assert_eq!(Raise::pct(50), Some(Raise::Pct(50)));
        assert_eq!(Raise::pct(42), None);
    }
}

use serde::Deserialize;
use serde::Serialize;
