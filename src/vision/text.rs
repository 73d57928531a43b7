//! Normalizers from raw recognized text to canonical values. The text
//! engine upstream is noisy and multilingual; everything here degrades
//! to "no value" rather than erroring.

static SYMBOLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[¥$€£₹¢₽₿₫₪₱₩₦₴₡₵₸₼₾]").unwrap());
static UNITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(usd|eur|btc|eth|cg|chips?|fichas?)\b").unwrap());
static PERCENT_TAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\d{1,3}(?:\.\d+)?\s*%\s*$").unwrap());
static NON_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s\-_]").unwrap());
static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static POT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"bote:?\s*([\d.,]+)",
        r"pot:?\s*([\d.,]+)",
        r"total:?\s*([\d.,]+)",
        r"([\d.,]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static RAISE_PCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)%").unwrap());

const ALL_IN_TEXT: [&str; 3] = ["all in", "allin", "all-in"];
/// Status phrases that occupy the same screen region as amounts.
const STATUS_TEXT: [&str; 8] = [
    "reconectando",
    "reconnecting",
    "connecting",
    "post blind",
    "esperando",
    "waiting",
    "ausente",
    "away",
];

/// Parse a monetary readout. All-in phrases read as zero chips behind;
/// connection/status phrases read as no value at all.
pub fn money(text: &str) -> Option<Chips> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }
    if ALL_IN_TEXT.iter().any(|c| t.contains(c)) {
        return Some(0.0);
    }
    if STATUS_TEXT.iter().any(|c| t.contains(c)) {
        return None;
    }
    let t = SYMBOLS.replace_all(&t, "");
    let t = UNITS.replace_all(&t, "");
    let mut clean = t
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect::<String>();
    if clean.is_empty() {
        return None;
    }
    // several dots: last group of <= 2 digits is the decimal part,
    // everything else is thousands noise
    if clean.matches('.').count() > 1 {
        let parts = clean.split('.').collect::<Vec<_>>();
        let last = parts[parts.len() - 1];
        if last.len() <= 2 && !last.contains(',') {
            clean = format!("{}.{}", parts[..parts.len() - 1].concat(), last);
        } else {
            clean = parts.concat();
        }
    }
    if clean.contains(',') {
        if clean.contains('.') {
            clean = clean.replace(',', "");
        } else {
            let parts = clean.split(',').collect::<Vec<_>>();
            if parts.len() == 2 && parts[1].len() <= 2 {
                clean = format!("{}.{}", parts[0], parts[1]);
            } else {
                clean = clean.replace(',', "");
            }
        }
    }
    let val = clean.parse::<f64>().ok()?;
    if (0.0..=1e9).contains(&val) {
        Some(crate::round2(val))
    } else {
        None
    }
}

/// Parse the pot readout, tolerating a "Pot:"/"Bote:"/"Total:" prefix.
pub fn pot(text: &str) -> Option<Chips> {
    let t = text.trim().to_lowercase();
    POT_PATTERNS
        .iter()
        .find_map(|p| p.captures(&t))
        .and_then(|c| money(c.get(1).map(|m| m.as_str()).unwrap_or_default()))
}

const NOT_A_NAME: [&str; 13] = [
    "post blind",
    "posting blind",
    "small blind",
    "big blind",
    "esperando",
    "waiting",
    "reconnecting",
    "reconectando",
    "thinking",
    "pensando",
    "decidiendo",
    "allin",
    "all in",
];

/// Clean a player-name readout. Empty when the region was showing a
/// status phrase instead of a name.
pub fn name(text: &str) -> String {
    let t = text.trim();
    if t.is_empty() {
        return String::new();
    }
    let t = PERCENT_TAIL.replace(t, "").into_owned();
    let lower = t.to_lowercase();
    if NOT_A_NAME.iter().any(|c| lower.contains(c)) {
        return String::new();
    }
    let t = NON_NAME.replace_all(&t, "");
    let t = SPACES.replace_all(&t, " ").trim().to_string();
    t.chars().take(20).collect()
}

/// Parse a card's rank glyph, repairing the usual OCR confusions.
pub fn rank(text: &str) -> Option<Rank> {
    let mut t = text.trim().to_uppercase();
    for (wrong, right) in [
        ('I', '1'),
        ('S', '5'),
        ('G', '6'),
        ('B', '8'),
        ('D', '0'),
        ('Z', '2'),
        ('L', '1'),
        ('C', '0'),
    ] {
        t = t.replace(wrong, &right.to_string());
    }
    match t.as_str() {
        "0" | "O" => Some(Rank::Queen),
        "10" => Some(Rank::Ten),
        other => Rank::parse(other),
    }
}

/// Classify an action glyph's text. Cue words are checked in a fixed
/// order; raise cues are refined with an explicit subtype when the text
/// names one.
pub fn cue(text: &str) -> Option<Cue> {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }
    const TERMS: [(&str, Cue); 19] = [
        ("fold", Cue::Fold),
        ("no ir", Cue::Fold),
        ("retire", Cue::Fold),
        ("pasar", Cue::Fold),
        ("check", Cue::Check),
        ("ver", Cue::Check),
        ("paso", Cue::Check),
        ("call", Cue::Call),
        ("pagar", Cue::Call),
        ("igualar", Cue::Call),
        ("ver apuesta", Cue::Call),
        ("all in", Cue::AllIn),
        ("allin", Cue::AllIn),
        ("all-in", Cue::AllIn),
        ("todo", Cue::AllIn),
        ("raise", Cue::Raise(None)),
        ("subir", Cue::Raise(None)),
        ("apostar", Cue::Raise(None)),
        ("bet", Cue::Raise(None)),
    ];
    let hit = TERMS.iter().find(|(term, _)| t.contains(term))?.1;
    match hit {
        Cue::Raise(None) => Some(Cue::Raise(subtype(&t))),
        other => Some(other),
    }
}

fn subtype(t: &str) -> Option<Raise> {
    if t.contains("min") {
        Some(Raise::Min)
    } else if t.contains("x2") || t.contains("2x") {
        Some(Raise::X2)
    } else if t.contains("x3") || t.contains("3x") {
        Some(Raise::X3)
    } else {
        RAISE_PCT
            .captures(t)
            .and_then(|c| c[1].parse::<u16>().ok())
            .and_then(Raise::pct)
    }
}

/// Whether a stack readout indicates the player is all-in rather than
/// showing an amount.
pub fn shoved(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    if t.is_empty() {
        return false;
    }
    [
        "all in", "allin", "all-in", "todo", "completo", "sin fichas", "no chips", "all", "in",
    ]
    .iter()
    .any(|c| t.contains(c))
}


use crate::Chips;
use crate::cards::rank::Rank;
use crate::gameplay::action::Cue;
use crate::gameplay::action::Raise;
use once_cell::sync::Lazy;
use regex::Regex;
