//! Live-hand tracking and blueprint advisory for No-Limit Hold'Em.
//!
//! Each cycle the external driver hands us one batch of detections
//! (object boxes + recognized text). We fold them into a monotonic
//! hand state, and on the hero's turn we key into a precomputed
//! MCCFR strategy table and come back with an action and a size.

pub mod cards;
pub mod decide;
pub mod gameplay;
pub mod strategy;
pub mod vision;

/// Monetary amounts in table currency units.
pub type Chips = f64;
/// Strategy weights and selection probabilities.
pub type Probability = f64;

// spatial matching
/// Max center distance for re-identifying a player across cycles (px).
pub const MATCH_RADIUS: f64 = 100.0;
/// Max center distance for attributing a bet marker to a player (px).
pub const BET_RADIUS: f64 = 150.0;
/// Max center distance for attributing an action glyph to a player (px).
pub const ACTION_RADIUS: f64 = 200.0;
/// Containment ratio for a glyph to count as inside a region.
pub const CONTAINMENT: f64 = 0.9;
/// Looser containment for hero card boxes inside the hero region.
pub const CARD_CONTAINMENT: f64 = 0.7;
/// IoU threshold for the turn indicator to mark a player.
pub const TURN_IOU: f64 = 0.1;
/// Containment ratio for an action glyph to belong to a seat outright.
pub const TAG_CONTAINMENT: f64 = 0.5;

// blinds & normalization
pub const DEFAULT_SB: Chips = 0.05;
pub const DEFAULT_BB: Chips = 0.10;
/// Floor guard against normalizing by a near-zero big blind.
pub const BB_FLOOR: Chips = 0.01;
/// A bet must move by more than this many BB to count as a new action.
pub const BET_EPSILON: f64 = 0.1;
/// A bet within this many BB of the table max reads as a Call.
pub const CALL_EPSILON: f64 = 0.2;
/// Below this many BB of stack a player is effectively all-in.
pub const SHOVE_FLOOR: f64 = 0.1;

// bookkeeping bounds
/// Duplicate-action look-back window within one street.
pub const DUPLICATE_WINDOW: usize = 3;
/// Finished hands retained for diffing and post-mortems.
pub const HISTORY_LIMIT: usize = 16;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes Debug level to file, Info to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Round to the 2-decimal precision used for BB-normalized amounts.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
