/// Failure modes for reading a strategy table off disk. Every variant
/// except Io means the file is not a table we produced, so directory
/// scans log and skip rather than abort.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("bad magic 0x{0:08X}")]
    Magic(u32),
    #[error("player count {0} outside 2..=10")]
    Players(u8),
    #[error("implausible action count {0}")]
    Actions(u32),
    #[error("string length {0} exceeds cap")]
    Oversized(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

use thiserror::Error;
