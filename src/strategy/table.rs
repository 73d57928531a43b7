/// First four bytes of every strategy table file.
pub const MAGIC: u32 = 0x4D43_4346;
/// Hard cap on actions per node; anything beyond is corruption.
pub const MAX_ACTIONS: u32 = 10_000;
/// Hard cap on serialized string lengths.
pub const MAX_STRING: u32 = 100_000;

/// Fixed 32-byte file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub version: u32,
    pub timestamp: u64,
    pub nodes: u32,
    pub checksum: u32,
    pub players: u8,
}

/// One action at one infoset: cumulative regret and cumulative strategy
/// weight as the trainer left them.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub action: String,
    pub regret: f64,
    pub weight: f64,
}

/// A trained table for one player count: infoset key -> entries.
#[derive(Debug, Clone)]
pub struct Table {
    pub header: Header,
    pub nodes: BTreeMap<String, Vec<Entry>>,
}

impl Table {
    pub fn lookup(&self, key: &str) -> Option<&[Entry]> {
        self.nodes.get(key).map(Vec::as_slice)
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// All loaded tables keyed by player count.
#[derive(Debug, Default)]
pub struct Tables(BTreeMap<u8, Table>);

impl Tables {
    pub fn insert(&mut self, table: Table) {
        self.0.insert(table.header.players, table);
    }
    /// Insert under an explicit player-count key. The directory scan
    /// keys by filename digits, which win over the header on a
    /// disagreement.
    pub fn insert_keyed(&mut self, players: u8, table: Table) {
        self.0.insert(players, table);
    }
    /// Pick the table for a table size: clamp into the trained range,
    /// exact match if present, otherwise the nearest player count
    /// (ties break low).
    pub fn resolve(&self, players: usize) -> Option<&Table> {
        let clamped = players.clamp(2, 10) as u8;
        if let Some(exact) = self.0.get(&clamped) {
            return Some(exact);
        }
        self.0
            .iter()
            .min_by_key(|(n, _)| ((*n).abs_diff(clamped), **n))
            .map(|(_, t)| t)
    }
    pub fn counts(&self) -> impl Iterator<Item = u8> + '_ {
        self.0.keys().copied()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(players: u8) -> Table {
        Table {
            header: Header {
                version: 1,
                timestamp: 0,
                nodes: 0,
                checksum: 0,
                players,
            },
            nodes: BTreeMap::new(),
        }
    }

    #[test]
    fn resolve_prefers_exact_then_nearest() {
        let mut tables = Tables::default();
        tables.insert(sized(2));
        tables.insert(sized(6));
        tables.insert(sized(9));
        assert_eq!(tables.resolve(6).unwrap().header.players, 6);
        assert_eq!(tables.resolve(5).unwrap().header.players, 6);
        assert_eq!(tables.resolve(3).unwrap().header.players, 2);
        // out-of-range sizes clamp before matching
        assert_eq!(tables.resolve(14).unwrap().header.players, 9);
        assert_eq!(tables.resolve(0).unwrap().header.players, 2);
    }

    #[test]
    fn resolve_ties_break_low() {
        let mut tables = Tables::default();
        tables.insert(sized(4));
        tables.insert(sized(6));
        assert_eq!(tables.resolve(5).unwrap().header.players, 4);
    }

    #[test]
    fn resolve_empty_is_none() {
        assert!(Tables::default().resolve(6).is_none());
    }
}

use std::collections::BTreeMap;
