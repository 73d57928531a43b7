//! Discovery and loading of trained tables. A strategy directory holds
//! one file per player count, named `mccfr_<players>_poker.bin`; files
//! that fail validation are logged and skipped so one corrupt download
//! never takes down the rest.

/// Player count declared by a table filename, if it matches the naming
/// scheme.
pub fn players_of(filename: &str) -> Option<u8> {
    let digits = filename
        .strip_prefix("mccfr_")?
        .strip_suffix("_poker.bin")?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn load_file(path: &Path) -> Result<Table, TableError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    codec::decode(&mut reader)
}

/// Scan a directory and load every table it holds. Io on the directory
/// itself is fatal; per-file failures are not.
pub fn load_dir(dir: &Path) -> Result<Tables, TableError> {
    let mut paths = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .collect::<Vec<_>>();
    paths.sort();
    let mut tables = Tables::default();
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(declared) = players_of(name) else {
            continue;
        };
        match load_file(&path) {
            Ok(table) => {
                if table.header.players != declared {
                    log::warn!(
                        "{}: filename says {} players, header says {}",
                        name,
                        declared,
                        table.header.players
                    );
                }
                log::info!(
                    "loaded {}: {} nodes, {} players, version {}",
                    name,
                    table.len(),
                    table.header.players,
                    table.header.version
                );
                tables.insert_keyed(declared, table);
            }
            Err(e) => log::warn!("skipping {}: {}", name, e),
        }
    }
    if tables.is_empty() {
        log::warn!("no usable strategy tables under {}", dir.display());
    }
    Ok(tables)
}


use super::codec;
use super::error::TableError;
use super::table::Table;
use super::table::Tables;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
