//! Wire codec for trained strategy tables. Everything is little-endian:
//! a 32-byte header (magic, version, timestamp, node count, checksum,
//! player count, 7 pad bytes), then length-prefixed nodes. Validation
//! is front-loaded so a corrupt file fails before we allocate for it.

pub fn decode<R: Read>(reader: &mut R) -> Result<Table, TableError> {
    let magic = reader.read_u32::<LE>()?;
    if magic != MAGIC {
        return Err(TableError::Magic(magic));
    }
    let version = reader.read_u32::<LE>()?;
    let timestamp = reader.read_u64::<LE>()?;
    let nodes = reader.read_u32::<LE>()?;
    let checksum = reader.read_u32::<LE>()?;
    let players = reader.read_u8()?;
    if !(2..=10).contains(&players) {
        return Err(TableError::Players(players));
    }
    let mut pad = [0u8; 7];
    reader.read_exact(&mut pad)?;
    let mut parsed = BTreeMap::new();
    for _ in 0..nodes {
        let key = string(reader)?;
        let count = reader.read_u32::<LE>()?;
        if count == 0 || count > MAX_ACTIONS {
            return Err(TableError::Actions(count));
        }
        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(Entry {
                action: string(reader)?,
                regret: reader.read_f64::<LE>()?,
                weight: reader.read_f64::<LE>()?,
            });
        }
        parsed.insert(key, entries);
    }
    Ok(Table {
        header: Header {
            version,
            timestamp,
            nodes,
            checksum,
            players,
        },
        nodes: parsed,
    })
}

pub fn encode<W: Write>(writer: &mut W, table: &Table) -> Result<(), TableError> {
    writer.write_u32::<LE>(MAGIC)?;
    writer.write_u32::<LE>(table.header.version)?;
    writer.write_u64::<LE>(table.header.timestamp)?;
    writer.write_u32::<LE>(table.nodes.len() as u32)?;
    writer.write_u32::<LE>(table.header.checksum)?;
    writer.write_u8(table.header.players)?;
    writer.write_all(&[0u8; 7])?;
    for (key, entries) in table.nodes.iter() {
        prefixed(writer, key)?;
        writer.write_u32::<LE>(entries.len() as u32)?;
        for entry in entries {
            prefixed(writer, &entry.action)?;
            writer.write_f64::<LE>(entry.regret)?;
            writer.write_f64::<LE>(entry.weight)?;
        }
    }
    Ok(())
}

fn string<R: Read>(reader: &mut R) -> Result<String, TableError> {
    let len = reader.read_u32::<LE>()?;
    if len > MAX_STRING {
        return Err(TableError::Oversized(len));
    }
    let mut buf = vec![0u8; len as usize];
    reader.read_exact(&mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn prefixed<W: Write>(writer: &mut W, s: &str) -> Result<(), TableError> {
    writer.write_u32::<LE>(s.len() as u32)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn fixture(players: u8) -> Table {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            "AKo:Par:BTN:Flop:Call".to_string(),
            vec![
                Entry {
                    action: "Fold".to_string(),
                    regret: -3.5,
                    weight: 0.0,
                },
                Entry {
                    action: "Call".to_string(),
                    regret: 12.0,
                    weight: 880.5,
                },
                Entry {
                    action: "Raise x2".to_string(),
                    regret: 4.25,
                    weight: 119.5,
                },
            ],
        );
        nodes.insert(
            "72o:Carta Alta:SB:Preflop:Ninguna".to_string(),
            vec![Entry {
                action: "Fold".to_string(),
                regret: 0.0,
                weight: 1000.0,
            }],
        );
        Table {
            header: Header {
                version: 1,
                timestamp: 1_700_000_000,
                nodes: nodes.len() as u32,
                checksum: 0xDEAD_BEEF,
                players,
            },
            nodes,
        }
    }

    #[test]
    fn round_trip() {
        let table = fixture(6);
        let mut buf = Vec::new();
        encode(&mut buf, &table).unwrap();
        let decoded = decode(&mut buf.as_slice()).unwrap();
        assert_eq!(decoded.header, table.header);
        assert_eq!(decoded.nodes.len(), 2);
        let entries = decoded.lookup("AKo:Par:BTN:Flop:Call").unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].action, "Call");
        assert_eq!(entries[1].weight, 880.5);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let mut buf = Vec::new();
        encode(&mut buf, &fixture(6)).unwrap();
        buf[0] ^= 0xFF;
        assert!(matches!(
            decode(&mut buf.as_slice()),
            Err(TableError::Magic(_))
        ));
    }

    #[test]
    fn player_count_out_of_range() {
        let mut table = fixture(6);
        table.header.players = 11;
        let mut buf = Vec::new();
        encode(&mut buf, &table).unwrap();
        assert!(matches!(
            decode(&mut buf.as_slice()),
            Err(TableError::Players(11))
        ));
    }

    #[test]
    fn truncation_is_io() {
        let mut buf = Vec::new();
        encode(&mut buf, &fixture(6)).unwrap();
        buf.truncate(buf.len() - 9);
        assert!(matches!(decode(&mut buf.as_slice()), Err(TableError::Io(_))));
    }

    #[test]
    fn zero_actions_is_corruption() {
        let table = fixture(6);
        let mut buf = Vec::new();
        encode(&mut buf, &table).unwrap();
        // splice a zero action count over the first node's count field
        let key = "72o:Carta Alta:SB:Preflop:Ninguna";
        let at = 32 + 4 + key.len();
        buf[at..at + 4].copy_from_slice(&0u32.to_le_bytes());
        assert!(matches!(
            decode(&mut buf.as_slice()),
            Err(TableError::Actions(0))
        ));
    }
}

use super::error::TableError;
use super::table::Entry;
use super::table::Header;
use super::table::MAGIC;
use super::table::MAX_ACTIONS;
use super::table::MAX_STRING;
use super::table::Table;
use byteorder::LE;
use byteorder::ReadBytesExt;
use byteorder::WriteBytesExt;
use std::collections::BTreeMap;
use std::io::Read;
use std::io::Write;
