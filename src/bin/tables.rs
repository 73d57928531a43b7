//! Strategy Table Inspector Binary
//!
//! Loads a directory of trained tables, prints what survived
//! validation, and optionally probes a single infoset key.

use clap::Parser;
use railbird::strategy::loader;

#[derive(Parser)]
#[command(about = "inspect trained strategy tables")]
struct Args {
    /// Directory holding mccfr_<players>_poker.bin files
    #[arg(default_value = "tables")]
    dir: std::path::PathBuf,
    /// Player count to resolve against
    #[arg(long, default_value_t = 6)]
    players: usize,
    /// Infoset key to probe, e.g. "AKo:Par:BTN:Flop:Call"
    #[arg(long)]
    key: Option<String>,
}

fn main() -> anyhow::Result<()> {
    railbird::log();
    let args = Args::parse();
    let tables = loader::load_dir(&args.dir)?;
    for n in tables.counts() {
        let table = tables.resolve(n as usize).expect("listed count resolves");
        log::info!(
            "{} players: {} nodes, version {}, timestamp {}",
            n,
            table.len(),
            table.header.version,
            table.header.timestamp
        );
    }
    if let Some(ref key) = args.key {
        match tables.resolve(args.players) {
            None => log::warn!("no table resolves for {} players", args.players),
            Some(table) => match table.lookup(key) {
                None => log::warn!("{} not present for {} players", key, args.players),
                Some(entries) => {
                    for entry in entries {
                        log::info!(
                            "{:<12} regret {:>12.4} weight {:>12.4}",
                            entry.action,
                            entry.regret,
                            entry.weight
                        );
                    }
                }
            },
        }
    }
    Ok(())
}
