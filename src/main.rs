use std::path::PathBuf;
use anyhow::Context;
use log::info;
use hybridkv::engine;
use hybridkv::util::{load_index_config, IndexOptions, Options};
use hybridkv::HybridIndex;

/// Usage: hybridkv [key=value ...]
///
/// `config=<dir>` loads index.yaml/json/ini from a directory; the remaining
/// pairs (`reserve`, `consolidate_threshold`) override it.
fn main() -> anyhow::Result<()> {
    engine::init_engine();

    let mut args = Options::new();
    for arg in std::env::args().skip(1) {
        args.set_pair(&arg);
    }

    let mut options = match args.get("config") {
        Some(dir) => load_index_config(&PathBuf::from(dir))
            .and_then(|cfg| cfg.to_index_options())
            .with_context(|| format!("loading index config from {}", dir))?,
        None => IndexOptions::default(),
    };
    let mut overrides = options.to_options();
    for (k, v) in args.iter().filter(|(k, _)| *k != "config") {
        overrides.set(k, v);
    }
    options = IndexOptions::from_options(&overrides).context("parsing options")?;
    info!("options: {}", options.to_options());

    let mut index: HybridIndex<u64, u64> = HybridIndex::with_options(options);

    // bulk load, mostly sorted
    for id in 0..10_000u64 {
        index.try_unsorted_set(id, id * 10 + 1)?;
        if id % 3 == 0 {
            index.try_unsorted_set(id, id * 10 + 2)?;
        }
    }
    index.sort();

    // sparse updates
    for id in (0..10_000u64).rev().step_by(97) {
        index.try_set(id, id * 10 + 3)?;
    }
    index.remove(42, 421);

    let (begin, end) = index.get_all(42);
    let values: Vec<u64> = begin.map(|(_, v)| v).collect();
    info!("id 42 -> {:?} (end reached: {})", values, end.is_end());
    println!("{}", serde_json::to_string(&index.stats())?);

    if index.should_consolidate() {
        info!("overflow above threshold");
    }

    let mut dump = Vec::new();
    let written = index.dump_as_list(&mut dump).context("dumping index")?;
    println!("{}", serde_json::to_string(&index.stats())?);

    let mut reloaded: HybridIndex<u64, u64> = HybridIndex::new();
    let loaded = reloaded.load_from_list(dump.as_slice()).context("reloading dump")?;
    anyhow::ensure!(loaded == written, "reloaded {} of {} entries", loaded, written);
    println!("{}", serde_json::to_string(&reloaded.stats())?);

    Ok(())
}
