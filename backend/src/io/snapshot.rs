//! Reading and writing `{ "goals": [...], "transactions": [...] }` snapshots
//! exported from the key-value store.

use anyhow::{Context, Result};
use log::info;
use shared::LedgerSnapshot;
use std::fs;
use std::path::Path;

pub fn load_snapshot(path: &Path) -> Result<LedgerSnapshot> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&json)
        .with_context(|| format!("Invalid snapshot {}", path.display()))?;
    info!(
        "Loaded snapshot {:?}: {} goals, {} transactions",
        path,
        snapshot.goals.len(),
        snapshot.transactions.len()
    );
    Ok(snapshot)
}

pub fn save_snapshot(path: &Path, snapshot: &LedgerSnapshot) -> Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, json).with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    info!("Saved snapshot to {:?}", path);
    Ok(())
}
