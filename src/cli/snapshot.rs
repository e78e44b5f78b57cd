//! Snapshot inspection command

use crate::config::DigestPaths;
use crate::error::DigestResult;
use crate::storage::SnapshotStore;

/// Print the persisted snapshot, one subcategory per line
pub fn handle_snapshot_command(paths: &DigestPaths) -> DigestResult<()> {
    let store = SnapshotStore::new(paths.snapshot_file());
    let snapshot = store.load_previous()?;

    if snapshot.is_empty() {
        println!("No saved balances at {}", store.path().display());
        return Ok(());
    }

    let width = snapshot
        .iter()
        .map(|(id, _)| id.as_str().len())
        .max()
        .unwrap_or(0);

    println!("{:<width$}  {:>14}", "Subcategory", "Balance", width = width.max(11));
    for (id, balance) in snapshot.iter() {
        println!(
            "{:<width$}  {:>14}",
            id.as_str(),
            balance.to_string(),
            width = width.max(11)
        );
    }

    Ok(())
}
