//! Run and preview commands

use chrono::Local;

use crate::config::{DigestPaths, Settings};
use crate::error::DigestResult;
use crate::notify::OutboxDispatcher;
use crate::provider::JsonExportProvider;
use crate::services::{DigestService, RunOutcome};
use crate::storage::SnapshotStore;

/// Produce, dispatch, and persist the digest
///
/// A provider connection failure ends the run quietly with success.
pub fn handle_run_command(paths: &DigestPaths, settings: &Settings) -> DigestResult<()> {
    settings.validate_for_run()?;

    let store = SnapshotStore::new(paths.snapshot_file());
    let provider = JsonExportProvider::new(settings.require_provider_export()?.clone());
    let dispatcher = OutboxDispatcher::new(paths.outbox_dir());

    let service = DigestService::new(settings, &store, &provider);
    match service.run(&dispatcher, Local::now())? {
        RunOutcome::ProviderUnavailable { .. } => {}
        RunOutcome::Completed {
            report,
            failures,
            persisted,
        } => {
            let delivered = settings.recipients.len().saturating_sub(failures.len());
            println!(
                "Report queued for {} of {} recipient(s), {} balance change(s).",
                delivered,
                settings.recipients.len(),
                report.changed_count()
            );
            for (address, reason) in &failures {
                println!("  Not delivered to {}: {}", address, reason);
            }
            if !persisted {
                println!("Balances not saved; next run compares against the previous snapshot.");
            }
        }
    }

    Ok(())
}

/// Render the report to stdout without dispatching or persisting
pub fn handle_preview_command(
    paths: &DigestPaths,
    settings: &Settings,
    html: bool,
) -> DigestResult<()> {
    let store = SnapshotStore::new(paths.snapshot_file());
    let provider = JsonExportProvider::new(settings.require_provider_export()?.clone());

    let service = DigestService::new(settings, &store, &provider);
    let now = Local::now();
    let report = service.prepare(now)?.report();

    if html {
        println!("{}", report.html_document());
    } else {
        println!("{}", service.subject(now));
        println!();
        print!("{}", report.plain_text());
    }

    Ok(())
}
