//! Digest run pipeline
//!
//! One run moves through `START -> LOADED -> READY -> RENDERED -> DONE`:
//! load the previous snapshot, fetch provider data and build the current
//! snapshot and hierarchy, render the report, hand it to the dispatcher, and
//! finally persist the current snapshot. Any failure before the last step
//! leaves the stored snapshot untouched.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use super::hierarchy::Hierarchy;
use super::snapshot::build_current_snapshot;
use crate::config::{PersistPolicy, Settings};
use crate::error::DigestResult;
use crate::models::BalanceSnapshot;
use crate::notify::{DeliveryFailures, OutgoingReport, ReportDispatcher};
use crate::provider::BudgetProvider;
use crate::reports::BalanceChangeReport;
use crate::storage::SnapshotStore;

/// Pipeline stage, used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    Loaded,
    Ready,
    Rendered,
    Done,
}

/// Everything needed to render, built fresh each run
#[derive(Debug, Clone)]
pub struct PreparedDigest {
    pub hierarchy: Hierarchy,
    pub current: BalanceSnapshot,
    pub previous: BalanceSnapshot,
}

impl PreparedDigest {
    pub fn report(&self) -> BalanceChangeReport {
        BalanceChangeReport::build(&self.hierarchy, &self.current, &self.previous)
    }
}

/// How a run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// The provider could not be reached; nothing was sent or persisted
    ProviderUnavailable { reason: String },
    Completed {
        report: BalanceChangeReport,
        failures: DeliveryFailures,
        persisted: bool,
    },
}

/// Service for producing and delivering the balance digest
pub struct DigestService<'a> {
    settings: &'a Settings,
    store: &'a SnapshotStore,
    provider: &'a dyn BudgetProvider,
}

impl<'a> DigestService<'a> {
    pub fn new(
        settings: &'a Settings,
        store: &'a SnapshotStore,
        provider: &'a dyn BudgetProvider,
    ) -> Self {
        Self {
            settings,
            store,
            provider,
        }
    }

    fn enter(state: RunState) {
        info!(?state, "digest run");
    }

    /// Load the previous snapshot and build the current one and the hierarchy
    pub fn prepare(&self, now: DateTime<Local>) -> DigestResult<PreparedDigest> {
        Self::enter(RunState::Start);
        let previous = self.store.load_previous()?;
        Self::enter(RunState::Loaded);

        let data = self.provider.fetch(&self.settings.budget_name)?;
        let current = build_current_snapshot(
            &data.calculations,
            now.date_naive(),
            self.settings.duplicate_policy,
        )?;
        let hierarchy = Hierarchy::build(&data.master_categories, &data.subcategories);
        Self::enter(RunState::Ready);

        Ok(PreparedDigest {
            hierarchy,
            current,
            previous,
        })
    }

    /// Subject line for a report generated at `now`
    pub fn subject(&self, now: DateTime<Local>) -> String {
        format!("{} {}", self.settings.subject_prefix, now.format("%x"))
    }

    /// Execute a full run: render, dispatch, then persist per policy
    pub fn run(
        &self,
        dispatcher: &dyn ReportDispatcher,
        now: DateTime<Local>,
    ) -> DigestResult<RunOutcome> {
        let prepared = match self.prepare(now) {
            Ok(prepared) => prepared,
            Err(e) if e.is_provider_connection() => {
                warn!(error = %e, "budget provider unavailable, skipping this run");
                return Ok(RunOutcome::ProviderUnavailable {
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let report = prepared.report();
        Self::enter(RunState::Rendered);

        let outgoing = OutgoingReport {
            subject: self.subject(now),
            from: self.settings.from_address.clone(),
            to: self.settings.recipients.clone(),
            plain_body: report.plain_text(),
            html_body: report.html_document(),
        };
        let failures = dispatcher.dispatch(&outgoing)?;
        for (address, reason) in &failures {
            warn!(%address, %reason, "delivery failed");
        }

        let persisted = match self.settings.persist_policy {
            PersistPolicy::Always => true,
            PersistPolicy::OnCleanDelivery => failures.is_empty(),
        };
        if persisted {
            self.store.persist(&prepared.current)?;
        } else {
            warn!("delivery incomplete, keeping previous snapshot");
        }
        Self::enter(RunState::Done);

        Ok(RunOutcome::Completed {
            report,
            failures,
            persisted,
        })
    }
}
