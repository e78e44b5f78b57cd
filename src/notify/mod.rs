//! Report delivery boundary
//!
//! The report is handed over as a finished message: subject, sender,
//! recipients, and plain-text and HTML bodies. Problems with individual
//! recipients come back as data; only a failure of the channel itself is an
//! error.

pub mod outbox;

pub use outbox::OutboxDispatcher;

use std::collections::BTreeMap;

use crate::error::DigestResult;

/// Recipient address to the reason delivery to it failed
pub type DeliveryFailures = BTreeMap<String, String>;

/// A rendered report ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingReport {
    pub subject: String,
    pub from: String,
    pub to: Vec<String>,
    pub plain_body: String,
    pub html_body: String,
}

/// Delivers outgoing reports
pub trait ReportDispatcher {
    /// Send the report, returning per-recipient failures
    ///
    /// An empty map means every recipient accepted the report.
    fn dispatch(&self, report: &OutgoingReport) -> DigestResult<DeliveryFailures>;
}

/// Minimal syntactic check for a mailbox address
pub fn validate_address(address: &str) -> Result<(), String> {
    if address.chars().any(char::is_whitespace) {
        return Err("address contains whitespace".into());
    }

    let (local, domain) = address
        .split_once('@')
        .ok_or_else(|| "address has no '@'".to_string())?;

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err("malformed address".into());
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(format!("invalid domain '{}'", domain));
    }

    Ok(())
}
