//! Outbox dispatcher
//!
//! Writes each report as a `multipart/alternative` message file into an
//! outbox directory, where a local mail transfer agent (or a person) picks
//! it up. Recipients with unusable addresses are reported back and left off
//! the message.
//!
//! Header values outside ASCII are written as RFC 2047 encoded-words and
//! both body parts use base64 transfer encoding, so the file is 7-bit clean.

use std::fs;
use std::path::PathBuf;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use super::{validate_address, DeliveryFailures, OutgoingReport, ReportDispatcher};
use crate::error::{DigestError, DigestResult};

/// Drops messages into a directory
pub struct OutboxDispatcher {
    dir: PathBuf,
}

impl OutboxDispatcher {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn message_path(&self, id: &Uuid) -> PathBuf {
        let stamp = Local::now().format("%Y%m%dT%H%M%S");
        let short = id.simple().to_string();
        self.dir.join(format!("{}-{}.eml", stamp, &short[..8]))
    }
}

/// Longest run of raw bytes per encoded-word (60 base64 chars + 12 framing)
const ENCODED_WORD_BYTES: usize = 45;
const BODY_LINE_LEN: usize = 76;

/// Build the MIME text for a report addressed to `to`
pub fn build_message(report: &OutgoingReport, to: &[&str], boundary: &str) -> String {
    let mut message = String::new();

    message.push_str(&format!("Subject: {}\r\n", encode_header(&report.subject)));
    message.push_str(&format!("From: {}\r\n", encode_header(&report.from)));
    message.push_str(&format!("To: {}\r\n", encode_header(&to.join(","))));
    message.push_str(&format!("Date: {}\r\n", Local::now().to_rfc2822()));
    message.push_str("MIME-Version: 1.0\r\n");
    message.push_str(&format!(
        "Content-Type: multipart/alternative; boundary=\"{}\"\r\n\r\n",
        boundary
    ));

    for (subtype, body) in [("plain", &report.plain_body), ("html", &report.html_body)] {
        message.push_str(&format!("--{}\r\n", boundary));
        message.push_str(&format!(
            "Content-Type: text/{}; charset=\"utf-8\"\r\n",
            subtype
        ));
        message.push_str("Content-Transfer-Encoding: base64\r\n\r\n");
        message.push_str(&encode_body(body));
    }

    message.push_str(&format!("--{}--\r\n", boundary));
    message
}

/// Header value safe for a 7-bit message
///
/// ASCII passes through with line breaks flattened. Anything else becomes
/// one or more `=?utf-8?B?...?=` words folded onto continuation lines.
fn encode_header(value: &str) -> String {
    let flat: String = value
        .chars()
        .map(|ch| if ch == '\r' || ch == '\n' { ' ' } else { ch })
        .collect();
    if flat.is_ascii() {
        return flat;
    }

    let mut words = Vec::new();
    let mut chunk = String::new();
    for ch in flat.chars() {
        if chunk.len() + ch.len_utf8() > ENCODED_WORD_BYTES {
            words.push(format!("=?utf-8?B?{}?=", STANDARD.encode(&chunk)));
            chunk.clear();
        }
        chunk.push(ch);
    }
    if !chunk.is_empty() {
        words.push(format!("=?utf-8?B?{}?=", STANDARD.encode(&chunk)));
    }
    words.join("\r\n ")
}

fn encode_body(body: &str) -> String {
    let encoded = STANDARD.encode(body);
    let mut wrapped = String::with_capacity(encoded.len() + encoded.len() / BODY_LINE_LEN * 2 + 2);
    for line in encoded.as_bytes().chunks(BODY_LINE_LEN) {
        // base64 output is ASCII, so every chunk is valid UTF-8
        wrapped.push_str(&String::from_utf8_lossy(line));
        wrapped.push_str("\r\n");
    }
    wrapped
}

impl ReportDispatcher for OutboxDispatcher {
    fn dispatch(&self, report: &OutgoingReport) -> DigestResult<DeliveryFailures> {
        let mut failures = DeliveryFailures::new();
        let mut accepted = Vec::new();

        for address in &report.to {
            match validate_address(address) {
                Ok(()) => accepted.push(address.as_str()),
                Err(reason) => {
                    warn!(%address, %reason, "recipient refused");
                    failures.insert(address.clone(), reason);
                }
            }
        }

        validate_address(&report.from)
            .map_err(|reason| DigestError::Delivery(format!("bad sender address: {}", reason)))?;

        if accepted.is_empty() {
            warn!("no deliverable recipients, nothing written");
            return Ok(failures);
        }

        fs::create_dir_all(&self.dir).map_err(|e| {
            DigestError::Delivery(format!(
                "Failed to create outbox {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let id = Uuid::new_v4();
        let boundary = format!("=_{}", id.simple());
        let path = self.message_path(&id);

        fs::write(&path, build_message(report, &accepted, &boundary))
            .map_err(|e| DigestError::Delivery(format!("Failed to write {}: {}", path.display(), e)))?;

        info!(path = %path.display(), recipients = accepted.len(), "report queued");
        Ok(failures)
    }
}
