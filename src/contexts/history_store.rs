use crate::data::HistoryMedium;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries retained in the history log.
pub const HISTORY_CAPACITY: usize = 10;
/// Maximum number of characters of generated code kept per entry.
pub const SNIPPET_LIMIT: usize = 500;
/// Marker appended when the snippet had to be cut off.
const ELLIPSIS: &str = "...";

/// One persisted requirement/result pair.
///
/// Entries are immutable once created and owned by the store. The snippet
/// is a display form capped at `SNIPPET_LIMIT` characters; the full
/// generated code is not retained here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub requirement: String,
    pub code_snippet: String,
}

/// Bounded, ordered, persisted cache of past generations.
///
/// The log is newest-first and never holds more than `HISTORY_CAPACITY`
/// entries; inserting past the cap evicts the oldest. Persistence goes
/// through the injected medium; a medium failure leaves the in-memory log
/// authoritative.
pub struct HistoryStore<M: HistoryMedium> {
    log: Vec<HistoryEntry>,
    medium: M,
}

impl<M: HistoryMedium> HistoryStore<M> {
    /// Opens the store, loading the persisted log.
    ///
    /// A missing or unparseable payload yields an empty log: corruption is
    /// treated as "no history", not an error.
    pub fn open(medium: M) -> Self {
        let log = medium
            .load()
            .and_then(|payload| serde_json::from_str::<Vec<HistoryEntry>>(&payload).ok())
            .unwrap_or_default();

        Self { log, medium }
    }

    /// Records a new generation at the front of the log and persists the
    /// result.
    pub fn record(&mut self, requirement: &str, generated_code: &str) {
        let entry = HistoryEntry {
            timestamp: Utc::now(),
            requirement: requirement.to_string(),
            code_snippet: truncate_snippet(generated_code),
        };

        self.log.insert(0, entry);
        self.log.truncate(HISTORY_CAPACITY);
        self.persist();
    }

    /// Empties the log and removes the persisted form.
    pub fn clear(&mut self) {
        self.log.clear();
        self.medium.clear();
    }

    /// Returns the stored fields of an entry verbatim.
    ///
    /// The snippet is the already-truncated stored form, not the full
    /// generated code.
    pub fn replay(&self, index: usize) -> Option<(String, String)> {
        self.log
            .get(index)
            .map(|entry| (entry.requirement.clone(), entry.code_snippet.clone()))
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    fn persist(&self) {
        match serde_json::to_string_pretty(&self.log) {
            Ok(payload) => self.medium.save(&payload),
            Err(e) => eprintln!("Failed to serialize history log: {}", e),
        }
    }
}

/// Truncates generated code to the first `SNIPPET_LIMIT` characters,
/// appending the ellipsis marker only when something was cut off.
fn truncate_snippet(code: &str) -> String {
    if code.chars().count() <= SNIPPET_LIMIT {
        code.to_string()
    } else {
        let prefix: String = code.chars().take(SNIPPET_LIMIT).collect();
        format!("{}{}", prefix, ELLIPSIS)
    }
}
