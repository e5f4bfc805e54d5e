// Status panel core: bucketing, refresh and bulk clearing
mod clear;
mod details;
mod notification;
mod refresher;

pub use clear::{clear_expired, ClearFailure, ClearOutcome};
pub use details::{RecordDetails, TimeColumn};
pub use notification::{Notification, Severity};
pub use refresher::Refresher;

use crate::error::Result;
use crate::models::{Record, Snapshot};
use chrono::{Duration, NaiveDateTime};

/// A record together with its id in the transactions mapping
pub type Rental = (String, Record);

/// Visible records, split by whether they have ended
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    /// Still running, soonest to end first
    pub active: Vec<Rental>,
    /// Ended within the recency window, most recently ended first
    pub expired: Vec<Rental>,
}

impl Buckets {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.expired.is_empty()
    }

    /// Find a visible record by id
    pub fn find(&self, id: &str) -> Option<&Rental> {
        self.active
            .iter()
            .chain(self.expired.iter())
            .find(|(entry_id, _)| entry_id == id)
    }
}

/// Split a snapshot into active and recently expired records.
///
/// Counters, hidden records, records without a parseable end time and records
/// that ended before `now - recent_window` are left out.
pub fn classify(snapshot: &Snapshot, now: NaiveDateTime, recent_window: Duration) -> Buckets {
    // A window reaching past the calendar keeps everything that has ended
    let cutoff = now
        .checked_sub_signed(recent_window)
        .unwrap_or(NaiveDateTime::MIN);
    let mut active = Vec::new();
    let mut expired = Vec::new();

    for (id, entry) in snapshot {
        let Some(record) = entry.as_record() else {
            continue;
        };
        if record.is_hidden() {
            continue;
        }
        let Some(ends_at) = record.ends_at() else {
            continue;
        };

        if ends_at > now {
            active.push((ends_at, (id.clone(), record.clone())));
        } else if ends_at > cutoff {
            expired.push((ends_at, (id.clone(), record.clone())));
        }
    }

    active.sort_by(|a, b| a.0.cmp(&b.0));
    expired.sort_by(|a, b| b.0.cmp(&a.0));

    Buckets {
        active: active.into_iter().map(|(_, entry)| entry).collect(),
        expired: expired.into_iter().map(|(_, entry)| entry).collect(),
    }
}

/// Toast for a finished clear, including one that never got going
pub fn clear_notification(result: &Result<ClearOutcome>) -> Notification {
    match result {
        Ok(outcome) => outcome.notification(),
        Err(_) => Notification::clear_aborted(),
    }
}
