use super::Rental;
use crate::expiry::format_time_with_am_pm;
use chrono::NaiveDateTime;

/// One of the Start / Approved / End columns of the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeColumn {
    pub label: &'static str,
    pub time: String,
    /// Only ever set on the End column, when it lies in the past
    pub ended: bool,
}

/// What the "Account Details" dialog shows for a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetails {
    pub id: String,
    pub slot: String,
    pub times: Vec<TimeColumn>,
    pub account: Option<String>,
    pub email: Option<String>,
    pub user_id: Option<i64>,
}

impl RecordDetails {
    pub fn new((id, record): &Rental, now: NaiveDateTime) -> Self {
        let mut times = Vec::with_capacity(3);
        let sources = [
            ("Start", &record.start_time),
            ("Approved", &record.approved_at),
            ("End", &record.end_time),
        ];
        for (label, raw) in sources {
            if let Some(raw) = raw {
                times.push(TimeColumn {
                    label,
                    time: format_time_with_am_pm(raw),
                    ended: label == "End" && record.has_ended(now),
                });
            }
        }

        Self {
            id: id.clone(),
            slot: record.slot_id.clone(),
            times,
            account: record.assign_to.clone(),
            email: record.last_email.clone(),
            user_id: record.user_id,
        }
    }
}
