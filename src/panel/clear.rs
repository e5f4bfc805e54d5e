use super::{Notification, Rental, Severity};
use crate::error::{PanelError, Result};
use crate::models::{Credential, Record};
use crate::store::{credential_path, transaction_path, Store};
use futures::future::join_all;
use serde_json::{json, Value};

/// A record that could not be cleared
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearFailure {
    pub id: String,
    pub error: String,
}

/// Per-record result of a bulk clear
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearOutcome {
    pub succeeded: Vec<String>,
    pub failed: Vec<ClearFailure>,
}

impl ClearOutcome {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_failed(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }

    /// Toast summarizing the outcome
    pub fn notification(&self) -> Notification {
        let cleared = self.succeeded.len();
        let errors = self.failed.len();

        if errors == 0 {
            Notification::new(
                "Success",
                format!("Cleared {} expired orders. Usage counts updated.", cleared),
                Severity::Default,
            )
        } else if cleared > 0 {
            Notification::new(
                "Partially Completed",
                format!(
                    "Cleared {} orders, but {} failed. Some usage counts updated.",
                    cleared, errors
                ),
                Severity::Default,
            )
        } else {
            Notification::new(
                "Failed to Clear Orders",
                "Could not clear any expired orders. Please try again.",
                Severity::Destructive,
            )
        }
    }
}

/// Hide every expired record and release its credential usage.
///
/// The credential tree is read once up front; failing that read aborts the
/// whole operation before anything is written. After that each record is
/// processed concurrently and independently: a failing record is logged and
/// counted without stopping or rolling back the others.
pub async fn clear_expired<S>(store: &S, expired: &[Rental]) -> Result<ClearOutcome>
where
    S: Store + ?Sized,
{
    let credentials = store.fetch("/").await.map_err(|e| {
        tracing::error!("Error clearing expired orders: {}", e);
        e
    })?;

    tracing::info!("Clearing {} expired records", expired.len());

    let results = join_all(
        expired
            .iter()
            .map(|(id, record)| clear_one(store, &credentials, id, record)),
    )
    .await;

    let mut outcome = ClearOutcome::default();
    for ((id, _), result) in expired.iter().zip(results) {
        match result {
            Ok(()) => outcome.succeeded.push(id.clone()),
            Err(e) => {
                tracing::error!("Error processing transaction {}: {}", id, e);
                outcome.failed.push(ClearFailure {
                    id: id.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        "Cleared {} of {} records",
        outcome.succeeded.len(),
        outcome.attempted()
    );
    Ok(outcome)
}

async fn clear_one<S>(store: &S, credentials: &Value, id: &str, record: &Record) -> Result<()>
where
    S: Store + ?Sized,
{
    store
        .update(&transaction_path(id), json!({ "hidden": true }))
        .await?;

    let Some(key) = record.assign_to.as_deref().filter(|key| !key.is_empty()) else {
        return Ok(());
    };

    // The record stays hidden; only the release fails
    if credentials.is_null() {
        return Err(PanelError::CredentialsUnavailable(key.to_string()));
    }

    // Decrements are computed from the snapshot taken before the batch started
    match Credential::lookup(credentials, key).and_then(|c| c.decremented_usage()) {
        Some(usage_count) => {
            tracing::debug!("Setting usage_count of {} to {}", key, usage_count);
            store
                .update(&credential_path(key), json!({ "usage_count": usage_count }))
                .await
        }
        None => {
            tracing::debug!("Credential {} has no numeric usage_count, skipping", key);
            Ok(())
        }
    }
}
