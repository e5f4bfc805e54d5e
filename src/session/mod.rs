// Panel session: one service's store plus the live buckets
use crate::config::Config;
use crate::error::Result;
use crate::models::decode_snapshot;
use crate::panel::{clear_expired, Buckets, ClearOutcome, Refresher};
use crate::store::{HttpStore, Store, TRANSACTIONS_PATH};
use chrono::NaiveDateTime;
use std::sync::Arc;

pub struct PanelSession {
    store: Arc<dyn Store>,
    refresher: Refresher,
    service: String,
}

impl PanelSession {
    /// Connect to the store described by `config`
    pub fn connect(config: &Config) -> Result<Self> {
        let (database_url, service) = config.store_location()?;
        let store = HttpStore::new(database_url, service, config.store.auth_token.clone())?;
        tracing::info!("Connected to {} (service: {})", database_url, service);

        Ok(Self::with_store(
            Arc::new(store),
            service,
            Refresher::new(config.recent_window(), config.refresh_interval()),
        ))
    }

    pub fn with_store(store: Arc<dyn Store>, service: &str, refresher: Refresher) -> Self {
        Self {
            store,
            refresher,
            service: service.to_string(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn buckets(&self) -> &Buckets {
        self.refresher.buckets()
    }

    pub fn refresher_mut(&mut self) -> &mut Refresher {
        &mut self.refresher
    }

    /// Fetch the transactions mapping and reclassify.
    ///
    /// When the fetch fails the previous snapshot is kept and still
    /// reclassified against `now`.
    pub async fn refresh(&mut self, now: NaiveDateTime) -> Result<()> {
        let fetched = self
            .store
            .fetch(TRANSACTIONS_PATH)
            .await
            .and_then(decode_snapshot);

        match fetched {
            Ok(snapshot) => {
                tracing::debug!("Fetched {} transaction entries", snapshot.len());
                self.refresher.set_snapshot(snapshot, now);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Refresh failed, keeping previous snapshot: {}", e);
                self.refresher.tick(now);
                Err(e)
            }
        }
    }

    /// Clear the current expired bucket.
    ///
    /// Once the batch has run the bucket is emptied locally whatever the
    /// per-record results were. An outer failure leaves it untouched.
    pub async fn clear_expired(&mut self) -> Result<ClearOutcome> {
        let expired = self.refresher.buckets().expired.clone();
        let outcome = clear_expired(self.store.as_ref(), &expired).await?;
        self.refresher.clear_expired_locally();
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expiry::parse_timestamp;
    use crate::panel::{clear_notification, Notification};
    use crate::store::memory::MemoryStore;
    use chrono::Duration;
    use serde_json::json;

    fn now(raw: &str) -> NaiveDateTime {
        parse_timestamp(raw).unwrap()
    }

    fn session(store: MemoryStore) -> PanelSession {
        PanelSession::with_store(
            Arc::new(store),
            "rentals",
            Refresher::new(Duration::hours(24), std::time::Duration::from_secs(60)),
        )
    }

    fn seeded() -> MemoryStore {
        MemoryStore::new(json!({
            "acct-1": {"usage_count": 1},
            "transactions": {
                "counter": 3,
                "live": {"end_time": "2024-01-01 11:00:00", "slot_id": "A"},
                "done": {"end_time": "2024-01-01 09:00:00", "slot_id": "B", "assign_to": "acct-1"}
            }
        }))
    }

    #[tokio::test]
    async fn test_refresh_then_clear() {
        let store = seeded();
        let mut session = session(store.clone());

        session.refresh(now("2024-01-01 10:00:00")).await.unwrap();
        assert_eq!(session.buckets().active.len(), 1);
        assert_eq!(session.buckets().expired.len(), 1);

        let result = session.clear_expired().await;
        let notification = clear_notification(&result);
        assert_eq!(notification.title, "Success");
        assert_eq!(
            notification.description,
            "Cleared 1 expired orders. Usage counts updated."
        );
        assert!(session.buckets().expired.is_empty());
        assert_eq!(store.get("/acct-1/usage_count").await, json!(0));

        // The cleared record stays hidden after the next refresh
        session.refresh(now("2024-01-01 10:01:00")).await.unwrap();
        assert!(session.buckets().expired.is_empty());
        assert_eq!(session.buckets().active.len(), 1);
    }

    #[tokio::test]
    async fn test_all_failed_still_empties_bucket_locally() {
        let store = seeded();
        store.fail_on("/transactions/done").await;
        let mut session = session(store);

        session.refresh(now("2024-01-01 10:00:00")).await.unwrap();
        let result = session.clear_expired().await;

        assert!(result.as_ref().unwrap().all_failed());
        assert!(session.buckets().expired.is_empty());
        assert_eq!(clear_notification(&result).title, "Failed to Clear Orders");

        // Not hidden in the store, so it comes back on the next refresh
        session.refresh(now("2024-01-01 10:01:00")).await.unwrap();
        assert_eq!(session.buckets().expired.len(), 1);
    }

    #[tokio::test]
    async fn test_outer_failure_keeps_bucket() {
        let store = seeded();
        let mut session = session(store.clone());
        session.refresh(now("2024-01-01 10:00:00")).await.unwrap();

        store.fail_on("/").await;
        let result = session.clear_expired().await;

        assert!(result.is_err());
        assert_eq!(clear_notification(&result), Notification::clear_aborted());
        assert_eq!(session.buckets().expired.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot_and_ticks() {
        let store = seeded();
        let mut session = session(store.clone());
        session.refresh(now("2024-01-01 10:00:00")).await.unwrap();

        store.fail_on("/transactions").await;
        let result = session.refresh(now("2024-01-01 11:30:00")).await;

        assert!(result.is_err());
        assert!(session.buckets().active.is_empty());
        assert_eq!(session.buckets().expired.len(), 2);
    }
}
