//! In-memory store for exercising panel workflows without a network

use super::Store;
use crate::error::{PanelError, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    root: Arc<RwLock<Value>>,
    failing_paths: Arc<RwLock<HashSet<String>>>,
}

impl MemoryStore {
    pub fn new(root: Value) -> Self {
        Self {
            root: Arc::new(RwLock::new(root)),
            failing_paths: Arc::default(),
        }
    }

    /// Make every fetch or update of `path` fail
    pub async fn fail_on(&self, path: &str) {
        self.failing_paths.write().await.insert(path.to_string());
    }

    /// Current value at `path`, for assertions
    pub async fn get(&self, path: &str) -> Value {
        let root = self.root.read().await;
        lookup(&root, path).cloned().unwrap_or(Value::Null)
    }

    async fn check(&self, path: &str) -> Result<()> {
        if self.failing_paths.read().await.contains(path) {
            return Err(PanelError::Store {
                path: path.to_string(),
                status: 503,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    segments(path).try_fold(root, |node, segment| node.get(segment))
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.check(path).await?;
        Ok(self.get(path).await)
    }

    async fn update(&self, path: &str, fields: Value) -> Result<()> {
        self.check(path).await?;

        let mut root = self.root.write().await;
        let mut node = &mut *root;
        for segment in segments(path) {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            node = node
                .as_object_mut()
                .map(|map| map.entry(segment).or_insert(Value::Null))
                .ok_or_else(|| PanelError::RecordNotFound(path.to_string()))?;
        }

        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        if let (Some(target), Value::Object(fields)) = (node.as_object_mut(), fields) {
            target.extend(fields);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new(json!({"transactions": {"a": {"slot_id": "s1"}}}));

        store
            .update("/transactions/a", json!({"hidden": true}))
            .await
            .unwrap();

        assert_eq!(
            store.get("/transactions/a").await,
            json!({"slot_id": "s1", "hidden": true})
        );
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let store = MemoryStore::new(json!({}));
        store.fail_on("/cred").await;

        assert!(store.fetch("/cred").await.is_err());
        assert!(store.update("/cred", json!({"usage_count": 1})).await.is_err());
        assert_eq!(store.fetch("/").await.unwrap(), json!({}));
    }
}
