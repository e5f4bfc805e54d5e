// Remote document store access
mod http;
#[cfg(test)]
pub mod memory;

pub use http::HttpStore;

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Path of the transactions mapping, relative to the service root
pub const TRANSACTIONS_PATH: &str = "/transactions";

/// Store path of a single transaction record
pub fn transaction_path(id: &str) -> String {
    format!("{}/{}", TRANSACTIONS_PATH, id)
}

/// Store path of a credential, which lives directly under the service root
pub fn credential_path(key: &str) -> String {
    format!("/{}", key)
}

/// Read/merge access to a document store scoped to one service.
///
/// Paths are rooted at the service, so `/` is the whole service tree and
/// `/transactions/{id}` a single record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Snapshot of the tree rooted at `path` (`Value::Null` if absent)
    async fn fetch(&self, path: &str) -> Result<Value>;

    /// Merge `fields` into the object at `path`
    async fn update(&self, path: &str, fields: Value) -> Result<()>;
}
