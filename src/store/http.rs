use super::Store;
use crate::error::{PanelError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

/// Document store spoken to over the Realtime Database REST dialect.
///
/// `GET {database_url}/{service}{path}.json` reads a subtree and
/// `PATCH` on the same URL merges fields into it.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    database_url: String,
    service: String,
    auth_token: Option<String>,
}

impl HttpStore {
    pub fn new(database_url: &str, service: &str, auth_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("slotwatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            database_url: database_url.trim_end_matches('/').to_string(),
            service: service.trim_matches('/').to_string(),
            auth_token,
        })
    }

    /// REST URL for a service-relative path
    fn url_for(&self, path: &str) -> String {
        let mut url = self.database_url.clone();

        let segments = std::iter::once(self.service.as_str())
            .chain(path.split('/'))
            .filter(|segment| !segment.is_empty());
        for segment in segments {
            url.push('/');
            url.push_str(&urlencoding::encode(segment));
        }

        url.push_str(".json");
        url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }

    async fn check(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(PanelError::Store {
            path: path.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl Store for HttpStore {
    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path);
        tracing::debug!("Fetching {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = Self::check(path, response).await?;

        Ok(response.json().await?)
    }

    async fn update(&self, path: &str, fields: Value) -> Result<()> {
        let url = self.url_for(path);
        tracing::debug!("Updating {} with {}", url, fields);

        let response = self
            .authorize(self.client.patch(&url))
            .json(&fields)
            .send()
            .await?;
        Self::check(path, response).await?;

        Ok(())
    }
}
