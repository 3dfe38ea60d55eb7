//! HTTP gateway to the dashboard backend.

use async_trait::async_trait;
use postdeck_core::{
    DeckError, DeckResult, Period, PostDraft, PostId, PostPatch, PostRecord, PostsGateway,
};
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::warn;

/// JSON API client for the dashboard backend.
pub struct HttpPostsGateway {
    http: Client,
    base_url: String,
}

impl HttpPostsGateway {
    pub fn new(base_url: &str) -> HttpPostsGateway {
        HttpPostsGateway {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check(response: Response) -> DeckResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(DeckError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn record_from(response: Response) -> DeckResult<PostRecord> {
        Self::check(response)
            .await?
            .json::<PostRecord>()
            .await
            .map_err(|e| DeckError::Network(format!("unreadable response: {e}")))
    }
}

fn transport(err: reqwest::Error) -> DeckError {
    DeckError::Network(err.to_string())
}

#[async_trait]
impl PostsGateway for HttpPostsGateway {
    async fn fetch_period(&self, period: Period) -> DeckResult<Vec<PostRecord>> {
        let response = self
            .http
            .get(self.url("/api/posts"))
            .query(&[
                ("year", period.year().to_string()),
                ("month", period.month().to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;

        let values: Vec<Value> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| DeckError::Network(format!("unreadable response: {e}")))?;

        // Decode element by element so one bad record doesn't sink the fetch.
        Ok(values
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<PostRecord>(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(error = %err, "dropping undecodable post record");
                    None
                }
            })
            .collect())
    }

    async fn create_post(&self, draft: &PostDraft) -> DeckResult<PostRecord> {
        let response = self
            .http
            .post(self.url("/api/posts"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        Self::record_from(response).await
    }

    async fn update_post(&self, id: &PostId, patch: &PostPatch) -> DeckResult<PostRecord> {
        let response = self
            .http
            .put(self.url(&format!("/api/posts/{id}")))
            .json(patch)
            .send()
            .await
            .map_err(transport)?;
        Self::record_from(response).await
    }

    async fn delete_post(&self, id: &PostId) -> DeckResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/posts/{id}")))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn approve_post(&self, id: &PostId) -> DeckResult<PostRecord> {
        let response = self
            .http
            .post(self.url(&format!("/api/posts/approve/{id}")))
            .send()
            .await
            .map_err(transport)?;
        Self::record_from(response).await
    }

    async fn reject_post(&self, id: &PostId) -> DeckResult<PostRecord> {
        let response = self
            .http
            .post(self.url(&format!("/api/posts/reject/{id}")))
            .send()
            .await
            .map_err(transport)?;
        Self::record_from(response).await
    }
}
