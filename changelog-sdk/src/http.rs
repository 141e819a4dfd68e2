//! [`ChangelogRepository`] over the REST collection resource.

use crate::config::ClientConfig;
use crate::repository::ChangelogRepository;
use async_trait::async_trait;
use changelog_core::{
    validate, Changelog, ChangelogFilter, ChangelogId, ChangelogInput, Error, PublishRequest,
    Result,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct HttpRepository {
    base_url: String,
    client: Client,
}

/// Error payloads: this server sends `error`, FastAPI-style servers send `detail`.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<serde_json::Value>,
}

impl HttpRepository {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.normalized_base_url().to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/api/changelogs/", self.base_url)
    }

    fn item_url(&self, id: ChangelogId) -> String {
        format!("{}/api/changelogs/{}", self.base_url, id)
    }

    /// Sends `request` and returns the response only if it is a 2xx. A 404 is
    /// `NotFound` when the request targeted a specific changelog.
    async fn send(&self, request: RequestBuilder, target: Option<ChangelogId>) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::request(e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Response received");

        if status.is_success() {
            Ok(response)
        } else {
            Err(Self::error_from_response(response, status, target).await)
        }
    }

    async fn error_from_response(
        response: Response,
        status: StatusCode,
        target: Option<ChangelogId>,
    ) -> Error {
        let message = match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                error: Some(error), ..
            }) => error,
            Ok(ErrorBody {
                detail: Some(detail),
                ..
            }) => match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            },
            _ => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        match (status, target) {
            (StatusCode::NOT_FOUND, Some(id)) => Error::NotFound(id.to_string()),
            _ => Error::request(
                Some(status.as_u16()),
                format!("{} ({})", message, status.as_u16()),
            ),
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        response.json().await.map_err(|e| {
            Error::request(
                Some(status.as_u16()),
                format!("Failed to parse response: {}", e),
            )
        })
    }
}

#[async_trait]
impl ChangelogRepository for HttpRepository {
    async fn list(&self, filter: ChangelogFilter) -> Result<Vec<Changelog>> {
        let url = if filter.published_only {
            format!("{}?published_only=true", self.collection_url())
        } else {
            self.collection_url()
        };

        debug!(%url, "Listing changelogs");
        let response = self.send(self.client.get(&url), None).await?;
        Self::parse(response).await
    }

    async fn get(&self, id: ChangelogId) -> Result<Changelog> {
        let response = self.send(self.client.get(self.item_url(id)), Some(id)).await?;
        Self::parse(response).await
    }

    async fn create(&self, input: ChangelogInput) -> Result<Changelog> {
        validate(&input).into_result()?;

        debug!(version = %input.version, "Creating changelog");
        let response = self
            .send(self.client.post(self.collection_url()).json(&input), None)
            .await?;
        Self::parse(response).await
    }

    async fn update(&self, id: ChangelogId, input: ChangelogInput) -> Result<Changelog> {
        validate(&input).into_result()?;

        debug!(%id, "Updating changelog");
        let response = self
            .send(self.client.put(self.item_url(id)).json(&input), Some(id))
            .await?;
        Self::parse(response).await
    }

    async fn set_published(&self, id: ChangelogId, published: bool) -> Result<Changelog> {
        debug!(%id, published, "Setting publish state");
        let response = self
            .send(
                self.client
                    .patch(format!("{}/publish", self.item_url(id)))
                    .json(&PublishRequest { published }),
                Some(id),
            )
            .await?;
        Self::parse(response).await
    }

    async fn remove(&self, id: ChangelogId) -> Result<()> {
        debug!(%id, "Deleting changelog");
        self.send(self.client.delete(self.item_url(id)), Some(id))
            .await?;
        Ok(())
    }
}
