//! HTTP client for the destination Docs API.

use std::time::Duration;

use juicescout_shared::{DestinationConfig, MigrationError, Result};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::models::{
    CategoriesEnvelope, Collection, CollectionsEnvelope, CreateResponse, RemoteCategory,
};
use crate::payload::{CategoryPayload, encode};

/// User-Agent string for destination requests.
const USER_AGENT: &str = concat!("JuiceScout/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for one destination account.
pub struct ScoutClient {
    client: Client,
    base_url: Url,
    api_key: String,
    password: String,
}

impl ScoutClient {
    /// Create a client from the resolved destination configuration.
    pub fn new(config: &DestinationConfig) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| MigrationError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            password: config.password.clone(),
        })
    }

    /// List the collections of the account, in API order.
    #[instrument(skip_all)]
    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        let url = self.endpoint("v1/collections")?;
        let envelope: CollectionsEnvelope = self.get_json(url).await?;
        debug!(count = envelope.collections.items.len(), "listed collections");
        Ok(envelope.collections.items)
    }

    /// List every category of a collection, following pagination.
    #[instrument(skip(self))]
    pub async fn list_categories(&self, collection_id: &str) -> Result<Vec<RemoteCategory>> {
        let base = self.endpoint(&format!("v1/collections/{collection_id}/categories"))?;
        let mut categories = Vec::new();
        let mut page = 1u32;

        loop {
            let mut url = base.clone();
            url.query_pairs_mut().append_pair("page", &page.to_string());

            let envelope: CategoriesEnvelope = self.get_json(url).await?;
            let listing = envelope.categories;
            let fetched = listing.items.len();
            categories.extend(listing.items);

            debug!(page, pages = listing.pages, fetched, "listed categories page");

            page += 1;
            if fetched == 0 || page > listing.pages {
                break;
            }
        }

        Ok(categories)
    }

    /// Create a category in a collection.
    pub async fn create_category(&self, collection_id: &str, name: &str) -> Result<CreateResponse> {
        let body = encode(&CategoryPayload {
            collection_id,
            name,
        })?;
        self.post_json("v1/categories", body).await
    }

    /// Create an article from an already-encoded payload.
    pub async fn create_article(&self, payload: &str) -> Result<CreateResponse> {
        self.post_json("v1/articles", payload.to_string()).await
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| MigrationError::config(format!("invalid endpoint '{path}': {e}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.api_key, Some(&self.password))
            .send()
            .await
            .map_err(|e| MigrationError::Transport(format!("{url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MigrationError::Transport(format!("{url}: failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(MigrationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            MigrationError::validation(format!("{url}: unexpected response body: {e}"))
        })
    }

    async fn post_json(&self, path: &str, body: String) -> Result<CreateResponse> {
        let url = self.endpoint(path)?;
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&self.api_key, Some(&self.password))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| MigrationError::Transport(format!("{url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| MigrationError::Transport(format!("{url}: failed to read body: {e}")))?;

        Ok(CreateResponse { status, body })
    }
}
