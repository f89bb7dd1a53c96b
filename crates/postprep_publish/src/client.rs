//! reqwest-backed Graph API transport.

use crate::{ContainerId, ContainerRequest, Credentials, GraphApi, GraphResponse, PublishSettings};
use async_trait::async_trait;
use postprep_error::{HttpError, JsonError, PostprepResult};
use reqwest::Client;
use tracing::{debug, instrument};

/// Graph API client posting form-encoded requests.
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
}

impl GraphClient {
    /// Creates a client for the account in `credentials`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(base_url = %settings.api_base_url()))]
    pub fn new(settings: &PublishSettings, credentials: Credentials) -> PostprepResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| HttpError::new(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: settings.api_base_url().trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.credentials.account_id(), path)
    }

    async fn post_form(
        &self,
        path: &str,
        mut form: Vec<(&'static str, String)>,
    ) -> PostprepResult<GraphResponse> {
        let url = self.endpoint(path);
        form.push(("access_token", self.credentials.access_token().clone()));

        let response = self
            .client
            .post(&url)
            .form(&form)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HttpError::new(format!("Failed to read response from {}: {}", url, e)))?;
        debug!(%status, body = %body, "Graph API response");

        serde_json::from_str(&body).map_err(|e| {
            JsonError::new(format!("Unexpected response from {} ({}): {}", url, status, e)).into()
        })
    }
}

#[async_trait]
impl GraphApi for GraphClient {
    #[instrument(skip(self, request))]
    async fn create_container(&self, request: &ContainerRequest) -> PostprepResult<GraphResponse> {
        self.post_form("media", request.to_form()?).await
    }

    #[instrument(skip(self, creation_id), fields(creation_id = %creation_id))]
    async fn publish_container(&self, creation_id: &ContainerId) -> PostprepResult<GraphResponse> {
        self.post_form("media_publish", vec![("creation_id", creation_id.0.clone())])
            .await
    }
}
