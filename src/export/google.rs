//! Google Docs / Drive adapter
//!
//! REST calls for document creation (Docs v1), text insertion (Docs v1
//! `batchUpdate`) and folder membership (Drive v3 `files.update` with
//! `addParents`). Authentication is an OAuth bearer token supplied from
//! configuration.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{DocumentBackend, DocumentSession};
use crate::config::{Credentials, DocumentsConfig};
use crate::types::{
    DocumentId, ErrorClassifier, IdeaError, Result, Service, UpstreamError,
};

/// Factory for authenticated Google sessions
pub struct GoogleWorkspace {
    access_token: SecretString,
    docs_api_base: String,
    drive_api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GoogleWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleWorkspace")
            .field("access_token", &"[REDACTED]")
            .field("docs_api_base", &self.docs_api_base)
            .field("drive_api_base", &self.drive_api_base)
            .finish()
    }
}

impl GoogleWorkspace {
    pub fn new(config: &DocumentsConfig, credentials: &Credentials) -> Result<Self> {
        let access_token = SecretString::from(credentials.google_access_token()?.expose_secret());

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| IdeaError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            access_token,
            docs_api_base: normalize_base(&config.docs_api_base)?,
            drive_api_base: normalize_base(&config.drive_api_base)?,
            client,
        })
    }
}

impl DocumentBackend for GoogleWorkspace {
    fn session(&self) -> Result<Box<dyn DocumentSession>> {
        Ok(Box::new(GoogleSession {
            access_token: SecretString::from(self.access_token.expose_secret()),
            docs_api_base: self.docs_api_base.clone(),
            drive_api_base: self.drive_api_base.clone(),
            client: self.client.clone(),
        }))
    }
}

fn normalize_base(base: &str) -> Result<String> {
    let url = Url::parse(base)
        .map_err(|e| IdeaError::Config(format!("Invalid API base '{}': {}", base, e)))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

/// One authenticated handle used for every step of an export
pub struct GoogleSession {
    access_token: SecretString,
    docs_api_base: String,
    drive_api_base: String,
    client: reqwest::Client,
}

impl GoogleSession {
    async fn send(
        &self,
        service: Service,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response> {
        let response = request
            .bearer_auth(self.access_token.expose_secret())
            .send()
            .await
            .map_err(|e| UpstreamError::transport(service, &e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::from_http(service, status, &body).into());
        }

        Ok(response)
    }
}

#[async_trait]
impl DocumentSession for GoogleSession {
    async fn create_document(&self, title: &str) -> Result<DocumentId> {
        let url = format!("{}/v1/documents", self.docs_api_base);
        debug!("Creating document '{}'", title);

        let response = self
            .send(
                Service::Documents,
                self.client.post(&url).json(&json!({ "title": title })),
            )
            .await?;

        let created: CreatedDocument = response.json().await.map_err(|e| {
            UpstreamError::malformed(
                Service::Documents,
                format!("Failed to parse document response: {}", e),
            )
        })?;

        created
            .document_id
            .filter(|id| !id.is_empty())
            .map(DocumentId::new)
            .ok_or_else(|| {
                UpstreamError::malformed(Service::Documents, "No documentId in response").into()
            })
    }

    async fn insert_text(&self, document_id: &DocumentId, index: u32, text: &str) -> Result<()> {
        let url = format!(
            "{}/v1/documents/{}:batchUpdate",
            self.docs_api_base, document_id
        );
        debug!("Inserting {} chars into {}", text.len(), document_id);

        let body = json!({
            "requests": [
                {
                    "insertText": {
                        "location": { "index": index },
                        "text": text
                    }
                }
            ]
        });

        self.send(Service::Documents, self.client.post(&url).json(&body))
            .await?;
        Ok(())
    }

    async fn add_to_folder(&self, document_id: &DocumentId, folder_id: &str) -> Result<()> {
        let url = format!("{}/drive/v3/files/{}", self.drive_api_base, document_id);
        debug!("Adding {} to folder {}", document_id, folder_id);

        self.send(
            Service::Drive,
            self.client
                .patch(&url)
                .query(&[("addParents", folder_id), ("supportsAllDrives", "true")])
                .json(&json!({})),
        )
        .await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedDocument {
    document_id: Option<String>,
}
