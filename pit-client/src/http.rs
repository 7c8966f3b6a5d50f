//! HTTP client for the spreadsheet RPC endpoint
//!
//! Every operation is one POST of a tagged envelope to the same URL. The
//! shared-secret API key is flattened into the request body next to the
//! `type` tag, mirroring the web-app contract.

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{Dependent, LocationTaxonomy, UserProfile};
use shared::request::StoreRequest;
use shared::response::StoreResponse;

/// HTTP client for the spreadsheet web app
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    web_app_url: String,
    api_key: String,
}

/// Request body as posted: payload fields plus the shared secret
#[derive(Serialize)]
struct Envelope<'a> {
    #[serde(flatten)]
    request: &'a StoreRequest,
    #[serde(rename = "apiKey")]
    api_key: &'a str,
}

impl SheetClient {
    /// Create a new sheet client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            web_app_url: config.web_app_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Post one envelope and parse the `{status, data, message}` reply
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: &StoreRequest,
    ) -> ClientResult<StoreResponse<T>> {
        tracing::debug!(kind = request.kind(), "posting store request");

        let envelope = Envelope {
            request,
            api_key: &self.api_key,
        };
        let response = self
            .client
            .post(&self.web_app_url)
            .json(&envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // 401 means the web-app deployment is not shared with "Anyone",
            // not that the user's credentials were wrong.
            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized);
            }
            let text = response.text().await?;
            return Err(ClientError::Internal(text));
        }

        response.json().await.map_err(Into::into)
    }

    /// Post one envelope and unwrap the carried data
    async fn call_data<T: DeserializeOwned>(&self, request: &StoreRequest) -> ClientResult<T> {
        self.call::<T>(request)
            .await?
            .into_result()
            .map_err(ClientError::Rejected)?
            .ok_or_else(|| ClientError::InvalidResponse("missing data".to_string()))
    }

    // ========== Store API ==========

    /// Check credentials against the User sheet
    pub async fn authenticate(&self, username: &str, password: &str) -> ClientResult<UserProfile> {
        self.call_data(&StoreRequest::Auth {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Load all dependents owned by an employee email
    pub async fn fetch_dependents(&self, owner_email: &str) -> ClientResult<Vec<Dependent>> {
        self.call_data(&StoreRequest::GetDependents {
            user_email: owner_email.to_string(),
        })
        .await
    }

    /// Load the province -> ward taxonomy
    pub async fn fetch_location_taxonomy(&self) -> ClientResult<LocationTaxonomy> {
        self.call_data(&StoreRequest::GetLocationData).await
    }

    /// Connection self-test: read one cell and return its value
    pub async fn read_cell(&self, sheet_name: &str, cell: &str) -> ClientResult<serde_json::Value> {
        #[derive(serde::Deserialize)]
        struct ReadCellReply {
            status: shared::response::ResponseStatus,
            #[serde(default)]
            value: Option<serde_json::Value>,
            #[serde(default)]
            message: Option<String>,
        }

        let request = StoreRequest::ReadCell {
            sheet_name: sheet_name.to_string(),
            cell: cell.to_string(),
        };
        tracing::debug!(kind = request.kind(), "posting store request");

        let envelope = Envelope {
            request: &request,
            api_key: &self.api_key,
        };
        let response = self
            .client
            .post(&self.web_app_url)
            .json(&envelope)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let reply: ReadCellReply = response.json().await?;
        match reply.status {
            shared::response::ResponseStatus::Success => reply
                .value
                .ok_or_else(|| ClientError::InvalidResponse("missing cell value".to_string())),
            shared::response::ResponseStatus::Error => Err(ClientError::Rejected(
                reply.message.unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }

    /// Fire-and-forget mutation: only the envelope status is inspected,
    /// carried data is discarded
    pub async fn submit(&self, request: &StoreRequest) -> ClientResult<()> {
        let response = self.call::<serde_json::Value>(request).await?;
        response
            .into_result()
            .map_err(ClientError::Rejected)
            .map(|_| ())
    }
}
