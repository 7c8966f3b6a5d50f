//! Client configuration

/// Configuration for connecting to the spreadsheet web app
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Deployed web-app URL (the single RPC endpoint)
    pub web_app_url: String,

    /// Shared-secret API key attached to every request
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(web_app_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            web_app_url: web_app_url.into(),
            api_key: api_key.into(),
            timeout: 30,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create a sheet client from this configuration
    pub fn build_client(&self) -> super::SheetClient {
        super::SheetClient::new(self)
    }
}
