use super::retry::{with_retry, AttemptError};
use crate::ports::outbound::LifecycleRepository;
use crate::shared::error::AppStreamError;
use crate::shared::Result;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_SSO_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";
pub const DEFAULT_CLIENT_ID: &str = "rhsm-api";
pub const DEFAULT_APPSTREAMS_URL: &str =
    "https://console.redhat.com/api/roadmap/v1/lifecycle/app-streams";

/// Everything the client needs, passed in explicitly at construction
#[derive(Clone)]
pub struct FetchConfig {
    pub sso_token_url: String,
    pub client_id: String,
    pub appstreams_url: String,
    pub offline_token: String,
    /// Honor HTTP(S)_PROXY / NO_PROXY from the environment
    pub trust_env: bool,
    pub max_retries: u32,
    pub timeout: Duration,
    pub retry_base_delay: Duration,
}

impl FetchConfig {
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    pub fn new(offline_token: impl Into<String>) -> Self {
        Self {
            sso_token_url: DEFAULT_SSO_TOKEN_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            appstreams_url: DEFAULT_APPSTREAMS_URL.to_string(),
            offline_token: offline_token.into(),
            trust_env: false,
            max_retries: Self::DEFAULT_MAX_RETRIES,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

// Hand-written so the offline token never ends up in logs
impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("sso_token_url", &self.sso_token_url)
            .field("client_id", &self.client_id)
            .field("appstreams_url", &self.appstreams_url)
            .field("offline_token", &"<redacted>")
            .field("trust_env", &self.trust_env)
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
}

/// RedHatLifecycleClient adapter for the Red Hat Roadmap lifecycle API
///
/// Exchanges the offline token for a short-lived access token at the SSO
/// endpoint, then downloads the AppStream lifecycle payload with it.
/// Both requests are retried on transient failures.
pub struct RedHatLifecycleClient {
    client: Client,
    config: FetchConfig,
}

impl RedHatLifecycleClient {
    /// Creates a client for the given configuration
    ///
    /// # Errors
    /// Returns `AppStreamError::MissingOfflineToken` for an empty token, or an
    /// error if the HTTP client cannot be built.
    pub fn new(config: FetchConfig) -> Result<Self> {
        if config.offline_token.trim().is_empty() {
            return Err(AppStreamError::MissingOfflineToken.into());
        }

        let user_agent = format!("appstream-check/{}", env!("CARGO_PKG_VERSION"));
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(user_agent);
        if !config.trust_env {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    fn token_request_body(&self) -> String {
        [
            ("grant_type", "refresh_token"),
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", self.config.offline_token.trim()),
        ]
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }

    fn login(&self) -> Result<String> {
        let body = self.token_request_body();

        with_retry("SSO token exchange", self.config.max_retries, self.config.retry_base_delay, |attempt| {
            debug!(attempt, url = %self.config.sso_token_url, "requesting access token");
            let response = self
                .client
                .post(&self.config.sso_token_url)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.clone())
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().unwrap_or_default();
                let error = AppStreamError::AuthenticationFailed {
                    status: status.as_u16(),
                    body: text,
                };
                return Err(AttemptError::from_status(status, error.into()));
            }

            let token: TokenResponse = response.json()?;
            token
                .access_token
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    AttemptError::Fatal(
                        AppStreamError::AuthenticationFailed {
                            status: status.as_u16(),
                            body: "response is missing access_token".to_string(),
                        }
                        .into(),
                    )
                })
        })
    }

    fn get_appstreams(&self, access_token: &str) -> Result<serde_json::Value> {
        with_retry("AppStreams request", self.config.max_retries, self.config.retry_base_delay, |attempt| {
            debug!(attempt, url = %self.config.appstreams_url, "requesting lifecycle data");
            let response = self
                .client
                .get(&self.config.appstreams_url)
                .bearer_auth(access_token)
                .header(ACCEPT, "application/json")
                .send()?;

            let status = response.status();
            if !status.is_success() {
                let text = response.text().unwrap_or_default();
                let error = AppStreamError::LifecycleApiError {
                    status: status.as_u16(),
                    body: text,
                };
                return Err(AttemptError::from_status(status, error.into()));
            }

            Ok(response.json::<serde_json::Value>()?)
        })
    }
}

impl LifecycleRepository for RedHatLifecycleClient {
    fn fetch_payload(&self) -> Result<serde_json::Value> {
        let access_token = self.login()?;
        let payload = self.get_appstreams(&access_token)?;

        let count = payload
            .pointer("/meta/count")
            .map(|c| c.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        info!(count = %count, "AppStreams response received");
        Ok(payload)
    }
}
