//! REST HTTP client
//!
//! Thin wrapper over `reqwest::Client` with the futures API base URL,
//! a request timeout, and exchange error-body mapping.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::RestConfig;
use crate::error::{ConnectorError, Result};

const BASE_REST_MAIN_URL: &str = "https://fapi.binance.com";
const BASE_REST_TESTNET_URL: &str = "https://testnet.binancefuture.com";

const USER_AGENT: &str = concat!("binance-futures-streams/", env!("CARGO_PKG_VERSION"));

/// Error body the exchange returns on non-2xx responses,
/// e.g. `{"code":-1121,"msg":"Invalid symbol."}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    msg: String,
}

/// HTTP client for the public futures REST endpoints
#[derive(Debug, Clone)]
pub struct RestClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
}

impl RestClient {
    /// Create a client for the network selected by `config`.
    pub fn new(config: &RestConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let base_url = if config.testnet {
            BASE_REST_TESTNET_URL
        } else {
            BASE_REST_MAIN_URL
        };

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Returns the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` and decode the JSON body into `T`. Non-2xx responses are
    /// decoded from the exchange's `{code, msg}` error shape when possible.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "sending REST request");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(api) = serde_json::from_str::<ApiErrorBody>(&body) {
                return Err(ConnectorError::Api {
                    code: api.code,
                    message: api.msg,
                });
            }
            return Err(ConnectorError::Api {
                code: i64::from(status.as_u16()),
                message: body,
            });
        }

        Ok(response.json().await?)
    }
}

impl Default for RestClient {
    fn default() -> Self {
        // The default reqwest builder only fails on TLS backend
        // misconfiguration, which is unrecoverable anyway.
        Self::new(&RestConfig::default()).expect("default REST client construction failed")
    }
}
