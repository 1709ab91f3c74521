//! Authenticated HTTP transport with rate-limit retries.
//!
//! This is the single place where remote failures are classified into the
//! error taxonomy. Resource clients delegate every call here and never
//! reinterpret errors.

use crate::config::{GatewayConfig, MAX_RATE_LIMIT_RETRIES};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("holded-gateway/", env!("CARGO_PKG_VERSION"));

/// Header carrying the API key. Holded uses a custom header, not a bearer
/// scheme.
const API_KEY_HEADER: &str = "key";

/// Asynchronous HTTP transport for the Holded API.
///
/// Stateless apart from its immutable configuration; a single instance can
/// be shared freely across concurrent callers. A call that backs off after
/// a 429 suspends only itself.
#[derive(Clone)]
pub struct Transport {
    http: Client,
    base_url: String,
    api_key: SecretString,
    retry_base_delay: Duration,
    max_rate_limit_retries: u32,
}

impl Transport {
    /// Build a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// underlying HTTP client cannot be constructed.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        // Validates the URL shape even when the config was built by hand.
        config.parse_base_url()?;

        let http = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|err| Error::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            retry_base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_rate_limit_retries: MAX_RATE_LIMIT_RETRIES,
        })
    }

    /// Return the configured base URL (without a trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET request and decode the JSON response.
    ///
    /// Query pairs are appended as given; builders upstream omit absent
    /// parameters so they never reach the query string.
    pub async fn get<T>(&self, path: &str, query: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.execute_json(Method::GET, path, query, None).await?;
        decode(path, value)
    }

    /// Issue a POST request with an optional JSON body.
    pub async fn post<T>(&self, path: &str, body: Option<&Value>) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self.execute_json(Method::POST, path, &[], body).await?;
        decode(path, value)
    }

    /// Issue a PUT request with a JSON body.
    pub async fn put<T>(&self, path: &str, body: &Value) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let value = self
            .execute_json(Method::PUT, path, &[], Some(body))
            .await?;
        decode(path, value)
    }

    /// Issue a DELETE request. The remote response shape varies per
    /// resource, so the raw JSON value is returned.
    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.execute_json(Method::DELETE, path, &[], None).await
    }

    /// Issue a GET request and return the raw response bytes (PDF
    /// downloads, product images). Failures run through the same
    /// classification as JSON endpoints.
    pub async fn get_binary(&self, path: &str) -> Result<Vec<u8>> {
        let response = self
            .execute_with_retry(Method::GET, path, &[], None)
            .await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Execute a request and interpret the successful body as JSON.
    ///
    /// An empty body yields [`Value::Null`]; a body that is not valid JSON
    /// is returned verbatim as a string, since a few Holded endpoints
    /// respond with plain text.
    async fn execute_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<Value> {
        let response = self.execute_with_retry(method, path, query, body).await?;
        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Bounded retry loop around a single logical request.
    ///
    /// Only 429 responses are retried, at most `max_rate_limit_retries`
    /// times. Every other non-success status is classified and returned
    /// immediately.
    async fn execute_with_retry(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let url = self.build_url(path)?;
        let mut attempt: u32 = 0;

        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .header(API_KEY_HEADER, self.api_key.expose_secret());

            if !query.is_empty() {
                request = request.query(query);
            }

            if let Some(payload) = body {
                request = request.json(payload);
            } else if matches!(method, Method::POST | Method::PUT) {
                request = request.header(CONTENT_TYPE, "application/json");
            }

            debug!(%method, path, attempt, "sending request");

            let response = request.send().await?;
            let status = response.status();

            if status != StatusCode::TOO_MANY_REQUESTS {
                if status.is_success() {
                    return Ok(response);
                }
                return Err(classify_failure(status, response).await);
            }

            let retry_after = parse_retry_after(response.headers());

            if attempt >= self.max_rate_limit_retries {
                warn!(path, attempts = attempt + 1, "rate limited, retries exhausted");
                return Err(Error::RateLimit {
                    message: "Rate limit exceeded".to_string(),
                    retry_after_secs: retry_after,
                    body: read_body(response).await,
                });
            }

            let delay = match retry_after {
                Some(secs) => Duration::from_secs(secs),
                None => self.retry_base_delay * (attempt + 1),
            };

            debug!(path, attempt, ?delay, "rate limited, backing off");
            sleep(delay).await;
            attempt += 1;
        }
    }

    fn build_url(&self, path: &str) -> Result<reqwest::Url> {
        // Paths are absolute (`/invoicing/v1/...`) and appended to the base
        // URL as-is; `Url::join` would drop the `/api` prefix.
        reqwest::Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|err| Error::InvalidInput(format!("Invalid request path `{path}`: {err}")))
    }
}

/// Map a non-success status to an error, preserving the raw body.
async fn classify_failure(status: StatusCode, response: Response) -> Error {
    let body = read_body(response).await;
    match status {
        StatusCode::UNAUTHORIZED => Error::Auth {
            message: "Invalid or missing API key".to_string(),
            body,
        },
        StatusCode::NOT_FOUND => Error::NotFound {
            message: "Resource not found".to_string(),
            body,
        },
        _ => Error::Api {
            status: status.as_u16(),
            message: status.to_string(),
            body,
        },
    }
}

/// Read a response body as JSON, falling back to plain text, falling back
/// to absent.
async fn read_body(response: Response) -> Option<Value> {
    let text = response.text().await.ok()?;
    if text.is_empty() {
        return None;
    }
    Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

fn parse_retry_after(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

fn decode<T>(path: &str, value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value)
        .map_err(|err| Error::Parse(format!("Failed to decode response for `{path}`: {err}")))
}
