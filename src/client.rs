//! Client and request pipeline: URL construction, transport with bounded
//! retry, and uniform response classification.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::{Assistants, Files, Messages, Runs, Threads};
use crate::config::ClientConfig;
use crate::error::{Result, TychoError};
use crate::types::{Page, PageRequest};
use crate::util::retry::RetryPolicy;

/// The two fixed header profiles: mutating calls send a JSON content type,
/// reads only the feature-version header. Both carry the bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeaderProfile {
    Mutate,
    Read,
}

/// Client for the Assistants API.
///
/// Stateless and safe for concurrent use: configuration and header profiles
/// are built once at construction and read-only afterwards, and each call
/// owns its own request/response lifecycle.
pub struct Client {
    http: reqwest::Client,
    config: ClientConfig,
    retry: RetryPolicy,
    mutate_headers: HeaderMap,
    read_headers: HeaderMap,
}

impl Client {
    /// Build a client from a configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TychoError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let (mutate_headers, read_headers) = build_header_profiles(&config)?;

        Ok(Self {
            http,
            config,
            retry: RetryPolicy::default(),
            mutate_headers,
            read_headers,
        })
    }

    /// Build a client straight from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // Resource facades.

    pub fn assistants(&self) -> Assistants<'_> {
        Assistants::new(self)
    }

    pub fn threads(&self) -> Threads<'_> {
        Threads::new(self)
    }

    pub fn messages(&self, thread_id: impl Into<String>) -> Messages<'_> {
        Messages::new(self, thread_id.into())
    }

    pub fn runs(&self, thread_id: impl Into<String>) -> Runs<'_> {
        Runs::new(self, thread_id.into())
    }

    pub fn files(&self) -> Files<'_> {
        Files::new(self)
    }

    // Request pipeline.

    /// Resolve a resource path against the configured endpoint prefix.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}{}", self.config.base_url_slashed(), path))
            .map_err(|e| TychoError::Configuration(format!("invalid request URL: {e}")))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let (status, body) = self.send(Method::GET, url, None, HeaderProfile::Read).await?;
        decode_payload(status, &body)
    }

    pub(crate) async fn get_json_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let mut url = self.url(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        let (status, body) = self.send(Method::GET, url, None, HeaderProfile::Read).await?;
        decode_payload(status, &body)
    }

    /// One page of a list operation; the cursor is validated before any
    /// request is built, and only non-default fields reach the query string.
    pub(crate) async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: &PageRequest,
    ) -> Result<Page<T>> {
        page.validate()?;
        let mut url = self.url(path)?;
        let pairs = page.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let (status, body) = self.send(Method::GET, url, None, HeaderProfile::Read).await?;
        decode_payload(status, &body)
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let bytes = serde_json::to_vec(body)?;
        let (status, body) = self
            .send(Method::POST, url, Some(bytes), HeaderProfile::Mutate)
            .await?;
        decode_payload(status, &body)
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        let (status, body) = self
            .send(Method::POST, url, None, HeaderProfile::Mutate)
            .await?;
        decode_payload(status, &body)
    }

    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let url = self.url(path)?;
        let (status, body) = self
            .send(Method::DELETE, url, None, HeaderProfile::Read)
            .await?;
        decode_payload(status, &body)
    }

    /// Raw success body, for non-JSON payloads (file content).
    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path)?;
        let (_, body) = self.send(Method::GET, url, None, HeaderProfile::Read).await?;
        Ok(body)
    }

    /// Multipart upload path, distinct from the JSON profiles.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Vec<u8>,
        boundary: &str,
    ) -> Result<T> {
        let url = self.url(path)?;
        let mut headers = self.read_headers.clone();
        let content_type =
            HeaderValue::from_str(&format!("multipart/form-data; boundary={boundary}")).map_err(
                |e| TychoError::InvalidArgument(format!("failed to build multipart content-type: {e}")),
            )?;
        headers.insert(CONTENT_TYPE, content_type);
        let (status, body) = self
            .send_with_headers(Method::POST, url, Some(body), headers)
            .await?;
        decode_payload(status, &body)
    }

    /// One logical exchange: bounded transport retries around a single
    /// attempt, then classification of the response. The body is serialized
    /// once and cloned per attempt, never mutated between retries.
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        profile: HeaderProfile,
    ) -> Result<(u16, Vec<u8>)> {
        let headers = match profile {
            HeaderProfile::Mutate => self.mutate_headers.clone(),
            HeaderProfile::Read => self.read_headers.clone(),
        };
        self.send_with_headers(method, url, body, headers).await
    }

    async fn send_with_headers(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
        headers: HeaderMap,
    ) -> Result<(u16, Vec<u8>)> {
        tracing::debug!(%method, %url, "dispatching request");

        let response = self
            .retry
            .execute(|| {
                let mut request = self
                    .http
                    .request(method.clone(), url.clone())
                    .headers(headers.clone());
                if let Some(ref bytes) = body {
                    request = request.body(bytes.clone());
                }
                async move { request.send().await.map_err(TychoError::from) }
            })
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(TychoError::from)?;
        classify(status, &bytes)?;
        Ok((status, bytes.to_vec()))
    }
}

fn build_header_profiles(config: &ClientConfig) -> Result<(HeaderMap, HeaderMap)> {
    let mut read = HeaderMap::new();

    let auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
        .map_err(|e| TychoError::Configuration(format!("invalid API key: {e}")))?;
    read.insert(AUTHORIZATION, auth);

    if let Some(ref org) = config.organization {
        let value = HeaderValue::from_str(org)
            .map_err(|e| TychoError::Configuration(format!("invalid organization: {e}")))?;
        read.insert("OpenAI-Organization", value);
    }

    let beta = HeaderValue::from_str(&config.beta_version)
        .map_err(|e| TychoError::Configuration(format!("invalid beta version: {e}")))?;
    read.insert("OpenAI-Beta", beta);

    let mut mutate = read.clone();
    mutate.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok((mutate, read))
}

/// Provider error envelope: `{"error":{message,type,param,code}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    error_type: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

/// Split a raw response into success or a classified failure.
///
/// 200/201/204 are success. Anything else is parsed as the provider error
/// envelope; a malformed or absent envelope degrades to a message built from
/// the status code alone, so the failure message always names the status.
fn classify(status: u16, body: &[u8]) -> Result<()> {
    if matches!(status, 200 | 201 | 204) {
        return Ok(());
    }

    let base = format!("HTTP request failed with status code: {status}");
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => {
            let message = match error.message {
                Some(ref detail) if !detail.is_empty() => format!("{base}. {detail}"),
                _ => base,
            };
            Err(TychoError::Api {
                status,
                message,
                error_type: error.error_type,
                code: error.code,
                param: error.param,
            })
        }
        Err(_) => Err(TychoError::Api {
            status,
            message: base,
            error_type: None,
            code: None,
            param: None,
        }),
    }
}

/// Decode a success payload. A 204 (or otherwise empty) body decodes as JSON
/// `null`, so callers expecting no payload succeed; a malformed body on a
/// success status surfaces as a decode error, never a zero value.
fn decode_payload<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T> {
    let slice: &[u8] = if status == 204 || body.is_empty() {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(slice).map_err(TychoError::Decode)
}
