//! HTTP transport for the upstream services
//!
//! Every outbound call goes through [`Transport::execute`], which hands back
//! either the decoded JSON body or a [`TransportError`]. The real implementation
//! retries timeouts and connection failures with a linear backoff; HTTP error
//! statuses are returned on the first attempt.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{
    RetryDecision, RetryPolicy, RetryTransientMiddleware, Retryable, RetryableStrategy,
};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::HttpConfig;
use crate::error::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl FromStr for HttpMethod {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            _ => Err(TransportError::UnsupportedMethod {
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A single outbound request, independent of the HTTP client in use
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub form: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            form: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn form(mut self, key: &str, value: impl ToString) -> Self {
        self.form.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn header(mut self, key: &str, value: impl ToString) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    /// Look up a query parameter by name
    pub fn query_param(&self, key: &str) -> Option<&str> {
        lookup(&self.query, key)
    }

    /// Look up a form field by name
    pub fn form_field(&self, key: &str) -> Option<&str> {
        lookup(&self.form, key)
    }
}

fn lookup<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Issues requests against upstream services
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError>;
}

/// Waits `step * attempt` between attempts, up to `max_attempts` in total
#[derive(Debug, Clone, Copy)]
pub struct LinearBackoff {
    pub max_attempts: u32,
    pub step: Duration,
}

impl LinearBackoff {
    /// Delay before the retry that follows `n_past_retries` retries, if any
    #[must_use]
    pub fn delay_for(&self, n_past_retries: u32) -> Option<Duration> {
        let attempts_made = n_past_retries + 1;
        if attempts_made >= self.max_attempts {
            None
        } else {
            Some(self.step * attempts_made)
        }
    }
}

impl RetryPolicy for LinearBackoff {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        match self.delay_for(n_past_retries) {
            Some(delay) => RetryDecision::Retry {
                execute_after: SystemTime::now() + delay,
            },
            None => RetryDecision::DoNotRetry,
        }
    }
}

/// Only timeouts and connection failures are worth another attempt;
/// responses with an error status are handed back untouched.
pub struct ConnectivityFailures;

impl RetryableStrategy for ConnectivityFailures {
    fn handle(
        &self,
        res: &Result<reqwest::Response, reqwest_middleware::Error>,
    ) -> Option<Retryable> {
        match res {
            Ok(_) => None,
            Err(reqwest_middleware::Error::Reqwest(err))
                if TransportError::from_reqwest(err).is_transient() =>
            {
                warn!("Transient transport failure: {}", err);
                Some(Retryable::Transient)
            }
            Err(_) => Some(Retryable::Fatal),
        }
    }
}

/// `reqwest` backed transport with retry middleware
pub struct HttpTransport {
    client: Client,
    middleware: ClientWithMiddleware,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        let policy = LinearBackoff {
            max_attempts: config.max_attempts,
            step: config.backoff_step(),
        };

        let middleware = ClientBuilder::new(client.clone())
            .with(RetryTransientMiddleware::new_with_policy_and_strategy(
                policy,
                ConnectivityFailures,
            ))
            .build();

        Ok(Self { client, middleware })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: ApiRequest) -> Result<Value, TransportError> {
        let mut builder = self.client.request(request.method.into(), &request.url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if !request.form.is_empty() {
            builder = builder.form(&request.form);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let outbound = builder.build()?;

        let response = self.middleware.execute(outbound).await?;
        let status = response.status();
        if !status.is_success() {
            warn!("Upstream answered with status {}", status);
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("Received {} bytes", body.len());

        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
