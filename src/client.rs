use anyhow::{Context, Result};
use reqwest::blocking::{Client as HttpClient, RequestBuilder};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use std::error::Error as _;
use std::time::Duration;

use crate::config::{ClientConfig, DEFAULT_BASE_URL, Token, load_config};
use crate::error::ApiError;
use crate::method::Method;
use crate::util::{append_query, build_query, endpoint, is_empty_payload, to_params, truncate_for_log};

/// Request parameters: a JSON object of scalars and arrays.
pub type Params = serde_json::Map<String, Value>;

/// Blocking client for the DigitalOcean v2 API.
///
/// Holds only the credential, the API root and the HTTP connection pool.
/// Every call returns its own outcome, so a `Client` can be cloned and shared
/// across threads.
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    token: Token,
    timeout: Option<Duration>,
    http: HttpClient,
}

impl Client {
    /// Creates a client from `DIGITALOCEAN_TOKEN` / `DOAPI_URL` and/or `.doapirc`.
    ///
    /// This is equivalent to `Client::new(None, None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - explicit `token`/`url` arguments
    /// - environment variables `DIGITALOCEAN_TOKEN` / `DOAPI_URL`
    /// - config file from `DOAPI_RC` or `.doapirc`
    pub fn new(token: Option<String>, url: Option<String>, verify: Option<bool>) -> Result<Self> {
        let cfg = load_config(token, url, verify)?;
        Self::from_config(cfg)
    }

    /// Creates a client for the public API root with `token`, ignoring the environment.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig {
            url: DEFAULT_BASE_URL.to_string(),
            token: Token::new(token),
            verify: true,
        })
    }

    pub fn from_config(cfg: ClientConfig) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("doapi-rs/{}", env!("CARGO_PKG_VERSION")))
                .unwrap_or(HeaderValue::from_static("doapi-rs")),
        );

        let mut builder = HttpClient::builder().default_headers(default_headers);
        if !cfg.verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            url: cfg.url.trim_end_matches('/').to_string(),
            token: cfg.token,
            timeout: None,
            http,
        })
    }

    /// Caps each request at `timeout`. Without it the transport default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.url
    }

    /// Performs one authenticated exchange and decodes its JSON body.
    ///
    /// Non-empty `params` are sent as a query string for GET and as a JSON
    /// body otherwise. The HTTP status is not interpreted: any non-empty JSON
    /// body is returned as-is for the caller to inspect.
    pub fn dispatch(
        &self,
        method: Method,
        path: &str,
        params: Option<&Params>,
    ) -> Result<Value, ApiError> {
        let params = params.filter(|p| !p.is_empty());
        let mut url = endpoint(&self.url, path);
        if let (true, Some(p)) = (method.uses_query(), params) {
            url = append_query(&url, &build_query(p));
        }

        tracing::debug!("{} {}", method, url);

        let mut req = self.request_builder(method, &url);
        if let (false, Some(p)) = (method.uses_query(), params) {
            req = req.json(p);
        }

        let resp = req.send().map_err(|e| {
            let detail = transport_detail(&e);
            tracing::warn!("{} {} failed: {}", method, url, detail);
            ApiError::Transport(detail)
        })?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ApiError::Transport(transport_detail(&e)))?;

        match serde_json::from_str::<Value>(&text) {
            Ok(value) if !is_empty_payload(&value) => {
                tracing::debug!("{} {} -> HTTP {}", method, url, status);
                Ok(value)
            }
            _ => {
                tracing::warn!(
                    "{} {} -> HTTP {} with unusable body: {}",
                    method,
                    url,
                    status,
                    truncate_for_log(&text)
                );
                Err(ApiError::InvalidResponse(text))
            }
        }
    }

    /// Like [`Client::dispatch`], for callers holding the method as a string.
    ///
    /// Anything but `GET`, `POST`, `PUT` or `DELETE` is rejected before any I/O.
    pub fn dispatch_str(
        &self,
        method: &str,
        path: &str,
        params: Option<&Params>,
    ) -> Result<Value, ApiError> {
        let method = method.parse::<Method>().inspect_err(|e| {
            tracing::warn!("{}", e);
        })?;
        self.dispatch(method, path, params)
    }

    /// Dispatches with a serializable parameter struct.
    pub(crate) fn dispatch_with<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: &P,
    ) -> Result<Value, ApiError> {
        let params = to_params(params)?;
        self.dispatch(method, path, Some(&params))
    }

    pub(crate) fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(Method::Get, path, None)
    }

    pub(crate) fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(Method::Delete, path, None)
    }

    fn request_builder(&self, method: Method, url: &str) -> RequestBuilder {
        let req = match method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            // The remaining verbs are set explicitly.
            Method::Put | Method::Delete => self.http.request(method.into(), url),
        };
        let req = req
            .bearer_auth(self.token.expose())
            .header(CONTENT_TYPE, "application/json");
        match self.timeout {
            Some(t) => req.timeout(t),
            None => req,
        }
    }
}

/// The reqwest error plus its source chain, which carries the OS-level cause.
fn transport_detail(err: &reqwest::Error) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}
