//! HTTP request layer: query construction, bounded requests, response
//! decoding.
//!
//! # Design
//! [`Http`] turns a logical request (method, URL, optional JSON body) into a
//! decoded value or an [`ApiError`], with a per-request wait bound. The layer
//! is deliberately permissive about "no body" outcomes — 204/205 and
//! non-JSON success responses yield `Ok(None)` instead of a decode failure,
//! because the service legitimately returns empty bodies for some operations
//! (delete in particular).
//!
//! Each call owns its request and timeout; concurrent calls share nothing
//! mutable, so callers may interleave them freely.

use reqwest::header;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::form_urlencoded;
use url::Url;

use crate::config::Config;
use crate::error::ApiError;
use crate::types::ListParams;

/// Serialize list filters into a URL-encoded query string.
///
/// Keys are emitted in a fixed order (`q`, `name`, `type`, `serial_number`,
/// `inventory_number`, `limit`, `offset`) regardless of how the params were
/// assembled. A parameter is included only when its value is non-blank after
/// trimming; the untrimmed value is what gets emitted.
pub fn build_query(params: &ListParams) -> String {
    let pairs: [(&str, Option<String>); 7] = [
        ("q", params.q.clone()),
        ("name", params.name.clone()),
        ("type", params.equipment_type.clone()),
        ("serial_number", params.serial_number.clone()),
        ("inventory_number", params.inventory_number.clone()),
        ("limit", params.limit.map(|v| v.to_string())),
        ("offset", params.offset.map(|v| v.to_string())),
    ];

    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if let Some(value) = value {
            if !value.trim().is_empty() {
                query.append_pair(key, &value);
            }
        }
    }
    query.finish()
}

/// Bounded HTTP transport bound to a base URL.
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,
    base_url: Url,
    timeout: std::time::Duration,
}

impl Http {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        }
    }

    /// Join percent-encoded path segments onto the base URL.
    ///
    /// `trailing_slash` appends an empty segment so collection paths keep
    /// their significant trailing slash. An empty `query` leaves the URL
    /// without a query string.
    pub fn url(&self, segments: &[&str], trailing_slash: bool, query: &str) -> Url {
        let mut url = self.base_url.clone();
        // Err only for cannot-be-a-base URLs, which Config's parse rules out.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
            if trailing_slash {
                path.push("");
            }
        }
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        url
    }

    /// Issue a request and decode the response.
    ///
    /// Returns `Ok(None)` for success responses without a JSON body (204,
    /// 205, or a non-`application/json` content type). Non-2xx statuses
    /// become [`ApiError::Http`] with the body text captured best-effort.
    /// The configured timeout aborts the call, connect through body read.
    pub async fn request<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        tracing::debug!(%method, %url, "sending request");

        let mut builder = self
            .client
            .request(method, url)
            .timeout(self.timeout)
            .header(header::ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            // Best-effort diagnostics: an unreadable body must not turn an
            // HTTP failure into a transport failure.
            let body = response
                .text()
                .await
                .ok()
                .filter(|text| !text.is_empty());
            tracing::debug!(status = status.as_u16(), "request failed");
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return Ok(None);
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);
        if !is_json {
            return Ok(None);
        }

        let text = response.text().await.map_err(transport_error)?;
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(err.to_string())
    }
}
