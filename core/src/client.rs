//! Typed equipment operations over the request layer.
//!
//! # Design
//! `EquipmentClient` carries no mutable state — it holds the transport and
//! nothing else, so concurrent calls are fully independent. Each operation
//! is a thin typed binding: build the URL, delegate to
//! [`Http::request`](crate::http::Http::request), map the no-body case.
//!
//! The collection path is `/equipment/` with a significant trailing slash;
//! item paths embed the percent-encoded identifier.

use reqwest::Method;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{build_query, Http};
use crate::types::{CreateEquipment, Equipment, ListParams, UpdateEquipment};

/// Client for the equipment registry REST API.
#[derive(Debug, Clone)]
pub struct EquipmentClient {
    http: Http,
}

impl EquipmentClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Http::new(config),
        }
    }

    /// Construct from `METROLOGY_API_BASE` (or the default base URL).
    pub fn from_env() -> Result<Self, url::ParseError> {
        Ok(Self::new(&Config::from_env()?))
    }

    /// List equipment matching `params`, in server order.
    pub async fn list(&self, params: &ListParams) -> Result<Vec<Equipment>, ApiError> {
        let url = self.http.url(&["equipment"], true, &build_query(params));
        let records = self
            .http
            .request::<Vec<Equipment>, ()>(Method::GET, url, None)
            .await?;
        records.ok_or_else(missing_body)
    }

    /// Fetch a single record. A missing id surfaces as
    /// `ApiError::Http { status: 404, .. }`.
    pub async fn get(&self, id: &str) -> Result<Equipment, ApiError> {
        let url = self.http.url(&["equipment", id], false, "");
        let record = self
            .http
            .request::<Equipment, ()>(Method::GET, url, None)
            .await?;
        record.ok_or_else(missing_body)
    }

    /// Register new equipment; returns the server-assigned full record.
    pub async fn create(&self, input: &CreateEquipment) -> Result<Equipment, ApiError> {
        let url = self.http.url(&["equipment"], true, "");
        let record = self
            .http
            .request::<Equipment, _>(Method::POST, url, Some(input))
            .await?;
        record.ok_or_else(missing_body)
    }

    /// Apply a partial update. Only fields present in `patch` are sent;
    /// omitted fields stay unchanged server-side, and an explicit null
    /// clears the field.
    pub async fn update(&self, id: &str, patch: &UpdateEquipment) -> Result<Equipment, ApiError> {
        let url = self.http.url(&["equipment", id], false, "");
        let record = self
            .http
            .request::<Equipment, _>(Method::PATCH, url, Some(patch))
            .await?;
        record.ok_or_else(missing_body)
    }

    /// Delete a record. Success is the absence of an error; the response
    /// body, if any, is ignored.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        let url = self.http.url(&["equipment", id], false, "");
        self.http
            .request::<serde_json::Value, ()>(Method::DELETE, url, None)
            .await?;
        Ok(())
    }
}

fn missing_body() -> ApiError {
    ApiError::Decode("expected a JSON body in the response".to_string())
}
