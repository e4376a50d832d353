//! Stateless HTTP request builder and response parser for the campaigns API.
//!
//! # Design
//! `CampaignClient` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The store runs the round-trip through its transport.
//!
//! Paths keep the trailing slash the backend routes expect.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Campaign, CampaignPatch, NewCampaign};

/// Synchronous, stateless client for the campaigns API.
#[derive(Debug, Clone)]
pub struct CampaignClient {
    base_url: String,
}

impl CampaignClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_campaigns(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_path(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_campaign(&self, input: &NewCampaign) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.collection_path(),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_update_campaign(&self, id: &str, input: &CampaignPatch) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(encode(input)?),
        })
    }

    pub fn build_delete_campaign(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Parse a list response.
    ///
    /// Accepts a paginated envelope (`{"results": [...]}`) or a bare array.
    /// Any other JSON shape is logged and treated as an empty collection.
    pub fn parse_list_campaigns(&self, response: HttpResponse) -> Result<Vec<Campaign>, ApiError> {
        check_status(&response)?;
        let items = match decode::<Value>(&response.body)? {
            Value::Object(mut envelope) if envelope.contains_key("results") => {
                envelope.remove("results").unwrap_or(Value::Null)
            }
            array @ Value::Array(_) => array,
            other => {
                warn!(body = %other, "unexpected list response format, treating as empty");
                return Ok(Vec::new());
            }
        };
        serde_json::from_value(items).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_campaign(&self, response: HttpResponse) -> Result<Campaign, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Parse an update response as a patch so only the fields the server
    /// returned are merged into local state.
    pub fn parse_update_campaign(&self, response: HttpResponse) -> Result<CampaignPatch, ApiError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Any 2xx status is success; the body is ignored.
    pub fn parse_delete_campaign(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn collection_path(&self) -> String {
        format!("{}/campaigns/", self.base_url)
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/campaigns/{id}/", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode<T: serde::Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
