use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::ServiceProvider;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProviders;

impl Endpoint for ListProviders {
    type Output = Vec<ServiceProvider>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/service-providers/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProvider {
    pub provider_id: i64,
}

impl Endpoint for GetProvider {
    type Output = ServiceProvider;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/service-providers/getById/{}", self.provider_id)
    }
}

/// Resolve the provider profile that belongs to a login identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderByAuthId {
    pub user_id: i64,
}

impl Endpoint for ProviderByAuthId {
    type Output = ServiceProvider;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/service-providers/getByAuthId".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        vec![("userId".to_string(), self.user_id.to_string())]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvider {
    pub provider_id: i64,
    pub provider: ServiceProvider,
}

impl Endpoint for UpdateProvider {
    type Output = ServiceProvider;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/service-providers/update/{}", self.provider_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&self.provider)
    }
}

/// Admin approval. Sends only the flag so the rest of the profile is left
/// as the provider entered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveProvider {
    pub provider_id: i64,
}

impl Endpoint for ApproveProvider {
    type Output = ServiceProvider;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/service-providers/update/{}", self.provider_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&serde_json::json!({ "verified": true }))
    }
}

/// Admin rejection of a pending provider verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectProvider {
    pub provider_id: i64,
}

impl Endpoint for RejectProvider {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("api/verification/reject/{}", self.provider_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}
