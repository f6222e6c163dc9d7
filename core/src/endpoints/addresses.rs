use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Address;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAddresses;

impl Endpoint for ListAddresses {
    type Output = Vec<Address>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/addresses/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetAddress {
    pub address_id: i64,
}

impl Endpoint for GetAddress {
    type Output = Address;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/addresses/getById/{}", self.address_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerAddresses {
    pub customer_id: i64,
}

impl Endpoint for CustomerAddresses {
    type Output = Vec<Address>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/addresses/customer/{}", self.customer_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAddresses {
    pub provider_id: i64,
}

impl Endpoint for ProviderAddresses {
    type Output = Vec<Address>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/addresses/provider/{}", self.provider_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

/// Create an address. The owner is named through `address.customer` or
/// `address.service_provider`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAddress {
    pub address: Address,
}

impl Endpoint for CreateAddress {
    type Output = Address;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/addresses/postAddress".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if self.address.customer.is_none() && self.address.service_provider.is_none() {
            return Err(ApiError::Validation(
                "address must belong to a customer or a service provider".to_string(),
            ));
        }
        json_body(&self.address)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddress {
    pub address_id: i64,
    pub address: Address,
}

impl Endpoint for UpdateAddress {
    type Output = Address;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/addresses/updateAddress/{}", self.address_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&self.address)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAddress {
    pub address_id: i64,
}

impl Endpoint for DeleteAddress {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("api/addresses/delete/{}", self.address_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}
