use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::Customer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCustomers;

impl Endpoint for ListCustomers {
    type Output = Vec<Customer>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/customers/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCustomer {
    pub customer_id: i64,
}

impl Endpoint for GetCustomer {
    type Output = Customer;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/customers/getById/{}", self.customer_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub customer: Customer,
}

impl Endpoint for CreateCustomer {
    type Output = Customer;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/customers/postCustomer".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&self.customer)
    }
}

/// Update a customer profile. Any failure is returned; nothing is reported
/// as saved unless the backend accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomer {
    pub customer_id: i64,
    pub customer: Customer,
}

impl Endpoint for UpdateCustomer {
    type Output = Customer;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/customers/updateCustomer/{}", self.customer_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&self.customer)
    }
}
