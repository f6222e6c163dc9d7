//! Philippine Standard Geographic Code lookups.
//!
//! These target the public PSGC API, so build them with an `ApiClient` bound
//! to `ClientConfig::psgc()`. No token is sent.

use serde::{Deserialize, Serialize};

use crate::client::Endpoint;
use crate::http::HttpMethod;
use crate::types::{Barangay, Municipality, Province};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProvinces;

impl Endpoint for ListProvinces {
    type Output = Vec<Province>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "provinces".to_string()
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMunicipalities {
    pub province_code: String,
}

impl Endpoint for ListMunicipalities {
    type Output = Vec<Municipality>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("provinces/{}/cities-municipalities", self.province_code.trim())
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBarangays {
    pub municipality_code: String,
}

impl Endpoint for ListBarangays {
    type Output = Vec<Barangay>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!(
            "cities-municipalities/{}/barangays",
            self.municipality_code.trim()
        )
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}
