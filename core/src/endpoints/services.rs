//! Service listings and their categories.

use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Service, ServiceCategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListServices;

impl Endpoint for ListServices {
    type Output = Vec<Service>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/services/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetService {
    pub service_id: i64,
}

impl Endpoint for GetService {
    type Output = Service;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/services/getById/{}", self.service_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderServices {
    pub provider_id: i64,
}

impl Endpoint for ProviderServices {
    type Output = Vec<Service>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/services/provider/{}", self.provider_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    pub provider_id: i64,
    pub category_id: i64,
    pub service: Service,
}

impl Endpoint for CreateService {
    type Output = Service;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        format!(
            "api/services/postService/{}/{}",
            self.provider_id, self.category_id
        )
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if self.service.service_name.trim().is_empty() {
            return Err(ApiError::Validation("service name is required".to_string()));
        }
        json_body(&self.service)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    pub service_id: i64,
    pub provider_id: i64,
    pub category_id: i64,
    pub service: Service,
}

impl Endpoint for UpdateService {
    type Output = Service;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!(
            "api/services/updateService/{}/{}/{}",
            self.service_id, self.provider_id, self.category_id
        )
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&self.service)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteService {
    pub service_id: i64,
}

impl Endpoint for DeleteService {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("api/services/delete/{}", self.service_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCategories;

impl Endpoint for ListCategories {
    type Output = Vec<ServiceCategory>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/service-categories/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

fn category_body(category: &ServiceCategory) -> Result<Option<String>, ApiError> {
    if category.category_name.trim().is_empty() {
        return Err(ApiError::Validation("category name is required".to_string()));
    }
    json_body(category)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategory {
    pub category: ServiceCategory,
}

impl Endpoint for CreateCategory {
    type Output = ServiceCategory;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/service-categories/create".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        category_body(&self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    pub category_id: i64,
    pub category: ServiceCategory,
}

impl Endpoint for UpdateCategory {
    type Output = ServiceCategory;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/service-categories/update/{}", self.category_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        category_body(&self.category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCategory {
    pub category_id: i64,
}

impl Endpoint for DeleteCategory {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("api/service-categories/delete/{}", self.category_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ApiClient;
    use crate::http::HttpResponse;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:8080")
    }

    #[test]
    fn create_and_update_carry_ids_in_path() {
        let service = Service {
            service_name: "Plumbing".to_string(),
            ..Service::default()
        };
        let req = client()
            .build(
                &CreateService {
                    provider_id: 2,
                    category_id: 5,
                    service: service.clone(),
                },
                Some("tok"),
            )
            .unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/services/postService/2/5");

        let req = client()
            .build(
                &UpdateService {
                    service_id: 11,
                    provider_id: 2,
                    category_id: 5,
                    service,
                },
                Some("tok"),
            )
            .unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/services/updateService/11/2/5");
    }

    #[test]
    fn create_requires_a_name() {
        let err = client()
            .build(
                &CreateService {
                    provider_id: 2,
                    category_id: 5,
                    service: Service::default(),
                },
                Some("tok"),
            )
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn catalogue_decodes_nested_provider_and_category() {
        let body = r#"[{
            "serviceId": 1,
            "serviceName": "Aircon cleaning",
            "provider": {"providerId": 2, "businessName": "CoolFix", "verified": true},
            "category": {"categoryId": 5, "categoryName": "Appliance"}
        }]"#;
        let services = client().parse(&ListServices, HttpResponse::new(200, body)).unwrap();
        assert_eq!(services.len(), 1);
        let provider = services[0].provider.as_ref().unwrap();
        assert!(provider.verified);
        assert_eq!(services[0].category.as_ref().unwrap().category_name, "Appliance");
    }

    #[test]
    fn missing_service_is_not_found() {
        let err = client()
            .parse(&GetService { service_id: 99 }, HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("not found"));
    }

    #[test]
    fn category_admin_routes() {
        let category = ServiceCategory {
            category_name: "Gardening".to_string(),
            description: Some("Lawns and hedges".to_string()),
            ..ServiceCategory::default()
        };
        let req = client()
            .build(&CreateCategory { category: category.clone() }, Some("tok"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert!(req.path.ends_with("api/service-categories/create"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"categoryName": "Gardening", "description": "Lawns and hedges"})
        );

        let update = UpdateCategory {
            category_id: 5,
            category,
        };
        let req = client().build(&update, Some("tok")).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.path.ends_with("api/service-categories/update/5"));

        let req = client().build(&DeleteCategory { category_id: 5 }, Some("tok")).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.path.ends_with("api/service-categories/delete/5"));
    }

    #[test]
    fn category_requires_a_name() {
        let blank = CreateCategory {
            category: ServiceCategory {
                category_name: "  ".to_string(),
                ..ServiceCategory::default()
            },
        };
        assert!(matches!(
            client().build(&blank, Some("tok")).unwrap_err(),
            ApiError::Validation(_)
        ));
    }
}
