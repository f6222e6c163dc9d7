//! Login, registration and credential management.

use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Customer, Role, ServiceProvider, UserAuth};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Endpoint for Login {
    type Output = LoginResponse;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/user-auth/login".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(self)
    }

    fn requires_auth(&self) -> bool {
        false
    }
}

/// New account. Exactly one of `customer` / `service_provider` is expected,
/// matching `user_auth.role`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub user_auth: UserAuth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_provider: Option<ServiceProvider>,
}

impl Endpoint for Register {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/user-auth/register".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if self.user_auth.user_name.trim().is_empty() {
            return Err(ApiError::Validation("user name is required".to_string()));
        }
        json_body(self)
    }

    fn requires_auth(&self) -> bool {
        false
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    pub auth_id: i64,
    pub old_password: String,
    pub new_password: String,
}

impl Endpoint for ChangePassword {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/user-auth/change-password/{}", self.auth_id)
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&serde_json::json!({
            "oldPassword": self.old_password,
            "newPassword": self.new_password,
        }))
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(String::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::text(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenStatus {
    pub valid: bool,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Ask the backend whether the current bearer token is still accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateToken;

impl Endpoint for ValidateToken {
    type Output = TokenStatus;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/user-auth/validate-token".to_string()
    }
}

/// Every login identity. Admin portal only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListUsers;

impl Endpoint for ListUsers {
    type Output = Vec<UserAuth>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        "api/user-auth/getAll".to_string()
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

/// Remove a login identity. The backend answers with a sentence either way,
/// including when the id is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUser {
    pub auth_id: i64,
}

impl Endpoint for DeleteUser {
    type Output = String;

    fn method(&self) -> HttpMethod {
        HttpMethod::Delete
    }

    fn path(&self) -> String {
        format!("api/user-auth/{}", self.auth_id)
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
    fn login_is_public() {
        let login = Login {
            user_name: "ana".to_string(),
            password: "secret".to_string(),
        };
        let req = client().build(&login, None).unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/user-auth/login");
        assert!(req.header("authorization").is_none());
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"userName": "ana", "password": "secret"}));

        let resp = client()
            .parse(&login, HttpResponse::new(200, r#"{"token":"abc","role":"Customer"}"#))
            .unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.role, Some(Role::Customer));
    }

    #[test]
    fn bad_credentials_surface_server_text() {
        let login = Login {
            user_name: "ana".to_string(),
            password: "wrong".to_string(),
        };
        let err = client()
            .parse(&login, HttpResponse::new(400, "Invalid username or password"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[test]
    fn register_requires_user_name() {
        let register = Register {
            user_auth: UserAuth::default(),
            customer: Some(Customer::default()),
            service_provider: None,
        };
        let err = client().build(&register, None).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn register_answers_with_text() {
        let register = Register {
            user_auth: UserAuth {
                user_name: "ana".to_string(),
                role: Some(Role::Customer),
                ..UserAuth::default()
            },
            customer: Some(Customer {
                first_name: "Ana".to_string(),
                ..Customer::default()
            }),
            service_provider: None,
        };
        let req = client().build(&register, None).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["userAuth"]["role"], "Customer");
        assert!(body.get("serviceProvider").is_none());

        let text = client()
            .parse(&register, HttpResponse::new(200, "User registered successfully"))
            .unwrap();
        assert_eq!(text, "User registered successfully");
    }

    #[test]
    fn change_password_keeps_id_in_path() {
        let change = ChangePassword {
            auth_id: 4,
            old_password: "a".to_string(),
            new_password: "b".to_string(),
        };
        let req = client().build(&change, Some("tok")).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.path.ends_with("api/user-auth/change-password/4"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"oldPassword": "a", "newPassword": "b"}));
    }

    #[test]
    fn user_directory_decodes_roles() {
        let body = r#"[
            {"userId":1,"userName":"root","role":"ADMIN","email":"root@serbisyo.ph"},
            {"userId":2,"userName":"pedro","role":"Service Provider"}
        ]"#;
        let req = client().build(&ListUsers, Some("tok")).unwrap();
        assert!(req.path.ends_with("api/user-auth/getAll"));
        let users = client().parse(&ListUsers, HttpResponse::new(200, body)).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].role, Some(Role::Admin));
        assert_eq!(users[1].role, Some(Role::ServiceProvider));
        assert!(client().parse(&ListUsers, HttpResponse::new(200, "")).unwrap().is_empty());
    }

    #[test]
    fn delete_user_targets_auth_id() {
        let delete = DeleteUser { auth_id: 9 };
        let req = client().build(&delete, Some("tok")).unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:8080/api/user-auth/9");
        assert!(req.body.is_none());
        let text = client()
            .parse(
                &delete,
                HttpResponse::new(200, "User authentication record successfully deleted."),
            )
            .unwrap();
        assert!(text.contains("deleted"));
    }
}
