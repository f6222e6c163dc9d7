use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{MockError, MockResult};
use super::rows;
use crate::store::{now_parts, Account, Row, Store};
use crate::{CurrentUser, Db};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    user_name: String,
    password: String,
}

pub async fn login(State(db): State<Db>, Json(input): Json<LoginInput>) -> MockResult<Json<Value>> {
    let mut store = db.write().await;
    let (user_id, role) = store
        .accounts
        .iter()
        .find(|(_, a)| a.user_name == input.user_name && a.password == input.password)
        .map(|(id, a)| (*id, a.role.clone()))
        .ok_or_else(|| MockError::BadRequest("Invalid username or password".to_string()))?;

    let token = Uuid::new_v4().to_string();
    store.sessions.insert(token.clone(), user_id);
    tracing::info!(user_id, "session opened");
    Ok(Json(json!({ "token": token, "role": role, "userId": user_id })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    user_auth: Row,
    #[serde(default)]
    customer: Option<Row>,
    #[serde(default)]
    service_provider: Option<Row>,
}

pub async fn register(State(db): State<Db>, Json(input): Json<RegisterInput>) -> MockResult<String> {
    let mut auth = input.user_auth;
    let field = |row: &Row, key: &str| {
        row.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };
    let user_name = field(&auth, "userName")
        .ok_or_else(|| MockError::BadRequest("Username is required".to_string()))?;
    let password = field(&auth, "password")
        .ok_or_else(|| MockError::BadRequest("Password is required".to_string()))?;
    let role = field(&auth, "role").unwrap_or_else(|| "Customer".to_string());

    let mut store = db.write().await;
    if store.accounts.values().any(|a| a.user_name == user_name) {
        return Err(MockError::BadRequest("Username already exists".to_string()));
    }

    auth.remove("password");
    auth.insert("role".to_string(), json!(role));
    auth.insert("createdAt".to_string(), now_parts());
    let user = store.users.insert(auth);
    let user_id = user.get("userId").and_then(Value::as_i64).unwrap_or_default();
    store.accounts.insert(
        user_id,
        Account {
            user_name,
            password,
            role: role.clone(),
        },
    );

    let user = Value::Object(user);
    if role == "Service Provider" {
        let mut profile = input.service_provider.unwrap_or_default();
        profile.insert("userAuth".to_string(), user);
        profile
            .entry("verified".to_string())
            .or_insert(json!(false));
        store.providers.insert(profile);
    } else if role == "Customer" {
        let mut profile = input.customer.unwrap_or_default();
        profile.insert("userAuth".to_string(), user);
        store.customers.insert(profile);
    }
    Ok("User registered successfully".to_string())
}

pub async fn validate_token(Extension(CurrentUser(user_id)): Extension<CurrentUser>) -> Json<Value> {
    Json(json!({ "valid": true, "userId": user_id }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    old_password: String,
    new_password: String,
}

pub async fn change_password(
    State(db): State<Db>,
    Path(auth_id): Path<i64>,
    Json(input): Json<PasswordChange>,
) -> MockResult<String> {
    let mut store = db.write().await;
    let account = store
        .accounts
        .get_mut(&auth_id)
        .ok_or_else(|| crate::error::not_found("User", auth_id))?;
    if account.password != input.old_password {
        return Err(MockError::BadRequest("Old password is incorrect".to_string()));
    }
    if input.new_password.len() < 6 {
        return Err(MockError::BadRequest(
            "New password must be at least 6 characters".to_string(),
        ));
    }
    account.password = input.new_password;
    Ok("Password changed successfully".to_string())
}

/// Portal routes reserved for accounts registered with the `Admin` role.
pub(super) fn require_admin(store: &Store, user_id: i64) -> MockResult<()> {
    match store.accounts.get(&user_id) {
        Some(account) if account.role.eq_ignore_ascii_case("admin") => Ok(()),
        _ => Err(MockError::Forbidden("Admin access required".to_string())),
    }
}

pub async fn list_users(
    State(db): State<Db>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> MockResult<Json<Vec<Value>>> {
    let store = db.read().await;
    require_admin(&store, user_id)?;
    let users = rows(store.users.all());
    Ok(Json(users))
}

/// Unknown ids still answer 200 with a sentence, like the real controller.
pub async fn delete_user(
    State(db): State<Db>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(auth_id): Path<i64>,
) -> MockResult<String> {
    let mut store = db.write().await;
    require_admin(&store, user_id)?;
    if store.users.remove(auth_id).is_none() {
        return Ok("User authentication record not found.".to_string());
    }
    store.accounts.remove(&auth_id);
    store.sessions.retain(|_, owner| *owner != auth_id);
    tracing::info!(auth_id, "user deleted");
    Ok("User authentication record successfully deleted.".to_string())
}
