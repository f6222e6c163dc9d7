//! Customers, service providers and their addresses.

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::auth::require_admin;
use super::{merge, rows};
use crate::error::{not_found, MockError, MockResult};
use crate::store::{ref_id, Row};
use crate::{CurrentUser, Db};

pub async fn list_customers(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.customers.all()))
}

pub async fn get_customer(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    let store = db.read().await;
    store
        .customers
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Customer", id))
}

pub async fn create_customer(State(db): State<Db>, Json(body): Json<Row>) -> Json<Row> {
    Json(db.write().await.customers.insert(body))
}

pub async fn update_customer(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Row>,
) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    let row = store
        .customers
        .get_mut(id)
        .ok_or_else(|| not_found("Customer", id))?;
    merge(row, body, "customerId");
    Ok(Json(row.clone()))
}

pub async fn list_providers(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.providers.all()))
}

pub async fn get_provider(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    let store = db.read().await;
    store
        .providers
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Service provider", id))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthIdQuery {
    user_id: i64,
}

pub async fn provider_by_auth_id(
    State(db): State<Db>,
    Query(query): Query<AuthIdQuery>,
) -> MockResult<Json<Row>> {
    let store = db.read().await;
    let provider = store
        .providers
        .rows()
        .find(|row| ref_id(row, "userAuth", "userId") == Some(query.user_id))
        .cloned();
    provider.map(Json).ok_or_else(|| {
        MockError::NotFound(format!(
            "No service provider linked to user {}",
            query.user_id
        ))
    })
}

pub async fn update_provider(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Row>,
) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    let row = store
        .providers
        .get_mut(id)
        .ok_or_else(|| not_found("Service provider", id))?;
    merge(row, body, "providerId");
    Ok(Json(row.clone()))
}

pub async fn reject_provider(
    State(db): State<Db>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> MockResult<String> {
    let mut store = db.write().await;
    require_admin(&store, user_id)?;
    let row = store
        .providers
        .get_mut(id)
        .ok_or_else(|| not_found("Service provider", id))?;
    row.insert("verified".to_string(), json!(false));
    tracing::info!(provider_id = id, "provider verification rejected");
    Ok(format!("Verification for service provider {id} rejected"))
}

pub async fn list_addresses(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.addresses.all()))
}

pub async fn get_address(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    let store = db.read().await;
    store
        .addresses
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Address", id))
}

pub async fn customer_addresses(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(rows(store.addresses.filter_by_ref("customer", "customerId", id)))
}

pub async fn provider_addresses(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(rows(
        store
            .addresses
            .filter_by_ref("serviceProvider", "providerId", id),
    ))
}

pub async fn create_address(State(db): State<Db>, Json(body): Json<Row>) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    match (
        ref_id(&body, "customer", "customerId"),
        ref_id(&body, "serviceProvider", "providerId"),
    ) {
        (Some(id), _) if store.customers.get(id).is_none() => return Err(not_found("Customer", id)),
        (_, Some(id)) if store.providers.get(id).is_none() => {
            return Err(not_found("Service provider", id))
        }
        (None, None) => {
            return Err(MockError::BadRequest(
                "Address must belong to a customer or service provider".to_string(),
            ))
        }
        _ => {}
    }
    Ok(Json(store.addresses.insert(body)))
}

pub async fn update_address(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(body): Json<Row>,
) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    let row = store
        .addresses
        .get_mut(id)
        .ok_or_else(|| not_found("Address", id))?;
    merge(row, body, "addressId");
    Ok(Json(row.clone()))
}

pub async fn delete_address(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<String> {
    db.write()
        .await
        .addresses
        .remove(id)
        .map(|_| format!("Address with ID {id} successfully deleted!"))
        .ok_or_else(|| not_found("Address", id))
}
