use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde_json::Value;

use super::auth::require_admin;
use super::{merge, rows};
use crate::error::{not_found, MockError, MockResult};
use crate::store::{Row, Store};
use crate::{CurrentUser, Db};

pub async fn list_categories(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.categories.all()))
}

fn require_category_name(body: &Row) -> MockResult<()> {
    let named = body
        .get("categoryName")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.trim().is_empty());
    if named {
        Ok(())
    } else {
        Err(MockError::BadRequest("Category name is required".to_string()))
    }
}

pub async fn create_category(
    State(db): State<Db>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(body): Json<Row>,
) -> MockResult<Json<Row>> {
    require_category_name(&body)?;
    let mut store = db.write().await;
    require_admin(&store, user_id)?;
    Ok(Json(store.categories.insert(body)))
}

pub async fn update_category(
    State(db): State<Db>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
    Json(body): Json<Row>,
) -> MockResult<Json<Row>> {
    require_category_name(&body)?;
    let mut store = db.write().await;
    require_admin(&store, user_id)?;
    let row = store
        .categories
        .get_mut(id)
        .ok_or_else(|| not_found("Category", id))?;
    merge(row, body, "categoryId");
    Ok(Json(row.clone()))
}

pub async fn delete_category(
    State(db): State<Db>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> MockResult<String> {
    let mut store = db.write().await;
    require_admin(&store, user_id)?;
    let message = match store.categories.remove(id) {
        Some(_) => format!("Service Category with ID {id} has been deleted successfully."),
        None => format!("Service Category with ID {id} not found."),
    };
    Ok(message)
}

pub async fn list_services(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(rows(db.read().await.services.all()))
}

pub async fn get_service(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    let store = db.read().await;
    store
        .services
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Service", id))
}

pub async fn provider_services(State(db): State<Db>, Path(id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    Json(rows(store.services.filter_by_ref("provider", "providerId", id)))
}

/// Attach the owning provider and category objects to a service body.
fn link(store: &Store, body: &mut Row, provider_id: i64, category_id: i64) -> MockResult<()> {
    let provider = store
        .providers
        .get(provider_id)
        .cloned()
        .ok_or_else(|| not_found("Service provider", provider_id))?;
    let category = store
        .categories
        .get(category_id)
        .cloned()
        .ok_or_else(|| not_found("Category", category_id))?;
    body.insert("provider".to_string(), Value::Object(provider));
    body.insert("category".to_string(), Value::Object(category));
    Ok(())
}

pub async fn create_service(
    State(db): State<Db>,
    Path((provider_id, category_id)): Path<(i64, i64)>,
    Json(mut body): Json<Row>,
) -> MockResult<Json<Row>> {
    let named = body
        .get("serviceName")
        .and_then(Value::as_str)
        .is_some_and(|n| !n.trim().is_empty());
    if !named {
        return Err(MockError::BadRequest("Service name is required".to_string()));
    }
    let mut store = db.write().await;
    link(&store, &mut body, provider_id, category_id)?;
    Ok(Json(store.services.insert(body)))
}

pub async fn update_service(
    State(db): State<Db>,
    Path((id, provider_id, category_id)): Path<(i64, i64, i64)>,
    Json(mut body): Json<Row>,
) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    link(&store, &mut body, provider_id, category_id)?;
    let row = store
        .services
        .get_mut(id)
        .ok_or_else(|| not_found("Service", id))?;
    merge(row, body, "serviceId");
    Ok(Json(row.clone()))
}

pub async fn delete_service(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<String> {
    db.write()
        .await
        .services
        .remove(id)
        .map(|_| format!("Service with ID {id} successfully deleted!"))
        .ok_or_else(|| not_found("Service", id))
}
