//! Seeded slice of the public PSGC API, served unauthenticated.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::Db;

fn children(list: &[Value], parent_key: &str, code: &str) -> Vec<Value> {
    list.iter()
        .filter(|row| row.get(parent_key).and_then(Value::as_str) == Some(code))
        .cloned()
        .collect()
}

pub async fn provinces(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.read().await.provinces.clone())
}

pub async fn municipalities(State(db): State<Db>, Path(code): Path<String>) -> Json<Vec<Value>> {
    Json(children(&db.read().await.municipalities, "provinceCode", &code))
}

pub async fn barangays(State(db): State<Db>, Path(code): Path<String>) -> Json<Vec<Value>> {
    Json(children(&db.read().await.barangays, "cityCode", &code))
}
