//! Direct messages and the notifications they raise.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};

use super::{required_ref, rows};
use crate::error::{not_found, MockError, MockResult};
use crate::store::{now_parts, ref_id, Row, Store};
use crate::Db;

const PREVIEW_CHARS: usize = 30;

fn involves(row: &Row, a: i64, b: i64) -> bool {
    let sender = ref_id(row, "sender", "userId");
    let receiver = ref_id(row, "receiver", "userId");
    (sender == Some(a) && receiver == Some(b)) || (sender == Some(b) && receiver == Some(a))
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        format!("{}...", text.chars().take(PREVIEW_CHARS).collect::<String>())
    } else {
        text.to_string()
    }
}

pub async fn conversation_partners(
    State(db): State<Db>,
    Path(user_id): Path<i64>,
) -> Json<Vec<Value>> {
    let store = db.read().await;
    // Rows iterate in id order, so the last row seen per partner is the newest.
    let mut partners: BTreeMap<i64, (Row, u32)> = BTreeMap::new();
    for row in store.messages.rows() {
        let sender = ref_id(row, "sender", "userId");
        let receiver = ref_id(row, "receiver", "userId");
        let other = match (sender, receiver) {
            (Some(s), Some(r)) if s == user_id => r,
            (Some(s), Some(r)) if r == user_id => s,
            _ => continue,
        };
        let unread = receiver == Some(user_id)
            && row.get("status").and_then(Value::as_str) == Some("UNREAD");
        let entry = partners.entry(other).or_insert_with(|| (Row::new(), 0));
        entry.0 = row.clone();
        entry.1 += u32::from(unread);
    }

    let mut list: Vec<(i64, Value)> = partners
        .into_iter()
        .filter_map(|(other, (last, unread))| partner_entry(&store, other, &last, unread))
        .collect();
    list.sort_by(|a, b| b.0.cmp(&a.0));
    Json(list.into_iter().map(|(_, v)| v).collect())
}

/// Partner summary keyed by the id of its latest message for ordering.
fn partner_entry(store: &Store, other: i64, last: &Row, unread: u32) -> Option<(i64, Value)> {
    let user = store.users.get(other)?;
    let profile = store
        .customers
        .rows()
        .chain(store.providers.rows())
        .find(|row| ref_id(row, "userAuth", "userId") == Some(other));
    let field = |key: &str| profile.and_then(|p| p.get(key)).cloned().unwrap_or(Value::Null);
    let last_id = last.get("messageId").and_then(Value::as_i64).unwrap_or_default();
    Some((
        last_id,
        json!({
            "userId": other,
            "userName": user.get("userName").cloned().unwrap_or(Value::Null),
            "role": user.get("role").cloned().unwrap_or(Value::Null),
            "firstName": field("firstName"),
            "lastName": field("lastName"),
            "lastMessage": last.get("messageText").cloned().unwrap_or(Value::Null),
            "lastMessageTime": last.get("sentAt").cloned().unwrap_or(Value::Null),
            "unreadCount": unread,
        }),
    ))
}

pub async fn conversation(
    State(db): State<Db>,
    Path((user_id, other_user_id)): Path<(i64, i64)>,
) -> Json<Vec<Value>> {
    let store = db.read().await;
    let list = store
        .messages
        .rows()
        .filter(|row| involves(row, user_id, other_user_id))
        .cloned()
        .collect();
    Json(rows(list))
}

pub async fn post_message(State(db): State<Db>, Json(mut body): Json<Row>) -> MockResult<Json<Row>> {
    let sender_id = required_ref(&body, "sender", "userId")?;
    let receiver_id = required_ref(&body, "receiver", "userId")?;
    let text = body
        .get("messageText")
        .and_then(Value::as_str)
        .map(str::to_string)
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| MockError::BadRequest("Message text is required".to_string()))?;

    let mut store = db.write().await;
    let sender = store
        .public_user(sender_id)
        .ok_or_else(|| not_found("User", sender_id))?;
    let receiver = store
        .public_user(receiver_id)
        .ok_or_else(|| not_found("User", receiver_id))?;

    body.insert("sender".to_string(), sender);
    body.insert("receiver".to_string(), receiver.clone());
    body.entry("sentAt".to_string()).or_insert_with(now_parts);
    body.entry("status".to_string()).or_insert(json!("UNREAD"));
    let message = store.messages.insert(body);

    let mut note = Row::new();
    note.insert("user".to_string(), receiver);
    note.insert("type".to_string(), json!("message"));
    note.insert(
        "message".to_string(),
        json!(format!(
            "{} sent you a message: \"{}\"",
            store.display_name(sender_id),
            preview(&text)
        )),
    );
    note.insert("read".to_string(), json!(false));
    note.insert("createdAt".to_string(), now_parts());
    note.insert(
        "referenceId".to_string(),
        message.get("messageId").cloned().unwrap_or(Value::Null),
    );
    note.insert("referenceType".to_string(), json!("Message"));
    store.notifications.insert(note);

    Ok(Json(message))
}

pub async fn update_message_status(
    State(db): State<Db>,
    Json(body): Json<Row>,
) -> MockResult<Json<Vec<Value>>> {
    let receiver_id = required_ref(&body, "receiver", "userId")?;
    let sender_id = required_ref(&body, "sender", "userId")?;
    let status = body
        .get("status")
        .and_then(Value::as_str)
        .filter(|s| *s == "READ" || *s == "UNREAD")
        .ok_or_else(|| MockError::BadRequest("Status must be READ or UNREAD".to_string()))?
        .to_string();

    let mut store = db.write().await;
    let mut updated = Vec::new();
    for row in store.messages.rows_mut() {
        if ref_id(row, "sender", "userId") == Some(sender_id)
            && ref_id(row, "receiver", "userId") == Some(receiver_id)
        {
            row.insert("status".to_string(), json!(status));
            updated.push(Value::Object(row.clone()));
        }
    }
    Ok(Json(updated))
}

pub async fn user_notifications(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<Vec<Value>> {
    let store = db.read().await;
    let mut list = store.notifications.filter_by_ref("user", "userId", user_id);
    list.reverse();
    Json(rows(list))
}

pub async fn post_notification(
    State(db): State<Db>,
    Json(mut body): Json<Row>,
) -> MockResult<Json<Row>> {
    let user_id = required_ref(&body, "user", "userId")?;
    let mut store = db.write().await;
    let user = store
        .public_user(user_id)
        .ok_or_else(|| not_found("User", user_id))?;
    body.insert("user".to_string(), user);
    body.entry("read".to_string()).or_insert(json!(false));
    body.entry("createdAt".to_string()).or_insert_with(now_parts);
    Ok(Json(store.notifications.insert(body)))
}

pub async fn mark_as_read(State(db): State<Db>, Path(id): Path<i64>) -> MockResult<Json<Row>> {
    let mut store = db.write().await;
    let row = store
        .notifications
        .get_mut(id)
        .ok_or_else(|| not_found("Notification", id))?;
    row.insert("read".to_string(), json!(true));
    Ok(Json(row.clone()))
}

pub async fn mark_all_as_read(State(db): State<Db>, Path(user_id): Path<i64>) -> Json<Value> {
    let mut store = db.write().await;
    let mut count = 0;
    for row in store.notifications.rows_mut() {
        if ref_id(row, "user", "userId") == Some(user_id) {
            row.insert("read".to_string(), json!(true));
            count += 1;
        }
    }
    Json(json!({ "updated": count }))
}
