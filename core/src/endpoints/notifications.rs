use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{Notification, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNotifications {
    pub user_id: i64,
}

impl Endpoint for UserNotifications {
    type Output = Vec<Notification>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/notifications/user/{}", self.user_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotification {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    #[serde(default)]
    pub reference_id: Option<i64>,
    #[serde(default)]
    pub reference_type: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationBody<'a> {
    user: UserRef,
    message: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_type: Option<&'a str>,
}

impl Endpoint for CreateNotification {
    type Output = Notification;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/notifications/postNotification".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&NotificationBody {
            user: UserRef {
                user_id: self.user_id,
            },
            message: &self.message,
            kind: &self.kind,
            reference_id: self.reference_id,
            reference_type: self.reference_type.as_deref(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkNotificationRead {
    pub notification_id: i64,
}

impl Endpoint for MarkNotificationRead {
    type Output = ();

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/notifications/markAsRead/{}", self.notification_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::ignore_body(body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllNotificationsRead {
    pub user_id: i64,
}

impl Endpoint for MarkAllNotificationsRead {
    type Output = ();

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        format!("api/notifications/markAllAsRead/{}", self.user_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::ignore_body(body)
    }
}
