use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::client::{json_body, Endpoint};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::types::{ConversationPartner, Message, MessageStatus, UserRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPartners {
    pub user_id: i64,
}

impl Endpoint for ConversationPartners {
    type Output = Vec<ConversationPartner>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!("api/messages/conversation-partners/{}", self.user_id)
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }
}

/// Every message exchanged between two users, oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub user_id: i64,
    pub other_user_id: i64,
}

impl Endpoint for Conversation {
    type Output = Vec<Message>;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn path(&self) -> String {
        format!(
            "api/messages/conversation/{}/{}",
            self.user_id, self.other_user_id
        )
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(Vec::new())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        let mut messages: Vec<Message> = crate::client::decode_json(body)?;
        messages.sort_by_key(|m| m.sent_at);
        Ok(messages)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub sender_id: i64,
    pub receiver_id: i64,
    pub message_text: String,
    /// Client-side send time; the backend stamps its own when absent.
    #[serde(default)]
    pub sent_at: Option<NaiveDateTime>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageBody<'a> {
    sender: UserRef,
    receiver: UserRef,
    message_text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sent_at: Option<NaiveDateTime>,
    status: MessageStatus,
}

impl Endpoint for SendMessage {
    type Output = Message;

    fn method(&self) -> HttpMethod {
        HttpMethod::Post
    }

    fn path(&self) -> String {
        "api/messages/postMessage".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        if self.message_text.trim().is_empty() {
            return Err(ApiError::Validation("message text is empty".to_string()));
        }
        json_body(&MessageBody {
            sender: UserRef {
                user_id: self.sender_id,
            },
            receiver: UserRef {
                user_id: self.receiver_id,
            },
            message_text: &self.message_text,
            sent_at: self.sent_at,
            status: MessageStatus::Unread,
        })
    }
}

/// Mark every message `sender_id` sent to `receiver_id` as read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkConversationRead {
    pub receiver_id: i64,
    pub sender_id: i64,
}

impl Endpoint for MarkConversationRead {
    type Output = ();

    fn method(&self) -> HttpMethod {
        HttpMethod::Put
    }

    fn path(&self) -> String {
        "api/messages/updateMessage/status".to_string()
    }

    fn body(&self) -> Result<Option<String>, ApiError> {
        json_body(&serde_json::json!({
            "receiver": UserRef { user_id: self.receiver_id },
            "sender": UserRef { user_id: self.sender_id },
            "status": MessageStatus::Read,
        }))
    }

    fn empty_output(&self) -> Option<Self::Output> {
        Some(())
    }

    fn decode(&self, body: &str) -> Result<Self::Output, ApiError> {
        super::ignore_body(body)
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
    fn send_builds_nested_user_refs() {
        let send = SendMessage {
            sender_id: 1,
            receiver_id: 2,
            message_text: "Hello po".to_string(),
            sent_at: None,
        };
        let req = client().build(&send, Some("tok")).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "sender": {"userId": 1},
                "receiver": {"userId": 2},
                "messageText": "Hello po",
                "status": "UNREAD"
            })
        );
    }

    #[test]
    fn blank_message_is_rejected() {
        let send = SendMessage {
            sender_id: 1,
            receiver_id: 2,
            message_text: "  ".to_string(),
            sent_at: None,
        };
        assert!(matches!(
            client().build(&send, Some("tok")).unwrap_err(),
            ApiError::Validation(_)
        ));
    }

    #[test]
    fn conversation_is_sorted_by_send_time() {
        let body = r#"[
            {"messageId":2,"messageText":"second","sentAt":[2025,5,1,10,0,0],"status":"READ"},
            {"messageId":1,"messageText":"first","sentAt":"2025-05-01T09:00:00","status":"UNREAD"}
        ]"#;
        let messages = client()
            .parse(&Conversation { user_id: 1, other_user_id: 2 }, HttpResponse::new(200, body))
            .unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].message_text, "first");
        assert_eq!(messages[1].status, MessageStatus::Read);
    }

    #[test]
    fn mark_read_ignores_response_payload() {
        let mark = MarkConversationRead {
            receiver_id: 1,
            sender_id: 2,
        };
        let req = client().build(&mark, Some("tok")).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "READ");
        assert_eq!(body["receiver"]["userId"], 1);

        client()
            .parse(&mark, HttpResponse::new(200, r#"[{"messageId":4}]"#))
            .unwrap();
        client().parse(&mark, HttpResponse::new(200, "")).unwrap();
    }
}
