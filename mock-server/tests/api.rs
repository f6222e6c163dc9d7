use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<String> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    if body.is_some() {
        builder = builder.header(http::header::CONTENT_TYPE, "application/json");
    }
    builder
        .body(body.map(|b| b.to_string()).unwrap_or_default())
        .unwrap()
}

async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

/// Register a user and log in; returns (token, userId).
async fn sign_up(app: &Router, user_name: &str, role: &str) -> (String, i64) {
    let profile_key = if role == "Service Provider" {
        "serviceProvider"
    } else {
        "customer"
    };
    let body = json!({
        "userAuth": {"userName": user_name, "password": "secret123", "role": role},
        profile_key: {"firstName": user_name, "lastName": "Tester", "businessName": format!("{user_name} Co")},
    });
    let resp = send(app, request("POST", "/api/user-auth/register", None, Some(body))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let login = json!({"userName": user_name, "password": "secret123"});
    let resp = send(app, request("POST", "/api/user-auth/login", None, Some(login))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let session: Value = body_json(resp).await;
    assert_eq!(session["role"], role);
    (
        session["token"].as_str().unwrap().to_string(),
        session["userId"].as_i64().unwrap(),
    )
}

// --- auth ---

#[tokio::test]
async fn protected_route_without_token_is_401() {
    let resp = send(&app(), request("GET", "/api/bookings/getAll", None, None)).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[tokio::test]
async fn unknown_token_is_401() {
    let resp = send(
        &app(),
        request("GET", "/api/user-auth/validate-token", Some("nope"), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_with_bad_password_is_400_with_message() {
    let app = app();
    sign_up(&app, "ana", "Customer").await;
    let resp = send(
        &app,
        request(
            "POST",
            "/api/user-auth/login",
            None,
            Some(json!({"userName": "ana", "password": "wrong"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = app();
    sign_up(&app, "ana", "Customer").await;
    let body = json!({"userAuth": {"userName": "ana", "password": "x", "role": "Customer"}});
    let resp = send(&app, request("POST", "/api/user-auth/register", None, Some(body))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn change_password_then_login_with_new_one() {
    let app = app();
    let (token, user_id) = sign_up(&app, "ana", "Customer").await;
    let resp = send(
        &app,
        request(
            "PUT",
            &format!("/api/user-auth/change-password/{user_id}"),
            Some(&token),
            Some(json!({"oldPassword": "secret123", "newPassword": "newsecret"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(&body_bytes(resp).await[..], b"Password changed successfully");

    let resp = send(
        &app,
        request(
            "POST",
            "/api/user-auth/login",
            None,
            Some(json!({"userName": "ana", "password": "newsecret"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- catalogue and bookings ---

#[tokio::test]
async fn booking_lifecycle() {
    let app = app();
    let (provider_token, provider_user) = sign_up(&app, "pedro", "Service Provider").await;
    let (customer_token, _) = sign_up(&app, "ana", "Customer").await;

    let resp = send(
        &app,
        request(
            "GET",
            &format!("/api/service-providers/getByAuthId?userId={provider_user}"),
            Some(&provider_token),
            None,
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let provider: Value = body_json(resp).await;
    let provider_id = provider["providerId"].as_i64().unwrap();

    let resp = send(
        &app,
        request(
            "POST",
            &format!("/api/services/postService/{provider_id}/2"),
            Some(&provider_token),
            Some(json!({"serviceName": "Pipe repair", "priceRange": "300-600"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let service: Value = body_json(resp).await;
    assert_eq!(service["category"]["categoryName"], "Plumbing");
    let service_id = service["serviceId"].as_i64().unwrap();

    let resp = send(
        &app,
        request(
            "POST",
            "/api/bookings/postBooking",
            Some(&customer_token),
            Some(json!({
                "service": {"serviceId": service_id},
                "customer": {"customerId": 1},
                "bookingDate": "2025-05-02",
                "bookingTime": "09:00:00",
                "totalCost": 450.0
            })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let booking: Value = body_json(resp).await;
    assert_eq!(booking["status"], "Pending");
    assert_eq!(booking["service"]["provider"]["providerId"], provider_id);
    let booking_id = booking["bookingId"].as_i64().unwrap();

    let resp = send(
        &app,
        request(
            "GET",
            &format!("/api/bookings/provider/{provider_id}"),
            Some(&provider_token),
            None,
        ),
    )
    .await;
    let list: Vec<Value> = body_json(resp).await;
    assert_eq!(list.len(), 1);

    let resp = send(
        &app,
        request(
            "PUT",
            &format!("/api/bookings/updateStatus/{booking_id}"),
            Some(&provider_token),
            Some(json!({"status": "In Progress"})),
        ),
    )
    .await;
    let updated: Value = body_json(resp).await;
    assert_eq!(updated["status"], "In Progress");

    let resp = send(
        &app,
        request(
            "PUT",
            &format!("/api/bookings/complete/{booking_id}"),
            Some(&provider_token),
            Some(json!({})),
        ),
    )
    .await;
    let completed: Value = body_json(resp).await;
    assert_eq!(completed["status"], "Completed");
}

#[tokio::test]
async fn missing_booking_is_404_with_message() {
    let app = app();
    let (token, _) = sign_up(&app, "ana", "Customer").await;
    let resp = send(&app, request("GET", "/api/bookings/getById/99", Some(&token), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Booking not found with ID: 99");
}

#[tokio::test]
async fn status_update_without_status_is_400() {
    let app = app();
    let (token, _) = sign_up(&app, "ana", "Customer").await;
    let resp = send(
        &app,
        request("PUT", "/api/bookings/updateStatus/1", Some(&token), Some(json!({}))),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- messaging ---

#[tokio::test]
async fn message_raises_notification_and_partner_entry() {
    let app = app();
    let (ana_token, ana) = sign_up(&app, "ana", "Customer").await;
    let (pedro_token, pedro) = sign_up(&app, "pedro", "Service Provider").await;

    let resp = send(
        &app,
        request(
            "POST",
            "/api/messages/postMessage",
            Some(&ana_token),
            Some(json!({
                "sender": {"userId": ana},
                "receiver": {"userId": pedro},
                "messageText": "Hello, available tomorrow?",
                "status": "UNREAD"
            })),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let message: Value = body_json(resp).await;
    assert!(message["sentAt"].is_array());
    assert!(message["sender"].get("password").is_none());

    let resp = send(
        &app,
        request(
            "GET",
            &format!("/api/notifications/user/{pedro}"),
            Some(&pedro_token),
            None,
        ),
    )
    .await;
    let notes: Vec<Value> = body_json(resp).await;
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["type"], "message");
    assert!(notes[0]["message"]
        .as_str()
        .unwrap()
        .starts_with("ana Tester sent you a message"));

    let resp = send(
        &app,
        request(
            "GET",
            &format!("/api/messages/conversation-partners/{pedro}"),
            Some(&pedro_token),
            None,
        ),
    )
    .await;
    let partners: Vec<Value> = body_json(resp).await;
    assert_eq!(partners.len(), 1);
    assert_eq!(partners[0]["userId"], ana);
    assert_eq!(partners[0]["unreadCount"], 1);

    let resp = send(
        &app,
        request(
            "PUT",
            "/api/messages/updateMessage/status",
            Some(&pedro_token),
            Some(json!({"receiver": {"userId": pedro}, "sender": {"userId": ana}, "status": "READ"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(
        &app,
        request(
            "GET",
            &format!("/api/messages/conversation-partners/{pedro}"),
            Some(&pedro_token),
            None,
        ),
    )
    .await;
    let partners: Vec<Value> = body_json(resp).await;
    assert_eq!(partners[0]["unreadCount"], 0);
}

// --- payments ---

#[tokio::test]
async fn checkout_uses_error_envelope() {
    let app = app();
    let (token, _) = sign_up(&app, "ana", "Customer").await;
    let resp = send(
        &app,
        request(
            "POST",
            "/api/create-gcash-checkout",
            Some(&token),
            Some(json!({"amount": 0, "description": "x", "successUrl": "a", "cancelUrl": "b"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "Amount must be greater than zero");

    let resp = send(
        &app,
        request(
            "POST",
            "/api/create-gcash-checkout",
            Some(&token),
            Some(json!({"amount": 450.0, "description": "x", "successUrl": "a", "cancelUrl": "b"})),
        ),
    )
    .await;
    let body: Value = body_json(resp).await;
    assert!(body["checkout_url"]
        .as_str()
        .unwrap()
        .starts_with("https://checkout.paymongo.com/"));
}

// --- schedules ---

#[tokio::test]
async fn schedule_availability() {
    let app = app();
    let (token, _) = sign_up(&app, "pedro", "Service Provider").await;
    let resp = send(
        &app,
        request(
            "POST",
            "/api/schedules/provider/1",
            Some(&token),
            Some(json!({"dayOfWeek": "FRIDAY", "startTime": "08:00:00", "endTime": "17:00:00"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    // 2025-05-02 is a Friday.
    let resp = send(
        &app,
        request(
            "GET",
            "/api/schedules/check-availability?providerId=1&date=2025-05-02&time=09%3A30",
            Some(&token),
            None,
        ),
    )
    .await;
    let free: bool = body_json(resp).await;
    assert!(free);

    let resp = send(
        &app,
        request(
            "GET",
            "/api/schedules/check-availability?providerId=1&date=2025-05-03&time=09:30",
            Some(&token),
            None,
        ),
    )
    .await;
    let free: bool = body_json(resp).await;
    assert!(!free);
}

// --- psgc ---

#[tokio::test]
async fn psgc_is_public() {
    let resp = send(
        &app(),
        request("GET", "/provinces/072200000/cities-municipalities", None, None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list: Vec<Value> = body_json(resp).await;
    assert_eq!(list.len(), 2);
}

// --- admin portal ---

#[tokio::test]
async fn admin_routes_refuse_non_admins() {
    let app = app();
    let (token, _) = sign_up(&app, "ana", "Customer").await;
    for (method, uri) in [
        ("GET", "/api/user-auth/getAll"),
        ("DELETE", "/api/user-auth/1"),
        ("DELETE", "/api/service-categories/delete/1"),
        ("DELETE", "/api/verification/reject/1"),
    ] {
        let resp = send(&app, request(method, uri, Some(&token), None)).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        let body: Value = body_json(resp).await;
        assert_eq!(body["message"], "Admin access required");
    }
}

#[tokio::test]
async fn admin_manages_users_and_categories() {
    let app = app();
    let (admin, _) = sign_up(&app, "root", "Admin").await;
    let (ana_token, ana_id) = sign_up(&app, "ana", "Customer").await;

    let resp = send(&app, request("GET", "/api/user-auth/getAll", Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<Value> = body_json(resp).await;
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password").is_none()));

    let resp = send(
        &app,
        request(
            "POST",
            "/api/service-categories/create",
            Some(&admin),
            Some(json!({"categoryName": "Gardening", "description": "Lawns"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let category: Value = body_json(resp).await;
    let category_id = category["categoryId"].as_i64().unwrap();
    assert_eq!(category_id, 5);

    let resp = send(
        &app,
        request(
            "PUT",
            &format!("/api/service-categories/update/{category_id}"),
            Some(&admin),
            Some(json!({"categoryName": "Landscaping"})),
        ),
    )
    .await;
    let updated: Value = body_json(resp).await;
    assert_eq!(updated["categoryName"], "Landscaping");
    assert_eq!(updated["description"], "Lawns");

    let resp = send(
        &app,
        request(
            "POST",
            "/api/service-categories/create",
            Some(&admin),
            Some(json!({"categoryName": " "})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/api/service-categories/delete/{category_id}");
    let resp = send(&app, request("DELETE", &uri, Some(&admin), None)).await;
    let text = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
    assert!(text.ends_with("deleted successfully."));

    let uri = format!("/api/user-auth/{ana_id}");
    let resp = send(&app, request("DELETE", &uri, Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, request("DELETE", &uri, Some(&admin), None)).await;
    let text = String::from_utf8(body_bytes(resp).await.to_vec()).unwrap();
    assert_eq!(text, "User authentication record not found.");

    // The deleted user's session is gone too.
    let resp = send(
        &app,
        request("GET", "/api/user-auth/validate-token", Some(&ana_token), None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_rejects_provider_verification() {
    let app = app();
    let (admin, _) = sign_up(&app, "root", "Admin").await;
    let (pedro, _) = sign_up(&app, "pedro", "Service Provider").await;

    let resp = send(
        &app,
        request(
            "PUT",
            "/api/service-providers/update/1",
            Some(&admin),
            Some(json!({"verified": true})),
        ),
    )
    .await;
    let provider: Value = body_json(resp).await;
    assert_eq!(provider["verified"], true);
    assert_eq!(provider["businessName"], "pedro Co");

    let resp = send(&app, request("DELETE", "/api/verification/reject/1", Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, request("GET", "/api/service-providers/getById/1", Some(&pedro), None)).await;
    let provider: Value = body_json(resp).await;
    assert_eq!(provider["verified"], false);

    let resp = send(&app, request("DELETE", "/api/verification/reject/9", Some(&admin), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cash_verification_needs_code_and_booking() {
    let app = app();
    let (token, _) = sign_up(&app, "pedro", "Service Provider").await;
    let resp = send(
        &app,
        request(
            "POST",
            "/api/transactions/verify-cash-payment/1",
            Some(&token),
            Some(json!({"verificationCode": ""})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(
        &app,
        request(
            "POST",
            "/api/transactions/verify-cash-payment/1",
            Some(&token),
            Some(json!({"verificationCode": "4821"})),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Booking not found with ID: 1");
}
