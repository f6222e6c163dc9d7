mod accounts;
mod auth;
mod bookings;
mod catalogue;
mod messaging;
mod payments;
mod psgc;
mod schedules;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use serde_json::Value;

use crate::error::{MockError, MockResult};
use crate::store::Row;
use crate::Db;

/// Routes reachable without a token: login, registration and the PSGC tree.
pub fn public() -> Router<Db> {
    Router::new()
        .route("/api/user-auth/login", post(auth::login))
        .route("/api/user-auth/register", post(auth::register))
        .route("/provinces", get(psgc::provinces))
        .route(
            "/provinces/{code}/cities-municipalities",
            get(psgc::municipalities),
        )
        .route(
            "/cities-municipalities/{code}/barangays",
            get(psgc::barangays),
        )
}

/// Routes behind the bearer-token check.
pub fn protected() -> Router<Db> {
    Router::new()
        // auth
        .route("/api/user-auth/validate-token", get(auth::validate_token))
        .route(
            "/api/user-auth/change-password/{auth_id}",
            put(auth::change_password),
        )
        .route("/api/user-auth/getAll", get(auth::list_users))
        .route("/api/user-auth/{auth_id}", delete(auth::delete_user))
        // customers / providers / addresses
        .route("/api/customers/getAll", get(accounts::list_customers))
        .route("/api/customers/getById/{id}", get(accounts::get_customer))
        .route("/api/customers/postCustomer", post(accounts::create_customer))
        .route(
            "/api/customers/updateCustomer/{id}",
            put(accounts::update_customer),
        )
        .route("/api/service-providers/getAll", get(accounts::list_providers))
        .route(
            "/api/service-providers/getById/{id}",
            get(accounts::get_provider),
        )
        .route(
            "/api/service-providers/getByAuthId",
            get(accounts::provider_by_auth_id),
        )
        .route(
            "/api/service-providers/update/{id}",
            put(accounts::update_provider),
        )
        .route(
            "/api/verification/reject/{id}",
            delete(accounts::reject_provider),
        )
        .route("/api/addresses/getAll", get(accounts::list_addresses))
        .route("/api/addresses/getById/{id}", get(accounts::get_address))
        .route(
            "/api/addresses/customer/{id}",
            get(accounts::customer_addresses),
        )
        .route(
            "/api/addresses/provider/{id}",
            get(accounts::provider_addresses),
        )
        .route("/api/addresses/postAddress", post(accounts::create_address))
        .route(
            "/api/addresses/updateAddress/{id}",
            put(accounts::update_address),
        )
        .route("/api/addresses/delete/{id}", delete(accounts::delete_address))
        // catalogue
        .route("/api/service-categories/getAll", get(catalogue::list_categories))
        .route("/api/service-categories/create", post(catalogue::create_category))
        .route(
            "/api/service-categories/update/{id}",
            put(catalogue::update_category),
        )
        .route(
            "/api/service-categories/delete/{id}",
            delete(catalogue::delete_category),
        )
        .route("/api/services/getAll", get(catalogue::list_services))
        .route("/api/services/getById/{id}", get(catalogue::get_service))
        .route("/api/services/provider/{id}", get(catalogue::provider_services))
        .route(
            "/api/services/postService/{provider_id}/{category_id}",
            post(catalogue::create_service),
        )
        .route(
            "/api/services/updateService/{id}/{provider_id}/{category_id}",
            put(catalogue::update_service),
        )
        .route("/api/services/delete/{id}", delete(catalogue::delete_service))
        // bookings
        .route("/api/bookings/getAll", get(bookings::list_bookings))
        .route("/api/bookings/getById/{id}", get(bookings::get_booking))
        .route("/api/bookings/customer/{id}", get(bookings::customer_bookings))
        .route("/api/bookings/provider/{id}", get(bookings::provider_bookings))
        .route("/api/bookings/postBooking", post(bookings::create_booking))
        .route("/api/bookings/updateStatus/{id}", put(bookings::update_status))
        .route("/api/bookings/complete/{id}", put(bookings::complete_booking))
        .route("/api/bookings/cancel/{id}", put(bookings::cancel_booking))
        .route("/api/reviews/provider/{id}", get(bookings::provider_reviews))
        .route("/api/reviews/can-review", get(bookings::can_review))
        .route("/api/reviews/createWithIDs", post(bookings::create_review))
        // payments
        .route("/api/transactions/getAll", get(payments::list_transactions))
        .route(
            "/api/transactions/postTransaction",
            post(payments::create_transaction),
        )
        .route(
            "/api/transactions/confirm-cash-payment/{booking_id}",
            post(payments::confirm_cash_payment),
        )
        .route(
            "/api/transactions/verify-cash-payment/{booking_id}",
            post(payments::verify_cash_payment),
        )
        .route("/api/create-gcash-checkout", post(payments::create_checkout))
        // messaging
        .route(
            "/api/messages/conversation-partners/{user_id}",
            get(messaging::conversation_partners),
        )
        .route(
            "/api/messages/conversation/{user_id}/{other_user_id}",
            get(messaging::conversation),
        )
        .route("/api/messages/postMessage", post(messaging::post_message))
        .route(
            "/api/messages/updateMessage/status",
            put(messaging::update_message_status),
        )
        .route(
            "/api/notifications/user/{user_id}",
            get(messaging::user_notifications),
        )
        .route(
            "/api/notifications/postNotification",
            post(messaging::post_notification),
        )
        .route(
            "/api/notifications/markAsRead/{id}",
            put(messaging::mark_as_read),
        )
        .route(
            "/api/notifications/markAllAsRead/{user_id}",
            put(messaging::mark_all_as_read),
        )
        // schedules
        .route(
            "/api/schedules/provider/{id}",
            get(schedules::provider_schedules).post(schedules::create_schedule),
        )
        .route(
            "/api/schedules/provider/{id}/day/{day}",
            get(schedules::provider_schedules_by_day),
        )
        .route(
            "/api/schedules/{id}",
            put(schedules::update_schedule).delete(schedules::delete_schedule),
        )
        .route(
            "/api/schedules/check-availability",
            get(schedules::check_availability),
        )
}

/// Required nested id in a request body, e.g. `booking.bookingId`.
fn required_ref(body: &Row, outer: &str, inner: &str) -> MockResult<i64> {
    crate::store::ref_id(body, outer, inner)
        .ok_or_else(|| MockError::BadRequest(format!("{outer}.{inner} is required")))
}

/// Copy every field of `patch` except the id key onto `row`.
fn merge(row: &mut Row, patch: Row, id_key: &str) {
    for (key, value) in patch {
        if key != id_key {
            row.insert(key, value);
        }
    }
}

fn rows(list: Vec<Row>) -> Vec<Value> {
    list.into_iter().map(Value::Object).collect()
}
