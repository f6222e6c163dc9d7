//! JSON-named operations for hosts that can't name Rust types.
//!
//! A host sends `{"op": "get_booking", "bookingId": 7}`; the remaining keys
//! are the endpoint's own camelCase fields. Parse results come back as the
//! endpoint output re-serialized to JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serbisyo_core::endpoints::{
    addresses, auth, bookings, customers, messages, notifications, payments, providers, psgc,
    reviews, schedules, services,
};
use serbisyo_core::{ApiClient, ApiError, HttpRequest, HttpResponse};

macro_rules! operations {
    ($( $variant:ident => $endpoint:ty ),* $(,)?) => {
        /// Every backend operation, tagged by `op`.
        #[derive(Debug, Clone, Serialize, Deserialize)]
        #[serde(tag = "op", rename_all = "snake_case")]
        pub enum Operation {
            $( $variant($endpoint), )*
        }

        impl Operation {
            pub fn build(&self, client: &ApiClient, token: Option<&str>) -> Result<HttpRequest, ApiError> {
                match self {
                    $( Operation::$variant(endpoint) => client.build(endpoint, token), )*
                }
            }

            pub fn parse(&self, client: &ApiClient, response: HttpResponse) -> Result<Value, ApiError> {
                match self {
                    $( Operation::$variant(endpoint) => to_json(client.parse(endpoint, response)?), )*
                }
            }
        }
    };
}

operations! {
    // auth
    Login => auth::Login,
    Register => auth::Register,
    ChangePassword => auth::ChangePassword,
    ValidateToken => auth::ValidateToken,
    ListUsers => auth::ListUsers,
    DeleteUser => auth::DeleteUser,
    // customers / providers / addresses
    ListCustomers => customers::ListCustomers,
    GetCustomer => customers::GetCustomer,
    CreateCustomer => customers::CreateCustomer,
    UpdateCustomer => customers::UpdateCustomer,
    ListProviders => providers::ListProviders,
    GetProvider => providers::GetProvider,
    ProviderByAuthId => providers::ProviderByAuthId,
    UpdateProvider => providers::UpdateProvider,
    ApproveProvider => providers::ApproveProvider,
    RejectProvider => providers::RejectProvider,
    ListAddresses => addresses::ListAddresses,
    GetAddress => addresses::GetAddress,
    CustomerAddresses => addresses::CustomerAddresses,
    ProviderAddresses => addresses::ProviderAddresses,
    CreateAddress => addresses::CreateAddress,
    UpdateAddress => addresses::UpdateAddress,
    DeleteAddress => addresses::DeleteAddress,
    // catalogue
    ListCategories => services::ListCategories,
    CreateCategory => services::CreateCategory,
    UpdateCategory => services::UpdateCategory,
    DeleteCategory => services::DeleteCategory,
    ListServices => services::ListServices,
    GetService => services::GetService,
    ProviderServices => services::ProviderServices,
    CreateService => services::CreateService,
    UpdateService => services::UpdateService,
    DeleteService => services::DeleteService,
    // bookings and reviews
    ListBookings => bookings::ListBookings,
    GetBooking => bookings::GetBooking,
    CustomerBookings => bookings::CustomerBookings,
    ProviderBookings => bookings::ProviderBookings,
    CreateBooking => bookings::CreateBooking,
    UpdateBookingStatus => bookings::UpdateBookingStatus,
    CompleteBooking => bookings::CompleteBooking,
    CancelBooking => bookings::CancelBooking,
    ProviderReviews => reviews::ProviderReviews,
    CanReview => reviews::CanReview,
    SubmitReview => reviews::SubmitReview,
    // payments
    ListTransactions => payments::ListTransactions,
    CreateTransaction => payments::CreateTransaction,
    ConfirmCashPayment => payments::ConfirmCashPayment,
    VerifyCashPayment => payments::VerifyCashPayment,
    CreateCheckout => payments::CreateCheckout,
    // messaging
    ConversationPartners => messages::ConversationPartners,
    Conversation => messages::Conversation,
    SendMessage => messages::SendMessage,
    MarkConversationRead => messages::MarkConversationRead,
    UserNotifications => notifications::UserNotifications,
    CreateNotification => notifications::CreateNotification,
    MarkNotificationRead => notifications::MarkNotificationRead,
    MarkAllNotificationsRead => notifications::MarkAllNotificationsRead,
    // schedules
    ProviderSchedules => schedules::ProviderSchedules,
    ProviderSchedulesByDay => schedules::ProviderSchedulesByDay,
    CreateSchedule => schedules::CreateSchedule,
    UpdateSchedule => schedules::UpdateSchedule,
    DeleteSchedule => schedules::DeleteSchedule,
    CheckAvailability => schedules::CheckAvailability,
    // PSGC
    ListProvinces => psgc::ListProvinces,
    ListMunicipalities => psgc::ListMunicipalities,
    ListBarangays => psgc::ListBarangays,
}

impl Operation {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::with_base_url("http://localhost:8080")
    }

    #[test]
    fn fields_sit_next_to_the_tag() {
        let op = Operation::from_json(r#"{"op":"get_booking","bookingId":7}"#).unwrap();
        let req = op.build(&client(), Some("tok")).unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/bookings/getById/7");
    }

    #[test]
    fn unit_operations_need_only_the_tag() {
        let op = Operation::from_json(r#"{"op":"list_bookings"}"#).unwrap();
        assert!(matches!(op, Operation::ListBookings(_)));
        let list = op.parse(&client(), HttpResponse::new(200, "[]")).unwrap();
        assert_eq!(list, serde_json::json!([]));
    }

    #[test]
    fn unknown_op_is_rejected() {
        assert!(Operation::from_json(r#"{"op":"drop_tables"}"#).is_err());
        assert!(Operation::from_json(r#"{"bookingId":7}"#).is_err());
    }

    #[test]
    fn unit_outputs_become_null() {
        let op = Operation::from_json(r#"{"op":"mark_notification_read","notificationId":3}"#).unwrap();
        let value = op.parse(&client(), HttpResponse::new(200, "{}")).unwrap();
        assert_eq!(value, Value::Null);
    }

    #[test]
    fn round_trips_through_json() {
        let op = Operation::from_json(
            r#"{"op":"send_message","senderId":1,"receiverId":2,"messageText":"hi"}"#,
        )
        .unwrap();
        let raw = serde_json::to_string(&op).unwrap();
        let again = Operation::from_json(&raw).unwrap();
        let req = again.build(&client(), Some("tok")).unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/messages/postMessage");
    }

    #[test]
    fn admin_operations_are_named() {
        let op = Operation::from_json(r#"{"op":"reject_provider","providerId":4}"#).unwrap();
        let req = op.build(&client(), Some("tok")).unwrap();
        assert_eq!(req.path, "http://localhost:8080/api/verification/reject/4");

        let op = Operation::from_json(
            r#"{"op":"create_category","category":{"categoryName":"Gardening"}}"#,
        )
        .unwrap();
        assert!(matches!(op, Operation::CreateCategory(_)));

        let op = Operation::from_json(r#"{"op":"list_users"}"#).unwrap();
        let users = op
            .parse(&client(), HttpResponse::new(200, r#"[{"userId":1,"userName":"root","role":"Admin"}]"#))
            .unwrap();
        assert_eq!(users[0]["role"], "Admin");
    }
}
