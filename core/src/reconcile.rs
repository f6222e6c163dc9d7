//! Pure reconciliation over already-fetched lists.
//!
//! Nothing here talks to the backend. The async client pairs these with the
//! list endpoints they consume.

use std::collections::{HashMap, HashSet};

use crate::types::{Customer, Notification, Role, ServiceProvider, UserSummary};

const MESSAGE_MARKER: &str = " sent you a message";
const UNKNOWN_SENDER: &str = "Unknown";

/// Merge customers and providers into one directory and keep the entries
/// whose name, user name or business name contains `query`
/// (case-insensitive). A blank query keeps everyone.
///
/// Entries without a linked login identity are skipped since they cannot be
/// messaged. When the same user appears twice the first entry wins.
pub fn search_users(
    customers: &[Customer],
    providers: &[ServiceProvider],
    query: &str,
) -> Vec<UserSummary> {
    let needle = query.trim().to_lowercase();
    let mut seen = HashSet::new();

    let customer_entries = customers.iter().filter_map(|c| {
        let auth = c.user_auth.as_ref()?;
        Some(UserSummary {
            user_id: auth.user_id?,
            user_name: auth.user_name.clone(),
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            business_name: None,
            role: Role::Customer,
            profile_image: c.profile_image.clone(),
        })
    });
    let provider_entries = providers.iter().filter_map(|p| {
        let auth = p.user_auth.as_ref()?;
        Some(UserSummary {
            user_id: auth.user_id?,
            user_name: auth.user_name.clone(),
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            business_name: Some(p.business_name.clone()).filter(|b| !b.is_empty()),
            role: Role::ServiceProvider,
            profile_image: p.service_provider_image.clone(),
        })
    });

    customer_entries
        .chain(provider_entries)
        .filter(|u| needle.is_empty() || matches_query(u, &needle))
        .filter(|u| seen.insert(u.user_id))
        .collect()
}

fn matches_query(user: &UserSummary, needle: &str) -> bool {
    let full_name = format!("{} {}", user.first_name, user.last_name);
    let hit = [
        Some(full_name.as_str()),
        Some(user.user_name.as_str()),
        user.business_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle));
    hit
}

/// Name of the sender in a `"<name> sent you a message: ..."` notification.
pub fn message_sender(notification: &Notification) -> &str {
    notification
        .message
        .as_deref()
        .and_then(|text| text.find(MESSAGE_MARKER).map(|idx| &text[..idx]))
        .filter(|name| !name.is_empty() && !name.contains(':'))
        .unwrap_or(UNKNOWN_SENDER)
}

/// Collapse message notifications to the newest one per sender; every other
/// notification passes through. Order: collapsed messages first (by first
/// appearance of the sender), then the rest in input order.
pub fn collapse_message_notifications(notifications: &[Notification]) -> Vec<&Notification> {
    let mut order: Vec<&str> = Vec::new();
    let mut latest: HashMap<&str, &Notification> = HashMap::new();
    let mut others = Vec::new();

    for n in notifications {
        if !n.is_message() {
            others.push(n);
            continue;
        }
        let sender = message_sender(n);
        match latest.get(sender) {
            None => {
                order.push(sender);
                latest.insert(sender, n);
            }
            // Ties keep the earlier entry.
            Some(current) if n.created_at > current.created_at => {
                latest.insert(sender, n);
            }
            Some(_) => {}
        }
    }

    order
        .into_iter()
        .filter_map(|sender| latest.get(sender).copied())
        .chain(others)
        .collect()
}

/// Badge count: unread notifications after collapsing message threads.
pub fn unread_count(notifications: &[Notification]) -> usize {
    collapse_message_notifications(notifications)
        .into_iter()
        .filter(|n| n.is_unread())
        .count()
}
