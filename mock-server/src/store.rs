//! In-memory tables backing the mock backend.
//!
//! Rows are kept as JSON objects with the backend's camelCase field names so
//! handlers can echo the same nested shapes the real server produces.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde_json::{json, Map, Value};

pub type Row = Map<String, Value>;

/// One resource table with server-assigned ids.
#[derive(Debug, Default)]
pub struct Table {
    id_key: &'static str,
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

impl Table {
    pub fn new(id_key: &'static str) -> Self {
        Self {
            id_key,
            next_id: 0,
            rows: BTreeMap::new(),
        }
    }

    /// Assign the next id, store the row and return the stored copy.
    pub fn insert(&mut self, mut row: Row) -> Row {
        self.next_id += 1;
        row.insert(self.id_key.to_string(), json!(self.next_id));
        self.rows.insert(self.next_id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut Row> {
        self.rows.get_mut(&id)
    }

    pub fn remove(&mut self, id: i64) -> Option<Row> {
        self.rows.remove(&id)
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut Row> {
        self.rows.values_mut()
    }

    pub fn all(&self) -> Vec<Row> {
        self.rows.values().cloned().collect()
    }

    /// Rows whose nested `outer.inner` id equals `id`.
    pub fn filter_by_ref(&self, outer: &str, inner: &str, id: i64) -> Vec<Row> {
        self.rows()
            .filter(|row| ref_id(row, outer, inner) == Some(id))
            .cloned()
            .collect()
    }
}

/// Login identity plus the secret that never leaves the store.
#[derive(Debug, Clone)]
pub struct Account {
    pub user_name: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug)]
pub struct Store {
    pub users: Table,
    pub accounts: HashMap<i64, Account>,
    pub sessions: HashMap<String, i64>,
    pub customers: Table,
    pub providers: Table,
    pub addresses: Table,
    pub categories: Table,
    pub services: Table,
    pub bookings: Table,
    pub transactions: Table,
    pub messages: Table,
    pub notifications: Table,
    pub reviews: Table,
    pub schedules: Table,
    pub provinces: Vec<Value>,
    pub municipalities: Vec<Value>,
    pub barangays: Vec<Value>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: Table::new("userId"),
            accounts: HashMap::new(),
            sessions: HashMap::new(),
            customers: Table::new("customerId"),
            providers: Table::new("providerId"),
            addresses: Table::new("addressId"),
            categories: Table::new("categoryId"),
            services: Table::new("serviceId"),
            bookings: Table::new("bookingId"),
            transactions: Table::new("transactionId"),
            messages: Table::new("messageId"),
            notifications: Table::new("notificationId"),
            reviews: Table::new("reviewId"),
            schedules: Table::new("scheduleId"),
            provinces: Vec::new(),
            municipalities: Vec::new(),
            barangays: Vec::new(),
        }
    }
}

impl Store {
    /// Store with the reference data the real backend ships with: service
    /// categories and a slice of the PSGC tree.
    pub fn seeded() -> Self {
        let mut store = Self::default();
        for name in ["Cleaning", "Plumbing", "Electrical", "Appliance Repair"] {
            let mut row = Row::new();
            row.insert("categoryName".to_string(), json!(name));
            store.categories.insert(row);
        }
        store.provinces = vec![
            json!({"code": "072200000", "name": "Cebu", "regionCode": "070000000"}),
            json!({"code": "071200000", "name": "Bohol", "regionCode": "070000000"}),
        ];
        store.municipalities = vec![
            json!({"code": "072217000", "name": "City of Cebu", "provinceCode": "072200000"}),
            json!({"code": "072230000", "name": "City of Mandaue", "provinceCode": "072200000"}),
            json!({"code": "071242000", "name": "City of Tagbilaran", "provinceCode": "071200000"}),
        ];
        store.barangays = vec![
            json!({"code": "072217001", "name": "Adlaon", "cityCode": "072217000"}),
            json!({"code": "072217002", "name": "Agsungot", "cityCode": "072217000"}),
            json!({"code": "072230001", "name": "Alang-alang", "cityCode": "072230000"}),
        ];
        store
    }

    /// Public view of a login identity: everything but the password.
    pub fn public_user(&self, user_id: i64) -> Option<Value> {
        self.users.get(user_id).map(|row| Value::Object(row.clone()))
    }

    /// Display name for notifications: profile name when one exists.
    pub fn display_name(&self, user_id: i64) -> String {
        let profile = self
            .customers
            .rows()
            .chain(self.providers.rows())
            .find(|row| ref_id(row, "userAuth", "userId") == Some(user_id));
        let from_profile = profile.and_then(|row| {
            let first = row.get("firstName").and_then(Value::as_str).unwrap_or("");
            let last = row.get("lastName").and_then(Value::as_str).unwrap_or("");
            let name = format!("{first} {last}").trim().to_string();
            (!name.is_empty()).then_some(name)
        });
        from_profile
            .or_else(|| self.accounts.get(&user_id).map(|a| a.user_name.clone()))
            .unwrap_or_else(|| format!("User {user_id}"))
    }
}

/// `row[outer][inner]` as an id.
pub fn ref_id(row: &Row, outer: &str, inner: &str) -> Option<i64> {
    row.get(outer)?.get(inner)?.as_i64()
}

/// Current local time in the integer-array form Jackson emits.
pub fn now_parts() -> Value {
    timestamp_parts(Local::now().naive_local())
}

pub fn timestamp_parts(at: NaiveDateTime) -> Value {
    json!([
        at.year(),
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second()
    ])
}
