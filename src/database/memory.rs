use super::mongo_store::parse_object_id;
use super::{BookingStore, UserStore};
use crate::models::{Booking, InsertResult, UpdateResult, User};
use crate::utils::AppError;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory stand-in for both collections, with MongoDB-like matching.
#[derive(Default)]
pub struct MemoryStore {
    bookings: Mutex<Vec<Booking>>,
    users: Mutex<Vec<User>>,
    fail_bookings: AtomicBool,
    fail_users: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with a database error.
    pub fn fail_all(&self) {
        self.fail_bookings_collection();
        self.fail_users.store(true, Ordering::SeqCst);
    }

    /// Only calls on the bookings collection fail.
    pub fn fail_bookings_collection(&self) {
        self.fail_bookings.store(true, Ordering::SeqCst);
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.users.lock().unwrap().clone()
    }

    fn check(flag: &AtomicBool) -> Result<(), AppError> {
        if flag.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Booking>, AppError> {
        Self::check(&self.fail_bookings)?;
        Ok(self.bookings())
    }

    async fn insert(&self, mut booking: Booking) -> Result<String, AppError> {
        Self::check(&self.fail_bookings)?;
        let id = match booking.id() {
            Some(id) => id.to_string(),
            None => ObjectId::new().to_hex(),
        };
        booking.set_id(id.clone());
        self.bookings.lock().unwrap().push(booking);
        Ok(id)
    }

    async fn find_by_owner(&self, user_email: Option<&str>) -> Result<Vec<Booking>, AppError> {
        Self::check(&self.fail_bookings)?;
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.is_owned_by(user_email))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        Self::check(&self.fail_bookings)?;
        let id = parse_object_id(id)?.to_hex();
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id() == Some(id.as_str()))
            .cloned())
    }

    async fn delete_by_owner(&self, user_email: &str) -> Result<u64, AppError> {
        Self::check(&self.fail_bookings)?;
        let mut bookings = self.bookings.lock().unwrap();
        let before = bookings.len();
        bookings.retain(|b| !b.is_owned_by(Some(user_email)));
        Ok((before - bookings.len()) as u64)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Self::check(&self.fail_users)?;
        Ok(self.users())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Self::check(&self.fail_users)?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email() == Some(email))
            .cloned())
    }

    async fn insert(&self, mut user: User) -> Result<InsertResult, AppError> {
        Self::check(&self.fail_users)?;
        let id = match user.id() {
            Some(id) => id.to_string(),
            None => ObjectId::new().to_hex(),
        };
        user.set_id(id.clone());
        self.users.lock().unwrap().push(user);
        Ok(InsertResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn upsert_role(&self, email: &str, role: &str) -> Result<UpdateResult, AppError> {
        Self::check(&self.fail_users)?;
        let mut users = self.users.lock().unwrap();

        if let Some(user) = users.iter_mut().find(|u| u.email() == Some(email)) {
            let modified = !user.has_role(role);
            user.set_role(role);
            return Ok(UpdateResult {
                acknowledged: true,
                matched_count: 1,
                modified_count: u64::from(modified),
                upserted_count: 0,
                upserted_id: None,
            });
        }

        let id = ObjectId::new().to_hex();
        let mut fields = Map::new();
        fields.insert("email".to_string(), Value::String(email.to_string()));
        let mut user = User::from(fields);
        user.set_id(id.clone());
        user.set_role(role);
        users.push(user);

        Ok(UpdateResult {
            acknowledged: true,
            matched_count: 0,
            modified_count: 0,
            upserted_count: 1,
            upserted_id: Some(id),
        })
    }

    async fn delete_by_email(&self, email: &str) -> Result<u64, AppError> {
        Self::check(&self.fail_users)?;
        let mut users = self.users.lock().unwrap();
        match users.iter().position(|u| u.email() == Some(email)) {
            Some(index) => {
                users.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
