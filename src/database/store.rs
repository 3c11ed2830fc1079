// ==================== STORE SEAMS ====================
// Handlers only see these traits; MongoDB backs them in production and an
// in-memory store backs them in tests.

use crate::models::{Booking, InsertResult, UpdateResult, User};
use crate::utils::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait BookingStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Booking>, AppError>;

    /// Inserts the booking and returns the id assigned by the store.
    async fn insert(&self, booking: Booking) -> Result<String, AppError>;

    /// Exact match on `userEmail`. `None` matches bookings whose
    /// `userEmail` is missing or null.
    async fn find_by_owner(&self, user_email: Option<&str>) -> Result<Vec<Booking>, AppError>;

    /// Fails with `InvalidRequest` when `id` is not a valid ObjectId.
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;

    /// Returns the number of deleted bookings.
    async fn delete_by_owner(&self, user_email: &str) -> Result<u64, AppError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn insert(&self, user: User) -> Result<InsertResult, AppError>;

    /// Sets `role` on the user with this email, inserting `{email, role}`
    /// when no user matches.
    async fn upsert_role(&self, email: &str, role: &str) -> Result<UpdateResult, AppError>;

    /// Deletes at most one user; returns the deleted count.
    async fn delete_by_email(&self, email: &str) -> Result<u64, AppError>;
}
