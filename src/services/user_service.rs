// ==================== USERS & ROLES ====================
// Role checks are advisory lookups: there is no session or token behind them.

use crate::database::{BookingStore, UserStore};
use crate::models::{InsertResult, UpdateResult, User, ROLE_ADMIN, ROLE_BUYER};
use crate::utils::AppError;

/// Outcome of deleting a user together with their bookings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteUserOutcome {
    pub user_deleted: bool,
    pub bookings_deleted: u64,
}

/// `role` mirrors `userType`; "admin" is the only value with special meaning.
pub fn derive_role(user_type: &str) -> String {
    if user_type == ROLE_ADMIN {
        ROLE_ADMIN.to_string()
    } else {
        user_type.to_string()
    }
}

pub async fn create_user(users: &dyn UserStore, mut user: User) -> Result<InsertResult, AppError> {
    let role = user
        .user_type()
        .map(derive_role)
        .ok_or_else(|| AppError::InvalidRequest("userType is required".to_string()))?;

    user.set_role(&role);
    user.clear_id();

    log::info!(
        "👤 Creating user {} with role {}",
        user.email().unwrap_or("<no email>"),
        role
    );

    users.insert(user).await
}

pub async fn is_buyer(users: &dyn UserStore, email: &str) -> Result<bool, AppError> {
    let user = users.find_by_email(email).await?;
    Ok(user.is_some_and(|u| u.has_role(ROLE_BUYER)))
}

pub async fn is_admin(users: &dyn UserStore, email: &str) -> Result<bool, AppError> {
    let user = users.find_by_email(email).await?;
    Ok(user.is_some_and(|u| u.has_role(ROLE_ADMIN)))
}

/// Upserts `role = "buyer"`. A user created this way only has `email` and `role`.
pub async fn promote_to_buyer(users: &dyn UserStore, email: &str) -> Result<UpdateResult, AppError> {
    let result = users.upsert_role(email, ROLE_BUYER).await?;

    if result.upserted_id.is_some() {
        log::info!("🆕 No user matched {}, created buyer record", email);
    }

    Ok(result)
}

/// Deletes the user, then every booking whose `userEmail` matches.
///
/// The booking delete runs even when no user was found, and the two steps
/// are not atomic: a failure after the first leaves the bookings in place.
pub async fn delete_user_cascade(
    users: &dyn UserStore,
    bookings: &dyn BookingStore,
    email: &str,
) -> Result<DeleteUserOutcome, AppError> {
    let deleted_users = users.delete_by_email(email).await?;
    let bookings_deleted = bookings.delete_by_owner(email).await?;

    log::info!(
        "🗑️  Deleted {} user(s) and {} booking(s) for {}",
        deleted_users,
        bookings_deleted,
        email
    );

    Ok(DeleteUserOutcome {
        user_deleted: deleted_users == 1,
        bookings_deleted,
    })
}
