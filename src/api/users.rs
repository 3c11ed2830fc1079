use actix_web::{web, HttpResponse};
use crate::{
    api::AppState,
    models::{AdminCheckResponse, BuyerCheckResponse, ErrorResponse, MessageResponse, UpdateResult, User},
    services::user_service,
    utils::AppError,
};

/// GET /users/buyer/{email} - `isBuyer` is false for unknown users
#[utoipa::path(
    get,
    path = "/users/buyer/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Buyer check result", body = BuyerCheckResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn is_buyer(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("🔎 GET /users/buyer/{}", email);

    match user_service::is_buyer(state.users.as_ref(), &email).await {
        Ok(is_buyer) => HttpResponse::Ok().json(BuyerCheckResponse { is_buyer }),
        Err(e) => {
            log::error!("❌ Error checking buyer role: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to check buyer role."))
        }
    }
}

/// GET /users/admin/{email} - Non-admins get 403, unlike the buyer check
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User is an admin", body = AdminCheckResponse),
        (status = 403, description = "User is not an admin or does not exist", body = AdminCheckResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn is_admin(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("🔎 GET /users/admin/{}", email);

    match user_service::is_admin(state.users.as_ref(), &email).await {
        Ok(true) => HttpResponse::Ok().json(AdminCheckResponse { is_admin: true }),
        Ok(false) => HttpResponse::Forbidden().json(AdminCheckResponse { is_admin: false }),
        Err(e) => {
            log::error!("❌ Error checking admin role: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to check admin role."))
        }
    }
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users, unfiltered"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_users(state: web::Data<AppState>) -> HttpResponse {
    log::info!("📋 GET /users");

    match state.users.find_all().await {
        Ok(users) => {
            log::info!("✅ Listed {} users", users.len());
            HttpResponse::Ok().json(users)
        }
        Err(e) => {
            log::error!("❌ Error fetching users: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch users."))
        }
    }
}

/// POST /users - Body must carry `userType`; `role` is derived from it
pub async fn create_user(state: web::Data<AppState>, request: web::Json<User>) -> HttpResponse {
    log::info!(
        "📝 POST /users - email: {}, userType: {}",
        request.email().unwrap_or("N/A"),
        request.user_type().unwrap_or("N/A")
    );

    match user_service::create_user(state.users.as_ref(), request.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("⚠️ Rejected user: {}", msg);
            HttpResponse::BadRequest().json(ErrorResponse::new(msg))
        }
        Err(e) => {
            log::error!("❌ Error creating user: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to create user."))
        }
    }
}

#[utoipa::path(
    put,
    path = "/users/buyer/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Role set (user created if missing)", body = UpdateResult),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn promote_to_buyer(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("🔧 PUT /users/buyer/{}", email);

    match user_service::promote_to_buyer(state.users.as_ref(), &email).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            log::error!("❌ Error updating user role: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to update user role."))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User and their bookings deleted", body = MessageResponse),
        (status = 404, description = "No user with this email", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let email = path.into_inner();
    log::info!("🗑️  DELETE /users/{}", email);

    match user_service::delete_user_cascade(state.users.as_ref(), state.bookings.as_ref(), &email).await {
        Ok(outcome) if outcome.user_deleted => HttpResponse::Ok().json(MessageResponse {
            message: "Buyer and associated bookings deleted successfully.".to_string(),
        }),
        Ok(outcome) => {
            log::warn!(
                "⚠️ User {} not found ({} stray bookings removed)",
                email,
                outcome.bookings_deleted
            );
            HttpResponse::NotFound().json(ErrorResponse::new("User not found."))
        }
        Err(e) => {
            log::error!("❌ Error deleting user and bookings: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to delete user and associated bookings."))
        }
    }
}
