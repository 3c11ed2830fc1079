pub mod bookings;
pub mod health;
pub mod payments;
pub mod swagger;
pub mod users;

use crate::database::{BookingStore, UserStore};
use crate::models::ErrorResponse;
use crate::services::PaymentGateway;
use actix_web::{error, web, HttpResponse};
use std::sync::Arc;

/// Dependencies shared by every handler. Built once in `main` (or by a test)
/// and registered as `web::Data`.
pub struct AppState {
    pub bookings: Arc<dyn BookingStore>,
    pub users: Arc<dyn UserStore>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl AppState {
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        users: Arc<dyn UserStore>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self { bookings, users, payments }
    }
}

/// Malformed JSON bodies get the same `{error}` shape as handler failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, req| {
        let message = err.to_string();
        log::warn!("⚠️  Rejected JSON body on {} {}: {}", req.method(), req.path(), message);
        error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorResponse::new(message)),
        )
        .into()
    })
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        // Liveness
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        // Bookings
        .service(
            web::resource("/bookingCollection")
                .route(web::get().to(bookings::list_bookings))
                .route(web::post().to(bookings::create_booking)),
        )
        .route("/bookingCollection/{id}", web::get().to(bookings::get_booking))
        .route("/my-orders", web::get().to(bookings::my_orders))
        // Payments
        .route("/create-payment-intent", web::post().to(payments::create_payment_intent))
        // Users & roles
        .service(
            web::resource("/users")
                .route(web::get().to(users::list_users))
                .route(web::post().to(users::create_user)),
        )
        .service(
            web::resource("/users/buyer/{email}")
                .route(web::get().to(users::is_buyer))
                .route(web::put().to(users::promote_to_buyer)),
        )
        .route("/users/admin/{email}", web::get().to(users::is_admin))
        .route("/users/{email}", web::delete().to(users::delete_user));
}
