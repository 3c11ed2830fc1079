use actix_web::{web, HttpResponse};
use crate::{
    api::AppState,
    models::ErrorResponse,
    services::payment_service::{self, PaymentIntentRequest, PaymentIntentResponse},
    utils::AppError,
};

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = PaymentIntentResponse),
        (status = 400, description = "Price missing, non-numeric or not positive", body = ErrorResponse),
        (status = 500, description = "Payment provider failure", body = ErrorResponse)
    )
)]
pub async fn create_payment_intent(
    state: web::Data<AppState>,
    request: web::Json<PaymentIntentRequest>,
) -> HttpResponse {
    log::info!("💳 POST /create-payment-intent - price: {}", request.price);

    match payment_service::create_payment_intent(state.payments.as_ref(), request.price).await {
        Ok(intent) => HttpResponse::Ok().json(PaymentIntentResponse {
            client_secret: intent.client_secret,
        }),
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("⚠️ Rejected payment intent: {}", msg);
            HttpResponse::BadRequest().json(ErrorResponse::new(msg))
        }
        Err(e) => {
            log::error!("❌ Error creating payment intent: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to create payment intent"))
        }
    }
}
