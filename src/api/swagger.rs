use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Second Chance Shop API",
        version = "1.0.0",
        description = "Bookings, users and payment intents for the Second Chance Shop.\n\n**Note:** role checks are advisory lookups; no endpoint requires authentication.",
    ),
    paths(
        // Health
        crate::api::health::root,
        crate::api::health::health_check,

        // Bookings
        crate::api::bookings::list_bookings,
        crate::api::bookings::my_orders,
        crate::api::bookings::get_booking,

        // Payments
        crate::api::payments::create_payment_intent,

        // Users
        crate::api::users::list_users,
        crate::api::users::is_buyer,
        crate::api::users::is_admin,
        crate::api::users::promote_to_buyer,
        crate::api::users::delete_user,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::BookingCreatedResponse,
            crate::models::BuyerCheckResponse,
            crate::models::AdminCheckResponse,
            crate::models::MessageResponse,
            crate::models::InsertResult,
            crate::models::UpdateResult,
            crate::models::ErrorResponse,
            crate::services::payment_service::PaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints."),
        (name = "Bookings", description = "Booking documents, stored as submitted."),
        (name = "Payments", description = "Stripe payment intent creation."),
        (name = "Users", description = "Users, derived roles and the buyer/admin checks."),
    )
)]
pub struct ApiDoc;
