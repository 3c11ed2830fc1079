use actix_web::{web, HttpResponse};
use crate::{
    api::AppState,
    models::{Booking, BookingCreatedResponse, ErrorResponse, MyOrdersQuery},
    utils::AppError,
};

/// GET /bookingCollection - Every booking, in store order
#[utoipa::path(
    get,
    path = "/bookingCollection",
    tag = "Bookings",
    responses(
        (status = 200, description = "All bookings"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_bookings(state: web::Data<AppState>) -> HttpResponse {
    log::info!("📋 GET /bookingCollection");

    match state.bookings.find_all().await {
        Ok(bookings) => {
            log::info!("✅ Listed {} bookings", bookings.len());
            HttpResponse::Ok().json(bookings)
        }
        Err(e) => {
            log::error!("❌ Error fetching bookings: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch bookings."))
        }
    }
}

/// POST /bookingCollection - Stores the submitted booking as-is
pub async fn create_booking(
    state: web::Data<AppState>,
    request: web::Json<Booking>,
) -> HttpResponse {
    let mut booking = request.into_inner();
    // The store assigns ids.
    booking.clear_id();

    log::info!(
        "📝 POST /bookingCollection - userEmail: {}",
        booking.owner().map_or_else(|| "N/A".to_string(), |owner| owner.to_string())
    );

    match state.bookings.insert(booking).await {
        Ok(booking_id) => {
            log::info!("✅ Booking saved: {}", booking_id);
            HttpResponse::Created().json(BookingCreatedResponse {
                message: "Booking confirmed!".to_string(),
                booking_id,
            })
        }
        Err(e) => {
            log::error!("❌ Error saving booking: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new("Failed to save booking. Please try again later."))
        }
    }
}

/// GET /my-orders?userEmail= - Bookings owned by one email
#[utoipa::path(
    get,
    path = "/my-orders",
    tag = "Bookings",
    params(MyOrdersQuery),
    responses(
        (status = 200, description = "Bookings whose userEmail matches"),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn my_orders(
    state: web::Data<AppState>,
    query: web::Query<MyOrdersQuery>,
) -> HttpResponse {
    let user_email = query.user_email.as_deref();
    log::info!("🧾 GET /my-orders - userEmail: {}", user_email.unwrap_or("<none>"));

    match state.bookings.find_by_owner(user_email).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => {
            log::error!("❌ Error fetching orders: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch orders."))
        }
    }
}

/// GET /bookingCollection/{id} - One booking, or `null` when absent
#[utoipa::path(
    get,
    path = "/bookingCollection/{id}",
    tag = "Bookings",
    params(("id" = String, Path, description = "Booking ObjectId (24 hex chars)")),
    responses(
        (status = 200, description = "The booking, or null if no booking has this id"),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn get_booking(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    log::info!("🔎 GET /bookingCollection/{}", id);

    match state.bookings.find_by_id(&id).await {
        Ok(Some(booking)) => HttpResponse::Ok().json(booking),
        Ok(None) => HttpResponse::Ok().json(serde_json::Value::Null),
        Err(AppError::InvalidRequest(msg)) => {
            log::warn!("⚠️ Rejected booking id {}: {}", id, msg);
            HttpResponse::BadRequest().json(ErrorResponse::new("Invalid booking id."))
        }
        Err(e) => {
            log::error!("❌ Error fetching booking by ID: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Failed to fetch booking details."))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{routes, test_support::{state, FakePayments}};
    use crate::database::memory::MemoryStore;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[actix_rt::test]
    async fn test_create_then_get_returns_submitted_body() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        let submitted = json!({
            "userEmail": "a@x.com",
            "title": "Vintage lamp",
            "price": 35.5,
            "meta": { "color": "green" }
        });
        let req = test::TestRequest::post()
            .uri("/bookingCollection")
            .set_json(&submitted)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["message"], "Booking confirmed!");
        let id = created["bookingId"].as_str().unwrap().to_string();

        let req = test::TestRequest::get().uri(&format!("/bookingCollection/{}", id)).to_request();
        let fetched: Value = test::call_and_read_body_json(&app, req).await;

        let mut expected = submitted.clone();
        expected["_id"] = json!(id);
        assert_eq!(fetched, expected);
    }

    #[actix_rt::test]
    async fn test_client_supplied_id_is_ignored() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/bookingCollection")
            .set_json(json!({ "_id": "mine", "userEmail": "a@x.com" }))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;

        assert_ne!(created["bookingId"], "mine");
        assert_eq!(store.bookings()[0].id(), created["bookingId"].as_str());
    }

    #[actix_rt::test]
    async fn test_list_and_filter_by_owner() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        for body in [
            json!({ "userEmail": "a@x.com", "item": 1 }),
            json!({ "userEmail": "b@x.com", "item": 2 }),
            json!({ "userEmail": "a@x.com", "item": 3 }),
            json!({ "item": 4 }),
        ] {
            let req = test::TestRequest::post().uri("/bookingCollection").set_json(body).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/bookingCollection").to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 4);

        let req = test::TestRequest::get().uri("/my-orders?userEmail=a%40x.com").to_request();
        let mine: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        let items: Vec<i64> = mine.iter().map(|b| b["item"].as_i64().unwrap()).collect();
        assert_eq!(items, vec![1, 3]);

        let req = test::TestRequest::get().uri("/my-orders").to_request();
        let unowned: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unowned.len(), 1);
        assert_eq!(unowned[0]["item"], 4);
    }

    #[actix_rt::test]
    async fn test_null_and_numeric_owner_are_stored_as_sent() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        for submitted in [json!({ "userEmail": 42, "item": 1 }), json!({ "userEmail": null, "item": 2 })] {
            let req = test::TestRequest::post()
                .uri("/bookingCollection")
                .set_json(&submitted)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);
            let created: Value = test::read_body_json(resp).await;
            let id = created["bookingId"].as_str().unwrap().to_string();

            let req = test::TestRequest::get().uri(&format!("/bookingCollection/{}", id)).to_request();
            let fetched: Value = test::call_and_read_body_json(&app, req).await;

            let mut expected = submitted.clone();
            expected["_id"] = json!(id);
            assert_eq!(fetched, expected);
        }

        // A null owner is unowned; a numeric one matches no email.
        let req = test::TestRequest::get().uri("/my-orders").to_request();
        let unowned: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(unowned.len(), 1);
        assert_eq!(unowned[0]["item"], 2);

        let req = test::TestRequest::get().uri("/bookingCollection").to_request();
        let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);
    }

    #[actix_rt::test]
    async fn test_empty_user_email_matches_only_empty_owner() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        for body in [
            json!({ "userEmail": "", "item": 1 }),
            json!({ "userEmail": "a@x.com", "item": 2 }),
            json!({ "item": 3 }),
            json!({ "userEmail": null, "item": 4 }),
        ] {
            let req = test::TestRequest::post().uri("/bookingCollection").set_json(body).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
        }

        let req = test::TestRequest::get().uri("/my-orders?userEmail=").to_request();
        let orders: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0]["item"], 1);
    }

    #[actix_rt::test]
    async fn test_get_unknown_id_returns_null() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        let req = test::TestRequest::get().uri("/bookingCollection/65f1c0ffee0000000000abcd").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body.is_null());
    }

    #[actix_rt::test]
    async fn test_malformed_id_is_bad_request() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        let req = test::TestRequest::get().uri("/bookingCollection/not-an-id").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid booking id.");
    }

    #[actix_rt::test]
    async fn test_non_object_body_is_bad_request() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;

        let req = test::TestRequest::post()
            .uri("/bookingCollection")
            .set_json(json!([1, 2, 3]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
        assert!(store.bookings().is_empty());
    }

    #[actix_rt::test]
    async fn test_store_failure_maps_to_500() {
        let store = Arc::new(MemoryStore::new());
        let payments = Arc::new(FakePayments::default());
        let app = test::init_service(App::new().app_data(state(&store, &payments)).configure(routes)).await;
        store.fail_all();

        let req = test::TestRequest::post()
            .uri("/bookingCollection")
            .set_json(json!({ "userEmail": "a@x.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Failed to save booking. Please try again later.");

        let req = test::TestRequest::get().uri("/my-orders?userEmail=a%40x.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
