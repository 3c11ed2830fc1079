// ==================== PAYMENT INTENTS ====================
// Thin pass-through to Stripe: the service only converts the price to minor
// units and returns the client secret the frontend needs to confirm payment.

use crate::utils::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const PAYMENT_CURRENCY: &str = "usd";
pub const PAYMENT_METHOD_TYPE: &str = "card";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    /// Price in major currency units (e.g. 19.99)
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a card-only payment intent for `amount` minor units.
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, AppError>;
}

/// Converts a major-unit price to integer minor units (cents).
pub fn to_minor_units(price: f64) -> Result<i64, AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::InvalidRequest(format!(
            "price must be a positive number, got {}",
            price
        )));
    }

    let amount = (price * 100.0).round();
    if amount < 1.0 || amount > i64::MAX as f64 {
        return Err(AppError::InvalidRequest(format!(
            "price {} is out of range",
            price
        )));
    }

    Ok(amount as i64)
}

pub async fn create_payment_intent(
    gateway: &dyn PaymentGateway,
    price: f64,
) -> Result<PaymentIntent, AppError> {
    let amount = to_minor_units(price)?;
    log::info!("💳 Creating payment intent: {} {} (price {})", amount, PAYMENT_CURRENCY, price);

    let intent = gateway.create_payment_intent(amount, PAYMENT_CURRENCY).await?;

    log::info!("✅ Payment intent created: {}", intent.id);
    Ok(intent)
}

// ==================== STRIPE CLIENT ====================

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: Option<String>,
}

impl StripeClient {
    pub fn new(api_base: &str, secret_key: Option<String>) -> Self {
        if secret_key.is_none() {
            log::warn!("⚠️  STRIPE_SECRET_KEY not set - payment intents will fail");
        }

        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key,
        }
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntent, AppError> {
        let secret_key = self
            .secret_key
            .as_deref()
            .ok_or_else(|| AppError::PaymentError("Stripe secret key is not configured".to_string()))?;

        let url = format!("{}/payment_intents", self.api_base);
        let form = [
            ("amount", amount.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", PAYMENT_METHOD_TYPE.to_string()),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no error message".to_string());
            return Err(AppError::PaymentError(format!("Stripe returned {}: {}", status, message)));
        }

        Ok(response.json::<PaymentIntent>().await?)
    }
}
