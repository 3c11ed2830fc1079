use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const BOOKING_OWNER_FIELD: &str = "userEmail";

/// Document of the "bookingCollection" collection, kept exactly as the
/// client submitted it. `userEmail` is a convention, not a typed field.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Booking(pub Map<String, Value>);

impl Booking {
    pub fn id(&self) -> Option<&str> {
        self.0.get("_id").and_then(Value::as_str)
    }

    pub fn set_id(&mut self, id: String) {
        self.0.insert("_id".to_string(), Value::String(id));
    }

    pub fn clear_id(&mut self) {
        self.0.remove("_id");
    }

    /// Raw `userEmail` value, whatever its JSON type.
    pub fn owner(&self) -> Option<&Value> {
        self.0.get(BOOKING_OWNER_FIELD)
    }

    /// Equality on `userEmail`; `None` matches a missing or null owner.
    pub fn is_owned_by(&self, user_email: Option<&str>) -> bool {
        match (self.owner(), user_email) {
            (Some(Value::String(owner)), Some(email)) => owner == email,
            (None | Some(Value::Null), None) => true,
            _ => false,
        }
    }
}

impl From<Map<String, Value>> for Booking {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookingCreatedResponse {
    pub message: String,
    #[serde(rename = "bookingId")]
    pub booking_id: String,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MyOrdersQuery {
    /// Owner email; when omitted, bookings without an owner are returned
    #[serde(rename = "userEmail")]
    pub user_email: Option<String>,
}
