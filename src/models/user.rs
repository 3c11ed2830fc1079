use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_BUYER: &str = "buyer";

/// Document of the "Users" collection, stored as submitted.
///
/// `role` is derived from `userType` on creation and later overwritten by
/// the promote-to-buyer endpoint. Fields of an unexpected JSON type are kept;
/// the accessors just report them as absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct User(pub Map<String, Value>);

impl User {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.str_field("_id")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_field("email")
    }

    pub fn user_type(&self) -> Option<&str> {
        self.str_field("userType")
    }

    pub fn role(&self) -> Option<&str> {
        self.str_field("role")
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.role() == Some(role)
    }

    pub fn set_id(&mut self, id: String) {
        self.0.insert("_id".to_string(), Value::String(id));
    }

    pub fn clear_id(&mut self) {
        self.0.remove("_id");
    }

    pub fn set_role(&mut self, role: &str) {
        self.0.insert("role".to_string(), Value::String(role.to_string()));
    }
}

impl From<Map<String, Value>> for User {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BuyerCheckResponse {
    #[serde(rename = "isBuyer")]
    pub is_buyer: bool,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AdminCheckResponse {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
