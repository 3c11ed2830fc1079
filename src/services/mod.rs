pub mod payment_service;
pub mod user_service;

pub use payment_service::*;
