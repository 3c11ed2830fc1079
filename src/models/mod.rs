pub mod booking;
pub mod results;
pub mod user;

pub use booking::*;
pub use results::*;
pub use user::*;
