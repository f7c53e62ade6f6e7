mod response;

pub mod error;
pub use error::{ApiError, ApiErrorKind, Detail};

pub mod auth;
pub mod users;
pub mod groups;
pub mod apartments;
pub mod bookings;

mod payload;
pub use payload::Payload;
