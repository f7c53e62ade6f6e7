pub type UserId = i64;
pub type GroupId = i64;
pub type ApartmentId = i64;
pub type BookingId = i64;
