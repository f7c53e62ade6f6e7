use lodge_lib::ids;

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize)]
pub struct Booking {
    pub id: ids::BookingId,
    pub name: String,
    pub phone: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub created_by: ids::UserId,
    pub source: Option<String>,
    pub amount_charged: Option<f64>,
    pub reserved_on: DateTime<Utc>,
    pub apartment_id: ids::ApartmentId,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBooking {
    pub name: String,
    pub phone: Option<String>,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: i32,
    pub source: Option<String>,
    pub amount_charged: Option<f64>,
    pub apartment_id: ids::ApartmentId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateBooking {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub guests: Option<i32>,
    pub source: Option<String>,
    pub amount_charged: Option<f64>,
}
