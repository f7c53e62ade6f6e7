use lodge_lib::ids;

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize)]
pub struct Apartment {
    pub id: ids::ApartmentId,
    pub name: String,
    pub description: Option<String>,
    pub group_id: ids::GroupId,
    pub created_by: ids::UserId,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateApartment {
    pub name: String,
    pub description: Option<String>,
    pub group_id: ids::GroupId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateApartment {
    pub name: Option<String>,
    pub description: Option<String>,
}
