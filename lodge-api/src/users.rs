use lodge_lib::ids;

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: ids::UserId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}
