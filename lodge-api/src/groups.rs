use lodge_lib::ids;
use lodge_lib::sec::authz::role::Role;

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize)]
pub struct Group {
    pub id: ids::GroupId,
    pub name: String,
    pub created_by: ids::UserId,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateGroup {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateGroup {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Member {
    pub user_id: ids::UserId,
    pub group_id: ids::GroupId,
    pub role: Role,
    pub joined: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemberRole {
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddMember {
    pub user_id: ids::UserId,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateMember {
    pub user_id: ids::UserId,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DropMember {
    pub user_id: ids::UserId,
}
