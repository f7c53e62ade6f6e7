use lodge_lib::ids;
use lodge_lib::sec::authz::role::Role;
use chrono::{DateTime, Utc};
use deadpool_postgres::GenericClient;
use tokio_postgres::{Error as PgError};

pub struct Group {
    pub id: ids::GroupId,
    pub name: String,
    pub created_by: ids::UserId,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl Group {
    pub async fn retrieve(
        conn: &impl GenericClient,
        group_id: &ids::GroupId,
    ) -> Result<Option<Self>, PgError> {
        Ok(conn.query_opt(
            "\
            select id, \
                   name, \
                   created_by, \
                   created, \
                   updated \
            from groups \
            where id = $1",
            &[group_id]
        )
            .await?
            .map(|row| Group {
                id: row.get(0),
                name: row.get(1),
                created_by: row.get(2),
                created: row.get(3),
                updated: row.get(4),
            }))
    }
}

impl From<Group> for lodge_api::groups::Group {
    fn from(group: Group) -> Self {
        lodge_api::groups::Group {
            id: group.id,
            name: group.name,
            created_by: group.created_by,
            created: group.created,
            updated: group.updated,
        }
    }
}

pub struct Member {
    pub user_id: ids::UserId,
    pub group_id: ids::GroupId,
    pub role: Role,
    pub joined: DateTime<Utc>,
}

impl Member {
    pub async fn retrieve(
        conn: &impl GenericClient,
        user_id: &ids::UserId,
        group_id: &ids::GroupId,
    ) -> Result<Option<Self>, PgError> {
        Ok(conn.query_opt(
            "\
            select user_id, \
                   group_id, \
                   role, \
                   joined \
            from group_users \
            where user_id = $1 and \
                  group_id = $2",
            &[user_id, group_id]
        )
            .await?
            .map(|row| Member {
                user_id: row.get(0),
                group_id: row.get(1),
                role: row.get(2),
                joined: row.get(3),
            }))
    }
}

impl From<Member> for lodge_api::groups::Member {
    fn from(member: Member) -> Self {
        lodge_api::groups::Member {
            user_id: member.user_id,
            group_id: member.group_id,
            role: member.role,
            joined: member.joined,
        }
    }
}
