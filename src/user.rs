use lodge_lib::ids;
use chrono::{DateTime, Utc};
use deadpool_postgres::GenericClient;
use tokio_postgres::{Error as PgError};

#[derive(Debug, Clone)]
pub struct User {
    pub id: ids::UserId,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl User {
    pub async fn retrieve(
        conn: &impl GenericClient,
        user_id: &ids::UserId,
    ) -> Result<Option<Self>, PgError> {
        Ok(conn.query_opt(
            "\
            select id, \
                   first_name, \
                   last_name, \
                   phone_number, \
                   email, \
                   created, \
                   updated \
            from users \
            where id = $1",
            &[user_id]
        )
            .await?
            .map(|row| User {
                id: row.get(0),
                first_name: row.get(1),
                last_name: row.get(2),
                phone_number: row.get(3),
                email: row.get(4),
                created: row.get(5),
                updated: row.get(6),
            }))
    }

    pub async fn retrieve_email(
        conn: &impl GenericClient,
        email: &str,
    ) -> Result<Option<Self>, PgError> {
        Ok(conn.query_opt(
            "\
            select id, \
                   first_name, \
                   last_name, \
                   phone_number, \
                   email, \
                   created, \
                   updated \
            from users \
            where email = $1",
            &[&email]
        )
            .await?
            .map(|row| User {
                id: row.get(0),
                first_name: row.get(1),
                last_name: row.get(2),
                phone_number: row.get(3),
                email: row.get(4),
                created: row.get(5),
                updated: row.get(6),
            }))
    }
}

pub async fn check_email(
    conn: &impl GenericClient,
    email: &str,
) -> Result<Option<ids::UserId>, PgError> {
    Ok(conn.query_opt(
        "select id from users where email = $1",
        &[&email]
    )
        .await?
        .map(|row| row.get(0)))
}

impl From<User> for lodge_api::users::User {
    fn from(user: User) -> Self {
        lodge_api::users::User {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            created: user.created,
            updated: user.updated,
        }
    }
}
