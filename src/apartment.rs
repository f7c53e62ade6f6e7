use lodge_lib::ids;
use chrono::{DateTime, Utc};
use deadpool_postgres::GenericClient;
use tokio_postgres::{Error as PgError};

pub struct Apartment {
    pub id: ids::ApartmentId,
    pub name: String,
    pub description: Option<String>,
    pub group_id: ids::GroupId,
    pub created_by: ids::UserId,
    pub created: DateTime<Utc>,
    pub updated: Option<DateTime<Utc>>,
}

impl Apartment {
    pub async fn retrieve(
        conn: &impl GenericClient,
        apartment_id: &ids::ApartmentId,
    ) -> Result<Option<Self>, PgError> {
        Ok(conn.query_opt(
            "\
            select id, \
                   name, \
                   description, \
                   group_id, \
                   created_by, \
                   created, \
                   updated \
            from apartments \
            where id = $1",
            &[apartment_id]
        )
            .await?
            .map(|row| Apartment {
                id: row.get(0),
                name: row.get(1),
                description: row.get(2),
                group_id: row.get(3),
                created_by: row.get(4),
                created: row.get(5),
                updated: row.get(6),
            }))
    }

    pub async fn has_bookings(
        conn: &impl GenericClient,
        apartment_id: &ids::ApartmentId,
    ) -> Result<bool, PgError> {
        let row = conn.query_one(
            "select exists(select 1 from bookings where apartment_id = $1)",
            &[apartment_id]
        ).await?;

        Ok(row.get(0))
    }
}

impl From<Apartment> for lodge_api::apartments::Apartment {
    fn from(apartment: Apartment) -> Self {
        lodge_api::apartments::Apartment {
            id: apartment.id,
            name: apartment.name,
            description: apartment.description,
            group_id: apartment.group_id,
            created_by: apartment.created_by,
            created: apartment.created,
            updated: apartment.updated,
        }
    }
}
