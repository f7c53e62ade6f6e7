use lodge_lib::ids;
use chrono::{DateTime, Utc};
use deadpool_postgres::GenericClient;
use tokio_postgres::{Error as PgError};

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

impl Booking {
    pub async fn retrieve(
        conn: &impl GenericClient,
        booking_id: &ids::BookingId,
    ) -> Result<Option<Self>, PgError> {
        Ok(conn.query_opt(
            "\
            select id, \
                   name, \
                   phone, \
                   check_in, \
                   check_out, \
                   guests, \
                   created_by, \
                   source, \
                   amount_charged, \
                   reserved_on, \
                   apartment_id, \
                   created, \
                   updated \
            from bookings \
            where id = $1",
            &[booking_id]
        )
            .await?
            .map(|row| Booking {
                id: row.get(0),
                name: row.get(1),
                phone: row.get(2),
                check_in: row.get(3),
                check_out: row.get(4),
                guests: row.get(5),
                created_by: row.get(6),
                source: row.get(7),
                amount_charged: row.get(8),
                reserved_on: row.get(9),
                apartment_id: row.get(10),
                created: row.get(11),
                updated: row.get(12),
            }))
    }
}

/// checks the candidate range against every other booking on the
/// apartment. the caller is expected to run this inside the same
/// transaction as the following insert or update
pub async fn overlap_exists(
    conn: &impl GenericClient,
    apartment_id: &ids::ApartmentId,
    exclude: Option<&ids::BookingId>,
    check_in: &DateTime<Utc>,
    check_out: &DateTime<Utc>,
) -> Result<bool, PgError> {
    let row = if let Some(booking_id) = exclude {
        conn.query_one(
            "\
            select exists(\
                select 1 \
                from bookings \
                where apartment_id = $1 and \
                      id != $2 and \
                      check_in < $3 and \
                      check_out > $4\
            )",
            &[apartment_id, booking_id, check_out, check_in]
        ).await?
    } else {
        conn.query_one(
            "\
            select exists(\
                select 1 \
                from bookings \
                where apartment_id = $1 and \
                      check_in < $2 and \
                      check_out > $3\
            )",
            &[apartment_id, check_out, check_in]
        ).await?
    };

    Ok(row.get(0))
}

impl From<Booking> for lodge_api::bookings::Booking {
    fn from(booking: Booking) -> Self {
        lodge_api::bookings::Booking {
            id: booking.id,
            name: booking.name,
            phone: booking.phone,
            check_in: booking.check_in,
            check_out: booking.check_out,
            guests: booking.guests,
            created_by: booking.created_by,
            source: booking.source,
            amount_charged: booking.amount_charged,
            reserved_on: booking.reserved_on,
            apartment_id: booking.apartment_id,
            created: booking.created,
            updated: booking.updated,
        }
    }
}
