use lodge_lib::ids;

use axum::http::StatusCode;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::TryStreamExt;
use serde::Deserialize;

use crate::apartment;
use crate::booking;
use crate::net::error;
use crate::sec::authn::initiator;
use crate::sec::authz::policy::{self, Capability};
use crate::sql;
use crate::state::ArcShared;

pub mod booking_id;

#[derive(Deserialize)]
pub struct GetQuery {
    apartment_id: ids::ApartmentId,
}

pub async fn get(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Query(GetQuery { apartment_id }): Query<GetQuery>,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    let Some(found) = apartment::Apartment::retrieve(&conn, &apartment_id).await? else {
        return Err(error::Error::api(error::ApartmentKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &found.group_id, Capability::View).await?;

    let params: sql::ParamsArray<1> = [&apartment_id];

    let result = conn.query_raw(
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
        where apartment_id = $1 \
        order by check_in",
        params
    ).await?;

    futures::pin_mut!(result);

    let mut list = Vec::new();

    while let Some(row) = result.try_next().await? {
        let item = lodge_api::bookings::Booking {
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
        };

        list.push(item);
    }

    Ok(lodge_api::Payload::new(list))
}

pub async fn post(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    axum::Json(json): axum::Json<lodge_api::bookings::CreateBooking>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    if !lodge_lib::bookings::guest_name_valid(&json.name) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("name")
        )));
    }

    if let Some(phone) = &json.phone {
        if !lodge_lib::bookings::phone_valid(phone) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("phone")
            )));
        }
    }

    if let Some(source) = &json.source {
        if !lodge_lib::bookings::source_valid(source) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("source")
            )));
        }
    }

    if json.guests < 1 {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("guests")
        )));
    }

    if !lodge_lib::bookings::date_range_valid(&json.check_in, &json.check_out) {
        return Err(error::Error::api(error::BookingKind::InvalidDateRange));
    }

    let Some(found) = apartment::Apartment::retrieve(&conn, &json.apartment_id).await? else {
        return Err(error::Error::api(error::ApartmentKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &found.group_id, Capability::ManageBookings).await?;

    let created = chrono::Utc::now();

    // the overlap read and the insert share one transaction. the gist
    // exclusion constraint backstops concurrent writers that slip past
    // the read
    let transaction = conn.transaction().await?;

    if booking::overlap_exists(
        &transaction,
        &json.apartment_id,
        None,
        &json.check_in,
        &json.check_out
    ).await? {
        return Err(error::Error::api(error::BookingKind::DatesOverlap));
    }

    let result = match transaction.query_one(
        "\
        insert into bookings (\
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
            created\
        ) values \
        ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
        returning id",
        &[
            &json.name,
            &json.phone,
            &json.check_in,
            &json.check_out,
            &json.guests,
            &initiator.user.id,
            &json.source,
            &json.amount_charged,
            &created,
            &json.apartment_id,
            &created,
        ]
    ).await {
        Ok(r) => r,
        Err(err) => {
            if let Some(constraint) = sql::exclusion_constraint_error(&err) {
                if constraint == "bookings_no_overlap" {
                    return Err(error::Error::api(error::BookingKind::DatesOverlap));
                }
            }

            return Err(err.into());
        }
    };

    transaction.commit().await?;

    Ok((
        StatusCode::CREATED,
        lodge_api::Payload::new(lodge_api::bookings::Booking {
            id: result.get(0),
            name: json.name,
            phone: json.phone,
            check_in: json.check_in,
            check_out: json.check_out,
            guests: json.guests,
            created_by: initiator.user.id,
            source: json.source,
            amount_charged: json.amount_charged,
            reserved_on: created,
            apartment_id: json.apartment_id,
            created,
            updated: None,
        })
    ))
}
