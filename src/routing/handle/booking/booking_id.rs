use lodge_lib::ids;

use axum::http::StatusCode;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::apartment;
use crate::booking;
use crate::net::error;
use crate::sec::authn::initiator;
use crate::sec::authz::policy::{self, Capability};
use crate::sql;
use crate::state::ArcShared;

#[derive(Deserialize)]
pub struct Params {
    pub booking_id: ids::BookingId,
}

pub async fn get(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { booking_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    let Some(found) = booking::Booking::retrieve(&conn, &booking_id).await? else {
        return Err(error::Error::api(error::BookingKind::NotFound));
    };

    let Some(owner) = apartment::Apartment::retrieve(&conn, &found.apartment_id).await? else {
        return Err(error::Error::new()
            .source("booking references an apartment that does not exist"));
    };

    policy::api_ability(&conn, &initiator, &owner.group_id, Capability::View).await?;

    Ok(lodge_api::Payload::new(lodge_api::bookings::Booking::from(found)))
}

pub async fn patch(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { booking_id }): Path<Params>,
    axum::Json(json): axum::Json<lodge_api::bookings::UpdateBooking>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(original) = booking::Booking::retrieve(&conn, &booking_id).await? else {
        return Err(error::Error::api(error::BookingKind::NotFound));
    };

    let Some(owner) = apartment::Apartment::retrieve(&conn, &original.apartment_id).await? else {
        return Err(error::Error::new()
            .source("booking references an apartment that does not exist"));
    };

    policy::api_ability(&conn, &initiator, &owner.group_id, Capability::ManageBookings).await?;

    // only the fields present in the patch are validated. everything
    // else keeps its stored value
    let name = if let Some(given) = json.name {
        if !lodge_lib::bookings::guest_name_valid(&given) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("name")
            )));
        }

        given
    } else {
        original.name
    };

    let phone = if let Some(given) = json.phone {
        if !lodge_lib::bookings::phone_valid(&given) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("phone")
            )));
        }

        Some(given)
    } else {
        original.phone
    };

    let source = if let Some(given) = json.source {
        if !lodge_lib::bookings::source_valid(&given) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("source")
            )));
        }

        Some(given)
    } else {
        original.source
    };

    let guests = if let Some(given) = json.guests {
        if given < 1 {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("guests")
            )));
        }

        given
    } else {
        original.guests
    };

    let amount_charged = if json.amount_charged.is_some() {
        json.amount_charged
    } else {
        original.amount_charged
    };

    let range_given = json.check_in.is_some() || json.check_out.is_some();
    let check_in = json.check_in.unwrap_or(original.check_in);
    let check_out = json.check_out.unwrap_or(original.check_out);

    // the merged range is what gets persisted, so it is what gets
    // validated
    if !lodge_lib::bookings::date_range_valid(&check_in, &check_out) {
        return Err(error::Error::api(error::BookingKind::InvalidDateRange));
    }

    let updated = chrono::Utc::now();

    let transaction = conn.transaction().await?;

    if range_given && booking::overlap_exists(
        &transaction,
        &original.apartment_id,
        Some(&booking_id),
        &check_in,
        &check_out
    ).await? {
        return Err(error::Error::api(error::BookingKind::DatesOverlap));
    }

    if let Err(err) = transaction.execute(
        "\
        update bookings \
        set name = $2, \
            phone = $3, \
            check_in = $4, \
            check_out = $5, \
            guests = $6, \
            source = $7, \
            amount_charged = $8, \
            updated = $9 \
        where id = $1",
        &[
            &booking_id,
            &name,
            &phone,
            &check_in,
            &check_out,
            &guests,
            &source,
            &amount_charged,
            &updated,
        ]
    ).await {
        if let Some(constraint) = sql::exclusion_constraint_error(&err) {
            if constraint == "bookings_no_overlap" {
                return Err(error::Error::api(error::BookingKind::DatesOverlap));
            }
        }

        return Err(err.into());
    }

    transaction.commit().await?;

    Ok(lodge_api::Payload::new(lodge_api::bookings::Booking {
        id: booking_id,
        name,
        phone,
        check_in,
        check_out,
        guests,
        created_by: original.created_by,
        source,
        amount_charged,
        reserved_on: original.reserved_on,
        apartment_id: original.apartment_id,
        created: original.created,
        updated: Some(updated),
    }))
}

pub async fn delete(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { booking_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(original) = booking::Booking::retrieve(&conn, &booking_id).await? else {
        return Err(error::Error::api(error::BookingKind::NotFound));
    };

    let Some(owner) = apartment::Apartment::retrieve(&conn, &original.apartment_id).await? else {
        return Err(error::Error::new()
            .source("booking references an apartment that does not exist"));
    };

    policy::api_ability(&conn, &initiator, &owner.group_id, Capability::ManageBookings).await?;

    let transaction = conn.transaction().await?;

    let _booking = transaction.execute(
        "delete from bookings where id = $1",
        &[&booking_id]
    ).await?;

    transaction.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
