use lodge_lib::ids;

use axum::http::StatusCode;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::apartment;
use crate::net::error;
use crate::sec::authn::initiator;
use crate::sec::authz::policy::{self, Capability};
use crate::state::ArcShared;

#[derive(Deserialize)]
pub struct Params {
    pub apartment_id: ids::ApartmentId,
}

pub async fn get(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { apartment_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    let Some(found) = apartment::Apartment::retrieve(&conn, &apartment_id).await? else {
        return Err(error::Error::api(error::ApartmentKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &found.group_id, Capability::View).await?;

    Ok(lodge_api::Payload::new(lodge_api::apartments::Apartment::from(found)))
}

pub async fn patch(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { apartment_id }): Path<Params>,
    axum::Json(json): axum::Json<lodge_api::apartments::UpdateApartment>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(original) = apartment::Apartment::retrieve(&conn, &apartment_id).await? else {
        return Err(error::Error::api(error::ApartmentKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &original.group_id, Capability::ManageApartments).await?;

    let name = if let Some(given) = json.name {
        if !lodge_lib::apartments::name_valid(&given) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("name")
            )));
        }

        given
    } else {
        original.name
    };

    let description = if json.description.is_some() {
        json.description
    } else {
        original.description
    };

    let updated = chrono::Utc::now();

    let transaction = conn.transaction().await?;

    transaction.execute(
        "\
        update apartments \
        set name = $2, \
            description = $3, \
            updated = $4 \
        where id = $1",
        &[&apartment_id, &name, &description, &updated]
    ).await?;

    transaction.commit().await?;

    Ok(lodge_api::Payload::new(lodge_api::apartments::Apartment {
        id: apartment_id,
        name,
        description,
        group_id: original.group_id,
        created_by: original.created_by,
        created: original.created,
        updated: Some(updated),
    }))
}

pub async fn delete(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { apartment_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(original) = apartment::Apartment::retrieve(&conn, &apartment_id).await? else {
        return Err(error::Error::api(error::ApartmentKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &original.group_id, Capability::ManageApartments).await?;

    let transaction = conn.transaction().await?;

    // deletion is blocked while bookings still reference the apartment
    if apartment::Apartment::has_bookings(&transaction, &apartment_id).await? {
        return Err(error::Error::api(error::ApartmentKind::NotEmpty));
    }

    let _apartment = transaction.execute(
        "delete from apartments where id = $1",
        &[&apartment_id]
    ).await?;

    transaction.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
