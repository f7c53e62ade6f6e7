use lodge_lib::ids;

use axum::http::StatusCode;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures::TryStreamExt;
use serde::Deserialize;

use crate::group;
use crate::net::error;
use crate::sec::authn::initiator;
use crate::sec::authz::policy::{self, Capability};
use crate::sql;
use crate::state::ArcShared;

pub mod apartment_id;

#[derive(Deserialize)]
pub struct GetQuery {
    group_id: ids::GroupId,
}

pub async fn get(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Query(GetQuery { group_id }): Query<GetQuery>,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    let Some(_found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &group_id, Capability::View).await?;

    let params: sql::ParamsArray<1> = [&group_id];

    let result = conn.query_raw(
        "\
        select id, \
               name, \
               description, \
               group_id, \
               created_by, \
               created, \
               updated \
        from apartments \
        where group_id = $1 \
        order by id",
        params
    ).await?;

    futures::pin_mut!(result);

    let mut list = Vec::new();

    while let Some(row) = result.try_next().await? {
        let item = lodge_api::apartments::Apartment {
            id: row.get(0),
            name: row.get(1),
            description: row.get(2),
            group_id: row.get(3),
            created_by: row.get(4),
            created: row.get(5),
            updated: row.get(6),
        };

        list.push(item);
    }

    Ok(lodge_api::Payload::new(list))
}

pub async fn post(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    axum::Json(json): axum::Json<lodge_api::apartments::CreateApartment>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    if !lodge_lib::apartments::name_valid(&json.name) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("name")
        )));
    }

    let Some(_found) = group::Group::retrieve(&conn, &json.group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &json.group_id, Capability::ManageApartments).await?;

    let created = chrono::Utc::now();

    let transaction = conn.transaction().await?;

    let result = transaction.query_one(
        "\
        insert into apartments (name, description, group_id, created_by, created) \
        values ($1, $2, $3, $4, $5) \
        returning id",
        &[&json.name, &json.description, &json.group_id, &initiator.user.id, &created]
    ).await?;

    transaction.commit().await?;

    Ok((
        StatusCode::CREATED,
        lodge_api::Payload::new(lodge_api::apartments::Apartment {
            id: result.get(0),
            name: json.name,
            description: json.description,
            group_id: json.group_id,
            created_by: initiator.user.id,
            created,
            updated: None,
        })
    ))
}
