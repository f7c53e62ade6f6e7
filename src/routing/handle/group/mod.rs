use axum::http::StatusCode;
use axum::extract::State;
use axum::response::IntoResponse;
use futures::TryStreamExt;

use lodge_lib::sec::authz::role::Role;

use crate::net::error;
use crate::sec::authn::initiator;
use crate::sql;
use crate::state::ArcShared;

pub mod group_id;

pub async fn get(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    // mirrors the source behavior. only groups created by the caller are
    // listed, not every group they are a member of
    let params: sql::ParamsArray<1> = [&initiator.user.id];

    let result = conn.query_raw(
        "\
        select id, \
               name, \
               created_by, \
               created, \
               updated \
        from groups \
        where created_by = $1 \
        order by id",
        params
    ).await?;

    futures::pin_mut!(result);

    let mut list = Vec::new();

    while let Some(row) = result.try_next().await? {
        let item = lodge_api::groups::Group {
            id: row.get(0),
            name: row.get(1),
            created_by: row.get(2),
            created: row.get(3),
            updated: row.get(4),
        };

        list.push(item);
    }

    Ok(lodge_api::Payload::new(list))
}

pub async fn post(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    axum::Json(json): axum::Json<lodge_api::groups::CreateGroup>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    if !lodge_lib::groups::name_valid(&json.name) {
        return Err(error::Error::api((
            error::GeneralKind::ValidationFailed,
            error::Detail::with_key("name")
        )));
    }

    let name = json.name;
    let created = chrono::Utc::now();

    // the group row and the creator's admin membership are one unit. if
    // either write fails neither is persisted
    let transaction = conn.transaction().await?;

    let result = transaction.query_one(
        "\
        insert into groups (name, created_by, created) \
        values ($1, $2, $3) \
        returning id",
        &[&name, &initiator.user.id, &created]
    ).await?;

    let group_id: lodge_lib::ids::GroupId = result.get(0);

    transaction.execute(
        "\
        insert into group_users (user_id, group_id, role, joined) \
        values ($1, $2, $3, $4)",
        &[&initiator.user.id, &group_id, &Role::Admin, &created]
    ).await?;

    transaction.commit().await?;

    Ok((
        StatusCode::CREATED,
        lodge_api::Payload::new(lodge_api::groups::Group {
            id: group_id,
            name,
            created_by: initiator.user.id,
            created,
            updated: None,
        })
    ))
}
