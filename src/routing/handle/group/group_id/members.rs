use lodge_lib::ids;

use axum::http::StatusCode;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::TryStreamExt;
use serde::Deserialize;

use crate::group;
use crate::net::error;
use crate::sec::authn::initiator;
use crate::sec::authz::policy::{self, Capability};
use crate::sql;
use crate::state::ArcShared;
use crate::user;

#[derive(Deserialize)]
pub struct Params {
    pub group_id: ids::GroupId,
}

pub async fn get(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    let Some(_found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &group_id, Capability::View).await?;

    let params: sql::ParamsArray<1> = [&group_id];

    let result = conn.query_raw(
        "\
        select user_id, \
               group_id, \
               role, \
               joined \
        from group_users \
        where group_id = $1 \
        order by user_id",
        params
    ).await?;

    futures::pin_mut!(result);

    let mut list = Vec::new();

    while let Some(row) = result.try_next().await? {
        let item = lodge_api::groups::Member {
            user_id: row.get(0),
            group_id: row.get(1),
            role: row.get(2),
            joined: row.get(3),
        };

        list.push(item);
    }

    Ok(lodge_api::Payload::new(list))
}

pub async fn post(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
    axum::Json(json): axum::Json<lodge_api::groups::AddMember>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(_found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &group_id, Capability::ManageMembers).await?;

    let Some(_user) = user::User::retrieve(&conn, &json.user_id).await? else {
        return Err(error::Error::api(error::UserKind::NotFound));
    };

    let joined = chrono::Utc::now();

    let transaction = conn.transaction().await?;

    if let Err(err) = transaction.execute(
        "\
        insert into group_users (user_id, group_id, role, joined) \
        values ($1, $2, $3, $4)",
        &[&json.user_id, &group_id, &json.role, &joined]
    ).await {
        if let Some(constraint) = sql::unique_constraint_error(&err) {
            if constraint == "group_users_pkey" {
                return Err(error::Error::api(error::GroupKind::MemberExists));
            }
        }

        return Err(err.into());
    }

    transaction.commit().await?;

    Ok((
        StatusCode::CREATED,
        lodge_api::Payload::new(lodge_api::groups::Member {
            user_id: json.user_id,
            group_id,
            role: json.role,
            joined,
        })
    ))
}

pub async fn patch(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
    axum::Json(json): axum::Json<lodge_api::groups::UpdateMember>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(_found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &group_id, Capability::ManageMembers).await?;

    // an admin demoting their own membership could leave the group
    // without one
    if json.user_id == initiator.user.id {
        return Err(error::Error::api(error::GroupKind::OwnMembership));
    }

    let transaction = conn.transaction().await?;

    let count = transaction.execute(
        "\
        update group_users \
        set role = $3 \
        where user_id = $1 and \
              group_id = $2",
        &[&json.user_id, &group_id, &json.role]
    ).await?;

    if count == 0 {
        return Err(error::Error::api(error::GroupKind::MemberNotFound));
    }

    transaction.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
    axum::Json(json): axum::Json<lodge_api::groups::DropMember>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(_found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &group_id, Capability::ManageMembers).await?;

    if json.user_id == initiator.user.id {
        return Err(error::Error::api(error::GroupKind::OwnMembership));
    }

    let transaction = conn.transaction().await?;

    let count = transaction.execute(
        "\
        delete from group_users \
        where user_id = $1 and \
              group_id = $2",
        &[&json.user_id, &group_id]
    ).await?;

    if count == 0 {
        return Err(error::Error::api(error::GroupKind::MemberNotFound));
    }

    transaction.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
