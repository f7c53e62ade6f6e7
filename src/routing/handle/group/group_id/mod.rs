use lodge_lib::ids;

use axum::http::StatusCode;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::group;
use crate::net::error;
use crate::sec::authn::initiator;
use crate::sec::authz::policy::{self, Capability};
use crate::state::ArcShared;

pub mod members;

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

    let Some(found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    policy::api_ability(&conn, &initiator, &group_id, Capability::View).await?;

    Ok(lodge_api::Payload::new(lodge_api::groups::Group::from(found)))
}

pub async fn patch(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
    axum::Json(json): axum::Json<lodge_api::groups::UpdateGroup>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(original) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    // only the creator may change a group, regardless of role
    if original.created_by != initiator.user.id {
        return Err(error::Error::api(error::AuthKind::PermissionDenied));
    }

    let name = if let Some(given) = json.name {
        if !lodge_lib::groups::name_valid(&given) {
            return Err(error::Error::api((
                error::GeneralKind::ValidationFailed,
                error::Detail::with_key("name")
            )));
        }

        given
    } else {
        original.name
    };

    let updated = chrono::Utc::now();

    let transaction = conn.transaction().await?;

    transaction.execute(
        "\
        update groups \
        set name = $2, \
            updated = $3 \
        where id = $1",
        &[&group_id, &name, &updated]
    ).await?;

    transaction.commit().await?;

    Ok(lodge_api::Payload::new(lodge_api::groups::Group {
        id: group_id,
        name,
        created_by: original.created_by,
        created: original.created,
        updated: Some(updated),
    }))
}

pub async fn delete(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let mut conn = state.pool().get().await?;

    let Some(original) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    if original.created_by != initiator.user.id {
        return Err(error::Error::api(error::AuthKind::PermissionDenied));
    }

    let transaction = conn.transaction().await?;

    let apartments = transaction.query_one(
        "select exists(select 1 from apartments where group_id = $1)",
        &[&group_id]
    ).await?;

    // deletion is blocked while apartments still reference the group.
    // memberships die with the group itself
    if apartments.get(0) {
        return Err(error::Error::api(error::GroupKind::NotEmpty));
    }

    let _members = transaction.execute(
        "delete from group_users where group_id = $1",
        &[&group_id]
    ).await?;

    let _group = transaction.execute(
        "delete from groups where id = $1",
        &[&group_id]
    ).await?;

    transaction.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn role(
    State(state): State<ArcShared>,
    initiator: initiator::Initiator,
    Path(Params { group_id }): Path<Params>,
) -> error::Result<impl IntoResponse> {
    let conn = state.pool().get().await?;

    let Some(_found) = group::Group::retrieve(&conn, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::NotFound));
    };

    let Some(role) = policy::get_role(&conn, &initiator.user.id, &group_id).await? else {
        return Err(error::Error::api(error::GroupKind::MemberNotFound));
    };

    Ok(lodge_api::Payload::new(lodge_api::groups::MemberRole {
        role
    }))
}
