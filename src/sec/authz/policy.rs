use lodge_lib::ids;
use deadpool_postgres::GenericClient;
use tokio_postgres::Error as PgError;

pub use lodge_lib::sec::authz::role::{Role, Capability};

use crate::net::error;
use crate::sec::authn::initiator::Initiator;

/// the authorization primitive. resolves the role the user holds in the
/// group, if any
pub async fn get_role(
    conn: &impl GenericClient,
    user_id: &ids::UserId,
    group_id: &ids::GroupId,
) -> Result<Option<Role>, PgError> {
    Ok(conn.query_opt(
        "\
        select group_users.role \
        from group_users \
        where group_users.user_id = $1 and \
              group_users.group_id = $2",
        &[user_id, group_id]
    )
        .await?
        .map(|row| row.get(0)))
}

/// resolves the caller's role in the group owning the resource and
/// checks it against the capability table. a missing membership and an
/// insufficient role both deny
pub async fn api_ability(
    conn: &impl GenericClient,
    initiator: &Initiator,
    group_id: &ids::GroupId,
    capability: Capability,
) -> error::Result<Role> {
    let Some(role) = get_role(conn, &initiator.user.id, group_id).await? else {
        return Err(error::Error::api(error::AuthKind::PermissionDenied));
    };

    if !role.can(&capability) {
        return Err(error::Error::api(error::AuthKind::PermissionDenied));
    }

    Ok(role)
}
