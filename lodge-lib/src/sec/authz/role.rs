use std::error::Error;

use serde::{Serialize, Deserialize};
use bytes::BytesMut;
use postgres_types::{to_sql_checked, Type, IsNull, ToSql, FromSql};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

impl Role {
    pub fn from_str(v: &str) -> Option<Self> {
        match v {
            "admin" => Some(Role::Admin),
            "editor" => Some(Role::Editor),
            "viewer" => Some(Role::Viewer),
            _ => None
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }

    pub fn can(&self, capability: &Capability) -> bool {
        match capability {
            Capability::View => match self {
                Role::Admin |
                Role::Editor |
                Role::Viewer => true,
            },
            Capability::ManageApartments => match self {
                Role::Admin => true,
                Role::Editor |
                Role::Viewer => false,
            },
            Capability::ManageBookings => match self {
                Role::Admin |
                Role::Editor => true,
                Role::Viewer => false,
            },
            Capability::ManageMembers => match self {
                Role::Admin => true,
                Role::Editor |
                Role::Viewer => false,
            },
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'a> FromSql<'a> for Role {
    fn from_sql(ty: &Type, raw: &'a [u8]) -> Result<Role, Box<dyn Error + Sync + Send>> {
        let v = <&str as FromSql>::from_sql(ty, raw)?;

        Role::from_str(v)
            .ok_or("invalid sql value for Role. expecting \"admin\", \"editor\", or \"viewer\"".into())
    }

    fn accepts(ty: &Type) -> bool {
        <&str as FromSql>::accepts(ty)
    }
}

impl ToSql for Role {
    fn to_sql(&self, ty: &Type, w: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        let v = self.as_str();

        v.to_sql(ty, w)
    }

    fn accepts(ty: &Type) -> bool {
        <&str as ToSql>::accepts(ty)
    }

    to_sql_checked!();
}

/// the actions a membership role can be measured against. group update
/// and delete are gated on the group creator and never consult this
/// table
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Capability {
    View,
    ManageApartments,
    ManageBookings,
    ManageMembers,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn every_role_can_view() {
        assert!(Role::Admin.can(&Capability::View));
        assert!(Role::Editor.can(&Capability::View));
        assert!(Role::Viewer.can(&Capability::View));
    }

    #[test]
    pub fn only_admin_manages_apartments() {
        assert!(Role::Admin.can(&Capability::ManageApartments));
        assert!(!Role::Editor.can(&Capability::ManageApartments));
        assert!(!Role::Viewer.can(&Capability::ManageApartments));
    }

    #[test]
    pub fn admin_and_editor_manage_bookings() {
        assert!(Role::Admin.can(&Capability::ManageBookings));
        assert!(Role::Editor.can(&Capability::ManageBookings));
        assert!(!Role::Viewer.can(&Capability::ManageBookings));
    }

    #[test]
    pub fn only_admin_manages_members() {
        assert!(Role::Admin.can(&Capability::ManageMembers));
        assert!(!Role::Editor.can(&Capability::ManageMembers));
        assert!(!Role::Viewer.can(&Capability::ManageMembers));
    }

    #[test]
    pub fn role_str_round_trip() {
        for role in [Role::Admin, Role::Editor, Role::Viewer] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }

        assert_eq!(Role::from_str("owner"), None);
    }
}
