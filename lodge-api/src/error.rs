use http::StatusCode;
use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr};

use crate::response::{serialize_json, error_json};

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum AuthKind {
    PermissionDenied,
    Unauthenticated,
    AlreadyAuthenticated,

    InvalidCredentials,

    InvalidSession,
    SessionExpired,
    SessionNotFound,

    MechanismNotFound
}

impl std::fmt::Display for AuthKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&AuthKind> for StatusCode {
    fn from(kind: &AuthKind) -> Self {
        match kind {
            AuthKind::PermissionDenied => StatusCode::FORBIDDEN,
            AuthKind::Unauthenticated |
            AuthKind::InvalidCredentials |
            AuthKind::InvalidSession |
            AuthKind::SessionExpired |
            AuthKind::SessionNotFound |
            AuthKind::MechanismNotFound => StatusCode::UNAUTHORIZED,
            AuthKind::AlreadyAuthenticated => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum UserKind {
    NotFound,
    EmailExists,
}

impl std::fmt::Display for UserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&UserKind> for StatusCode {
    fn from(kind: &UserKind) -> Self {
        match kind {
            UserKind::NotFound => StatusCode::NOT_FOUND,
            UserKind::EmailExists => StatusCode::CONFLICT,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum GroupKind {
    NotFound,
    MemberNotFound,

    MemberExists,
    NotEmpty,

    OwnMembership,
}

impl std::fmt::Display for GroupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&GroupKind> for StatusCode {
    fn from(kind: &GroupKind) -> Self {
        match kind {
            GroupKind::NotFound |
            GroupKind::MemberNotFound => StatusCode::NOT_FOUND,
            GroupKind::MemberExists |
            GroupKind::NotEmpty => StatusCode::CONFLICT,
            GroupKind::OwnMembership => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum ApartmentKind {
    NotFound,
    NotEmpty,
}

impl std::fmt::Display for ApartmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&ApartmentKind> for StatusCode {
    fn from(kind: &ApartmentKind) -> Self {
        match kind {
            ApartmentKind::NotFound => StatusCode::NOT_FOUND,
            ApartmentKind::NotEmpty => StatusCode::CONFLICT,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum BookingKind {
    NotFound,
    DatesOverlap,
    InvalidDateRange,
}

impl std::fmt::Display for BookingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&BookingKind> for StatusCode {
    fn from(kind: &BookingKind) -> Self {
        match kind {
            BookingKind::NotFound => StatusCode::NOT_FOUND,
            BookingKind::DatesOverlap => StatusCode::CONFLICT,
            BookingKind::InvalidDateRange => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum GeneralKind {
    InternalFailure,
    Timeout,

    AlreadyExists,
    NotFound,

    NoWork,

    ValidationFailed,
    InvalidData,
    MissingData,
}

impl std::fmt::Display for GeneralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

impl From<&GeneralKind> for StatusCode {
    fn from(kind: &GeneralKind) -> StatusCode {
        match kind {
            GeneralKind::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
            GeneralKind::Timeout => StatusCode::REQUEST_TIMEOUT,
            GeneralKind::AlreadyExists => StatusCode::CONFLICT,
            GeneralKind::NotFound => StatusCode::NOT_FOUND,
            GeneralKind::NoWork |
            GeneralKind::ValidationFailed |
            GeneralKind::InvalidData |
            GeneralKind::MissingData => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    Serialize, Deserialize
)]
pub enum ApiErrorKind {
    General(GeneralKind),
    Auth(AuthKind),
    User(UserKind),
    Group(GroupKind),
    Apartment(ApartmentKind),
    Booking(BookingKind),
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::General(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Auth(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::User(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Group(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Apartment(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Booking(v) => std::fmt::Display::fmt(v, f),
        }
    }
}

impl From<GeneralKind> for ApiErrorKind {
    fn from(v: GeneralKind) -> Self {
        ApiErrorKind::General(v)
    }
}

impl From<AuthKind> for ApiErrorKind {
    fn from(v: AuthKind) -> Self {
        ApiErrorKind::Auth(v)
    }
}

impl From<UserKind> for ApiErrorKind {
    fn from(v: UserKind) -> Self {
        ApiErrorKind::User(v)
    }
}

impl From<GroupKind> for ApiErrorKind {
    fn from(v: GroupKind) -> Self {
        ApiErrorKind::Group(v)
    }
}

impl From<ApartmentKind> for ApiErrorKind {
    fn from(v: ApartmentKind) -> Self {
        ApiErrorKind::Apartment(v)
    }
}

impl From<BookingKind> for ApiErrorKind {
    fn from(v: BookingKind) -> Self {
        ApiErrorKind::Booking(v)
    }
}

impl From<&ApiErrorKind> for StatusCode {
    fn from(kind: &ApiErrorKind) -> Self {
        match kind {
            ApiErrorKind::General(v) => v.into(),
            ApiErrorKind::Auth(v) => v.into(),
            ApiErrorKind::User(v) => v.into(),
            ApiErrorKind::Group(v) => v.into(),
            ApiErrorKind::Apartment(v) => v.into(),
            ApiErrorKind::Booking(v) => v.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Detail {
    Keys(Vec<String>),
}

impl Detail {
    pub fn with_key(key: impl Into<String>) -> Self {
        Detail::Keys(vec![key.into()])
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detail::Keys(list) => {
                let mut iter = list.iter();

                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;

                    while let Some(key) = iter.next() {
                        write!(f, ",{}", key)?;
                    }
                }
            },
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    kind: ApiErrorKind,
    detail: Option<Detail>,
    msg: Option<String>,
}

impl ApiError {
    pub fn new() -> Self {
        ApiError {
            kind: ApiErrorKind::General(GeneralKind::InternalFailure),
            detail: None,
            msg: None
        }
    }

    pub fn with_kind<K>(mut self, kind: K) -> Self
    where
        K: Into<ApiErrorKind>
    {
        self.kind = kind.into();
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_message<M>(mut self, msg: M) -> Self
    where
        M: Into<String>
    {
        self.msg = Some(msg.into());
        self
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.msg.as_ref().map(|v| v.as_str())
    }
}

impl std::default::Default for ApiError {
    fn default() -> Self {
        ApiError::new()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }

        if let Some(msg) = &self.msg {
            write!(f, ": {}", msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl axum_core::response::IntoResponse for ApiError {
    fn into_response(self) -> axum_core::response::Response {
        let status = StatusCode::from(&self.kind);

        match serialize_json(status, &self) {
            Ok(res) => res,
            Err(err) => {
                tracing::error!("ApiError serialization error {:?}", err);
                error_json()
            }
        }
    }
}

impl<K> From<K> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from(kind: K) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: None
        }
    }
}

impl<K,M> From<(K, M)> for ApiError
where
    K: Into<ApiErrorKind>,
    M: Into<String>,
{
    fn from((kind, msg): (K, M)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: Some(msg.into())
        }
    }
}

impl<K> From<(K, Detail)> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from((kind, detail): (K, Detail)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: Some(detail),
            msg: None
        }
    }
}

impl<K,M> From<(K, Detail, M)> for ApiError
where
    K: Into<ApiErrorKind>,
    M: Into<String>
{
    fn from((kind, detail, msg): (K, Detail, M)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: Some(detail),
            msg: Some(msg.into())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    pub fn kind_status_classes() {
        assert_eq!(StatusCode::from(&ApiErrorKind::from(AuthKind::PermissionDenied)), StatusCode::FORBIDDEN);
        assert_eq!(StatusCode::from(&ApiErrorKind::from(AuthKind::InvalidCredentials)), StatusCode::UNAUTHORIZED);
        assert_eq!(StatusCode::from(&ApiErrorKind::from(GroupKind::MemberExists)), StatusCode::CONFLICT);
        assert_eq!(StatusCode::from(&ApiErrorKind::from(BookingKind::DatesOverlap)), StatusCode::CONFLICT);
        assert_eq!(StatusCode::from(&ApiErrorKind::from(BookingKind::InvalidDateRange)), StatusCode::BAD_REQUEST);
        assert_eq!(StatusCode::from(&ApiErrorKind::from(GeneralKind::InternalFailure)), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
