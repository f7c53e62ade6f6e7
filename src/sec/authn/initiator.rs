use std::ops::Deref;
use std::pin::Pin;
use std::future::Future;

use axum::http::header::{HeaderMap, HeaderValue, GetAll};
use axum::http::request::Parts;
use axum::extract::FromRequestParts;
use deadpool_postgres::{Pool, GenericClient};

use crate::net::error;
use crate::sec::state;
use crate::user;

use super::session;

#[derive(Debug)]
pub enum Mechanism {
    Session(session::Session),
}

pub struct Initiator {
    pub user: user::User,
    pub mechanism: Mechanism
}

impl Initiator {
    pub fn user(&self) -> &user::User {
        &self.user
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("session was not found")]
    SessionNotFound,

    #[error("session has expired")]
    SessionExpired,

    #[error("user was not found")]
    UserNotFound(Mechanism),

    #[error("no authentication mechanism was found")]
    MechanismNotFound,

    #[error(transparent)]
    SessionDecode(#[from] session::DecodeError),

    #[error(transparent)]
    Database(#[from] tokio_postgres::Error),

    #[error(transparent)]
    HeaderToStr(#[from] axum::http::header::ToStrError),
}

impl From<LookupError> for error::Error {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::SessionNotFound => error::Error::api(error::AuthKind::SessionNotFound),
            LookupError::SessionExpired => error::Error::api(error::AuthKind::SessionExpired),

            LookupError::UserNotFound(_mechanism) => error::Error::api(error::UserKind::NotFound),

            LookupError::MechanismNotFound => error::Error::api(error::AuthKind::MechanismNotFound),

            LookupError::Database(e) => e.into(),
            LookupError::HeaderToStr(e) => e.into(),

            LookupError::SessionDecode(err) => match err {
                session::DecodeError::InvalidString |
                session::DecodeError::InvalidLength => error::Error::api(error::AuthKind::InvalidSession),
            }
        }
    }
}

pub async fn lookup_token(
    auth: &state::Sec,
    conn: &impl GenericClient,
    token: session::token::SessionToken,
) -> Result<Initiator, LookupError> {
    let now = chrono::Utc::now();
    let cache = auth.session_info().cache();

    if let Some((session, user)) = cache.get(&token) {
        if session.dropped || session.expires < now {
            cache.invalidate(&token);

            return Err(LookupError::SessionExpired);
        }

        return Ok(Initiator {
            user,
            mechanism: Mechanism::Session(session),
        });
    }

    if let Some(session) = session::Session::retrieve_token(conn, &token).await? {
        if session.dropped || session.expires < now {
            return Err(LookupError::SessionExpired);
        }

        if let Some(user) = user::User::retrieve(conn, &session.user_id).await? {
            cache.insert(token, (session.clone(), user.clone()));

            Ok(Initiator {
                user,
                mechanism: Mechanism::Session(session),
            })
        } else {
            Err(LookupError::UserNotFound(Mechanism::Session(session)))
        }
    } else {
        Err(LookupError::SessionNotFound)
    }
}

fn find_cookie_token<'a>(cookies: GetAll<'a, HeaderValue>) -> Result<Option<&'a str>, LookupError> {
    for value in cookies {
        let value_str = value.to_str()?;

        for pair in value_str.split("; ") {
            if let Some((name, value)) = pair.split_once('=') {
                if name == "session_id" {
                    return Ok(Some(value));
                }
            }
        }
    }

    Ok(None)
}

fn find_bearer_token(headers: &HeaderMap) -> Result<Option<&str>, LookupError> {
    let Some(authorization) = headers.get("authorization") else {
        return Ok(None);
    };

    let value_str = authorization.to_str()?;

    if let Some((scheme, token)) = value_str.split_once(' ') {
        if scheme.eq_ignore_ascii_case("bearer") {
            return Ok(Some(token));
        }
    }

    Ok(None)
}

pub async fn lookup_header_map(
    auth: &state::Sec,
    conn: &impl GenericClient,
    headers: &HeaderMap
) -> Result<Initiator, LookupError> {
    if let Some(found) = find_bearer_token(headers)? {
        let token = session::decode_base64(found)?;

        return lookup_token(auth, conn, token).await;
    }

    if let Some(found) = find_cookie_token(headers.get_all("cookie"))? {
        let token = session::decode_base64(found)?;

        return lookup_token(auth, conn, token).await;
    }

    Err(LookupError::MechanismNotFound)
}

impl<A, S> FromRequestParts<A> for Initiator
where
    A: Deref<Target = S> + Sync,
    S: AsRef<state::Sec> + AsRef<Pool> + Sync,
{
    type Rejection = error::Error;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 A,
    ) -> Pin<Box<dyn Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>>
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait
    {
        Box::pin(async move {
            // the state only needs to provide the sec state and the pool.
            // going through Deref + AsRef keeps this from depending on the
            // concrete Shared struct
            let state_deref = state.deref();

            let auth: &state::Sec = state_deref.as_ref();
            let pool: &Pool = state_deref.as_ref();
            let conn = pool.get().await?;

            Ok(lookup_header_map(auth, &conn, &parts.headers).await?)
        })
    }
}
