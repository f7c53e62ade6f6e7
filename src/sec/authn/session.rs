use lodge_lib::ids;
use chrono::{DateTime, Utc};
use base64::{Engine, engine::general_purpose::URL_SAFE};
use tokio_postgres::{Error as PgError};
use deadpool_postgres::GenericClient;

use crate::net::error::Error as NetError;
use crate::user;

pub mod token;

pub type SessionCache = moka::sync::Cache<token::SessionToken, (Session, user::User)>;

pub const SESSION_HOURS: i64 = 168;

#[derive(Debug, thiserror::Error)]
pub enum BuilderError {
    #[error("ran out of token attempts")]
    TokenAttempts,

    #[error("date time value overflowed")]
    UtcOverflow,

    #[error(transparent)]
    Rand(#[from] rand::Error),

    #[error(transparent)]
    Pg(#[from] PgError),
}

impl From<token::UniqueError> for BuilderError {
    fn from(err: token::UniqueError) -> Self {
        match err {
            token::UniqueError::Rand(err) => BuilderError::Rand(err),
            token::UniqueError::Pg(err) => BuilderError::Pg(err)
        }
    }
}

impl From<BuilderError> for NetError {
    fn from(err: BuilderError) -> NetError {
        match err {
            BuilderError::Pg(err) => err.into(),
            BuilderError::Rand(err) => err.into(),
            err => NetError::new().source(err),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub token: token::SessionToken,
    pub user_id: ids::UserId,
    pub dropped: bool,
    pub issued_on: DateTime<Utc>,
    pub expires: DateTime<Utc>,
}

impl Session {
    pub async fn create(
        conn: &impl GenericClient,
        user_id: &ids::UserId,
    ) -> Result<Session, BuilderError> {
        let dropped = false;
        let issued_on = Utc::now();
        let duration = chrono::Duration::hours(SESSION_HOURS);

        let Some(token) = token::SessionToken::unique(conn, 10).await? else {
            return Err(BuilderError::TokenAttempts);
        };

        let Some(expires) = issued_on.clone().checked_add_signed(duration) else {
            return Err(BuilderError::UtcOverflow);
        };

        let _ = conn.execute(
            "\
            insert into auth_sessions (\
                token, \
                user_id, \
                dropped, \
                issued_on, \
                expires\
            ) values \
            ($1, $2, $3, $4, $5)",
            &[
                &token.as_slice(),
                user_id,
                &dropped,
                &issued_on,
                &expires,
            ]
        ).await?;

        Ok(Session {
            token,
            user_id: user_id.clone(),
            dropped,
            issued_on,
            expires,
        })
    }

    pub async fn retrieve_token(
        conn: &impl GenericClient,
        token: &token::SessionToken
    ) -> Result<Option<Session>, PgError> {
        if let Some(row) = conn.query_opt(
            "\
            select auth_sessions.token, \
                   auth_sessions.user_id, \
                   auth_sessions.dropped, \
                   auth_sessions.issued_on, \
                   auth_sessions.expires \
            from auth_sessions \
            where auth_sessions.token = $1",
            &[&token.as_slice()]
        ).await? {
            Ok(Some(Session {
                token: token::SessionToken::from_vec(row.get(0)),
                user_id: row.get(1),
                dropped: row.get(2),
                issued_on: row.get(3),
                expires: row.get(4),
            }))
        } else {
            Ok(None)
        }
    }

    pub async fn delete(&self, conn: &impl GenericClient) -> Result<(), PgError> {
        let _ = conn.execute(
            "delete from auth_sessions where token = $1",
            &[&self.token.as_slice()]
        ).await?;

        Ok(())
    }
}

pub async fn delete_expired(
    conn: &impl GenericClient,
    reference: &DateTime<Utc>,
) -> Result<u64, PgError> {
    conn.execute(
        "delete from auth_sessions where expires < $1 or dropped",
        &[reference]
    ).await
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid base64 string")]
    InvalidString,

    #[error("invalid token length")]
    InvalidLength,
}

impl From<base64::DecodeError> for DecodeError {
    fn from(_err: base64::DecodeError) -> Self {
        DecodeError::InvalidString
    }
}

pub fn encode_base64(token: &token::SessionToken) -> String {
    URL_SAFE.encode(token.as_slice())
}

pub fn decode_base64<S>(given: S) -> Result<token::SessionToken, DecodeError>
where
    S: AsRef<[u8]>
{
    let decoded = URL_SAFE.decode(given)?;

    token::SessionToken::try_from(decoded)
        .map_err(|_| DecodeError::InvalidLength)
}
