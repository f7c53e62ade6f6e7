use lodge_lib::ids;

use chrono::{DateTime, Utc};
use tokio_postgres::{Error as PgError};
use deadpool_postgres::GenericClient;
use argon2::Variant;
use rand::RngCore;

use crate::net::error::Error as NetError;

pub const SALT_LEN: usize = 32;

pub type Salt = [u8; SALT_LEN];

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error(transparent)]
    Rand(#[from] rand::Error),

    #[error(transparent)]
    Argon2(#[from] argon2::Error),

    #[error(transparent)]
    Db(#[from] PgError)
}

impl From<PasswordError> for NetError {
    fn from(err: PasswordError) -> Self {
        NetError::new().source(err)
    }
}

pub fn gen_salt() -> Result<Salt, rand::Error> {
    let mut salt = [0u8; SALT_LEN];

    rand::thread_rng().try_fill_bytes(&mut salt)?;

    Ok(salt)
}

pub fn gen_hash(password: &str, salt: &[u8]) -> Result<String, argon2::Error> {
    let mut config = argon2::Config::default();
    config.mem_cost = 19456;
    config.variant = Variant::Argon2id;

    Ok(argon2::hash_encoded(
        password.as_bytes(),
        salt,
        &config
    )?)
}

pub fn create_hash(password: &str) -> Result<String, PasswordError> {
    let salt = gen_salt()?;

    Ok(gen_hash(password, &salt)?)
}

pub struct Password {
    pub user_id: ids::UserId,
    pub hash: String,
    pub updated: DateTime<Utc>,
}

impl Password {
    pub async fn retrieve(
        conn: &impl GenericClient,
        user_id: &ids::UserId,
    ) -> Result<Option<Password>, PgError> {
        if let Some(row) = conn.query_opt(
            "\
            select auth_passwords.user_id, \
                   auth_passwords.hash, \
                   auth_passwords.updated \
            from auth_passwords \
            where auth_passwords.user_id = $1",
            &[user_id]
        ).await? {
            Ok(Some(Password {
                user_id: row.get(0),
                hash: row.get(1),
                updated: row.get(2),
            }))
        } else {
            Ok(None)
        }
    }

    pub async fn create(
        conn: &impl GenericClient,
        user_id: &ids::UserId,
        password: &str,
    ) -> Result<Password, PasswordError> {
        let hash = create_hash(password)?;
        let updated = Utc::now();

        conn.execute(
            "\
            insert into auth_passwords (user_id, hash, updated) \
            values ($1, $2, $3)",
            &[user_id, &hash, &updated]
        ).await?;

        Ok(Password {
            user_id: user_id.clone(),
            hash,
            updated,
        })
    }

    pub fn verify(&self, given: &str) -> Result<bool, argon2::Error> {
        argon2::verify_encoded(&self.hash, given.as_bytes())
    }
}
