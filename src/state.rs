use std::sync::Arc;

use deadpool_postgres::Pool;

use crate::error;
use crate::config;
use crate::sec;

pub mod db;

#[derive(Debug)]
pub struct Shared {
    pool: Pool,
    sec: sec::state::Sec,
}

pub type ArcShared = Arc<Shared>;

impl Shared {
    pub fn from_config(config: &config::Config) -> error::Result<Shared> {
        tracing::debug!("creating Shared state");

        Ok(Shared {
            pool: db::from_config(config)?,
            sec: sec::state::Sec::from_config(config)?,
        })
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn sec(&self) -> &sec::state::Sec {
        &self.sec
    }

    #[inline]
    pub fn auth(&self) -> &sec::state::Sec {
        self.sec()
    }
}

impl AsRef<Pool> for Shared {
    fn as_ref(&self) -> &Pool {
        &self.pool
    }
}

impl AsRef<sec::state::Sec> for Shared {
    fn as_ref(&self) -> &sec::state::Sec {
        &self.sec
    }
}
