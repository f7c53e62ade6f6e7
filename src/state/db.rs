use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod};
use tokio_postgres::NoTls;

use crate::error;
use crate::config;

pub fn from_config(config: &config::Config) -> error::Result<Pool> {
    let db = &config.settings.db;

    let mut pg_config = tokio_postgres::Config::new();
    pg_config.user(db.user.as_str());
    pg_config.host(db.host.as_str());
    pg_config.port(db.port);
    pg_config.dbname(db.dbname.as_str());

    if let Some(password) = &db.password {
        pg_config.password(password.as_str());
    }

    let manager = Manager::from_config(
        pg_config,
        NoTls,
        ManagerConfig {
            recycling_method: RecyclingMethod::Fast
        }
    );

    Ok(Pool::builder(manager).build()?)
}
