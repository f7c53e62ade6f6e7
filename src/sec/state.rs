use crate::error;
use crate::config;

use super::authn::session::SessionCache;

#[derive(Debug)]
pub struct SessionInfo {
    cache: SessionCache,
    domain: Option<String>,
    secure: bool,
}

impl SessionInfo {
    pub fn from_config(config: &config::Config) -> error::Result<Self> {
        tracing::debug!("creating SessionInfo state");

        let cache = SessionCache::builder()
            .name("session_cache")
            .max_capacity(1_000)
            .build();

        Ok(SessionInfo {
            cache,
            domain: config.settings.sec.session.domain.clone(),
            secure: config.settings.sec.session.secure,
        })
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn domain(&self) -> Option<&String> {
        self.domain.as_ref()
    }

    pub fn secure(&self) -> &bool {
        &self.secure
    }
}

#[derive(Debug)]
pub struct Sec {
    session_info: SessionInfo,
}

impl Sec {
    pub fn from_config(config: &config::Config) -> error::Result<Sec> {
        tracing::debug!("creating Sec state");

        Ok(Sec {
            session_info: SessionInfo::from_config(config)?,
        })
    }

    pub fn session_info(&self) -> &SessionInfo {
        &self.session_info
    }
}
