use std::collections::HashMap;
use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub listeners: Option<HashMap<String, Listener>>,
    pub db: Option<Db>,
    pub sec: Option<Sec>,
}

#[derive(Debug, Deserialize)]
pub struct Listener {
    pub addr: SocketAddr,
}

#[derive(Debug, Deserialize)]
pub struct Db {
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub dbname: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Sec {
    pub session: Option<Session>,
}

#[derive(Debug, Deserialize)]
pub struct Session {
    pub secure: Option<bool>,
    pub domain: Option<String>,
}
