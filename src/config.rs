use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::error::{self, Context};

mod shape;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// a config path or directory to load file from
    #[arg(long)]
    config: Vec<PathBuf>
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
}

impl Config {
    pub fn from_args(args: CliArgs) -> error::Result<Self> {
        let mut settings = Settings::default();

        for config_path in args.config {
            tracing::debug!("loading config file \"{}\"", config_path.display());

            let loaded = Self::load_file(&config_path)?;

            settings.merge(loaded);
        }

        tracing::debug!("{settings:#?}");

        Ok(Config {
            settings
        })
    }

    fn load_file(path: &PathBuf) -> error::Result<shape::Settings> {
        let ext = path.extension().context(format!(
            "failed to retrieve the file extension for config file: \"{}\"", path.display()
        ))?;

        let ext = ext.to_ascii_lowercase();
        let file = std::fs::OpenOptions::new()
            .read(true)
            .open(path)
            .context(format!("failed to open config file: \"{}\"", path.display()))?;

        if ext == "yaml" || ext == "yml" {
            serde_yaml::from_reader(&file).context(format!(
                "failed to parse yaml config file: \"{}\"", path.display()
            ))
        } else if ext == "json" {
            serde_json::from_reader(&file).context(format!(
                "failed to parse json config file: \"{}\"", path.display()
            ))
        } else {
            Err(error::Error::new().message(format!(
                "unknown config file extension: \"{}\"", path.display()
            )))
        }
    }
}

pub fn get_config() -> error::Result<Config> {
    Config::from_args(CliArgs::parse())
}

#[derive(Debug)]
pub struct Settings {
    pub listeners: HashMap<String, Listener>,
    pub db: Db,
    pub sec: Sec,
}

impl Settings {
    fn merge(&mut self, loaded: shape::Settings) {
        if let Some(listeners) = loaded.listeners {
            for (key, listener) in listeners {
                self.listeners.insert(key, Listener {
                    addr: listener.addr
                });
            }
        }

        if let Some(db) = loaded.db {
            if let Some(user) = db.user {
                self.db.user = user;
            }

            if let Some(password) = db.password {
                self.db.password = Some(password);
            }

            if let Some(host) = db.host {
                self.db.host = host;
            }

            if let Some(port) = db.port {
                self.db.port = port;
            }

            if let Some(dbname) = db.dbname {
                self.db.dbname = dbname;
            }
        }

        if let Some(sec) = loaded.sec {
            if let Some(session) = sec.session {
                if let Some(secure) = session.secure {
                    self.sec.session.secure = secure;
                }

                if let Some(domain) = session.domain {
                    self.sec.session.domain = Some(domain);
                }
            }
        }
    }
}

impl std::default::Default for Settings {
    fn default() -> Self {
        Settings {
            listeners: HashMap::from([
                (String::from("main"), Listener {
                    addr: SocketAddr::from(([0, 0, 0, 0], 8070))
                })
            ]),
            db: Db::default(),
            sec: Sec::default(),
        }
    }
}

#[derive(Debug)]
pub struct Listener {
    pub addr: SocketAddr,
}

#[derive(Debug)]
pub struct Db {
    pub user: String,
    pub password: Option<String>,
    pub host: String,
    pub port: u16,
    pub dbname: String,
}

impl std::default::Default for Db {
    fn default() -> Self {
        Db {
            user: String::from("postgres"),
            password: None,
            host: String::from("localhost"),
            port: 5432,
            dbname: String::from("lodge"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Sec {
    pub session: Session,
}

#[derive(Debug)]
pub struct Session {
    pub secure: bool,
    pub domain: Option<String>,
}

impl std::default::Default for Session {
    fn default() -> Self {
        Session {
            secure: false,
            domain: None,
        }
    }
}
