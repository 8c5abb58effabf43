use std::net::SocketAddr;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Runtime configuration.
///
/// Defaults are merged with `VERDANT_`-prefixed environment variables
/// (`VERDANT_LISTEN`, `VERDANT_DATABASE_URL`, `VERDANT_LOGLEVEL`); a `.env`
/// file is honored via dotenvy before loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen: SocketAddr,
    pub database_url: String,
    pub loglevel: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8000)),
            database_url: "sqlite:verdant.sqlite3".to_string(),
            loglevel: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("VERDANT_"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = Config::default();
        assert_eq!(cfg.listen.port(), 8000);
        assert!(cfg.database_url.starts_with("sqlite:"));
    }
}
