//! Server configuration.
//!
//! Read from the YAML file named by `DOCSERVE_CONFIG` when set; every field
//! has a default, and `LISTEN` / `ROOT_DIR` override the file.
//!
//! ```yaml
//! server:
//!   listen_addr: "0.0.0.0:8080"
//!   root_dir: "webtest"
//!   http_version: "HTTP/1.1"
//! ```

use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

use crate::http::registry::ServerContext;
use crate::http::response::HTTP_VERSION;

pub const CONFIG_ENV: &str = "DOCSERVE_CONFIG";
pub const LISTEN_ENV: &str = "LISTEN";
pub const ROOT_DIR_ENV: &str = "ROOT_DIR";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    pub root_dir: PathBuf,
    pub http_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            root_dir: PathBuf::from("web"),
            http_version: HTTP_VERSION.to_string(),
        }
    }
}

impl Config {
    /// Loads the config file (if any), then applies environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {path}"))?;
                Self::from_yaml(&raw).with_context(|| format!("parsing config file {path}"))?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var(ROOT_DIR_ENV) {
            cfg.server.root_dir = PathBuf::from(root);
        }

        Ok(cfg)
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        let cfg = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }

    /// The context handed to every handler.
    pub fn server_context(&self) -> ServerContext {
        ServerContext::new(self.server.root_dir.clone()).with_version(self.server.http_version.clone())
    }
}
