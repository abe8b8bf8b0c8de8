use std::{net::SocketAddr, path::Path};

use anyhow::{Context, Result};
use blob_store::BlobStorageConfig;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const LOCAL_ENV: &str = "local";

/// Upload bodies above this size are rejected.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Variables the MinIO deployment already exports, mapped onto
/// `blob_storage.*`.
const MINIO_ENV_KEYS: [&str; 6] = [
    "endpoint",
    "access_key",
    "secret_key",
    "use_ssl",
    "region",
    "bucket",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub env: String,
    // Attached to every request span.
    pub instance_id: Option<String>,
    pub listen_addr: String,
    pub max_upload_bytes: usize,
    pub blob_storage: BlobStorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            env: LOCAL_ENV.to_string(),
            instance_id: None,
            listen_addr: "0.0.0.0:8080".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            blob_storage: Default::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults, then the optional YAML file, then `FILEGATE_*` variables,
    /// then the `MINIO_*` variables.
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed("FILEGATE_").split("__"))
            .merge(
                Env::prefixed("MINIO_")
                    .only(&MINIO_ENV_KEYS)
                    .map(|key| format!("blob_storage.{}", key.as_str().to_ascii_lowercase()).into()),
            )
    }

    pub fn load(path: Option<&Path>) -> Result<ServerConfig> {
        if let Some(path) = path {
            anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
        }
        let mut config: ServerConfig = Self::figment(path)
            .extract()
            .context("error reading server config")?;
        config.validate()?;
        if config.instance_id.is_none() {
            config.instance_id = Some(config.instance_id());
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            return Err(anyhow::anyhow!(
                "invalid listen address: {}",
                self.listen_addr
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("max_upload_bytes must be greater than 0"));
        }
        self.blob_storage.validate()?;
        Ok(())
    }

    pub fn structured_logging(&self) -> bool {
        self.env != LOCAL_ENV
    }

    pub fn instance_id(&self) -> String {
        self.instance_id
            .clone()
            .unwrap_or_else(|| format!("{}-{}", self.env, Uuid::new_v4()))
    }
}
