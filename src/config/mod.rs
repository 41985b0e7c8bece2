use crate::backend::{AnyBackend, LocalBackend, RestBackend};
use crate::core::DEFAULT_BUCKET;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Keys every config file is expected to carry (`config --check`).
pub const KEYS: &[&str] = &[
    "backend",
    "supabase_url",
    "supabase_key",
    "database",
    "export_dir",
    "default_bucket",
    "public_base",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Remote,
    Local,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_supabase_url")]
    pub supabase_url: String,
    #[serde(default)]
    pub supabase_key: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_bucket")]
    pub default_bucket: String,
    #[serde(default = "default_public_base")]
    pub public_base: String,
}

fn default_supabase_url() -> String {
    "https://your-project-id.supabase.co".to_string()
}
fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_export_dir() -> String {
    ".".to_string()
}
fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}
fn default_public_base() -> String {
    "local://storage".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            supabase_url: default_supabase_url(),
            supabase_key: String::new(),
            database: default_database(),
            export_dir: default_export_dir(),
            default_bucket: default_bucket(),
            public_base: default_public_base(),
        }
    }
}

impl Config {
    /// Configuration directory: `$INFRATRACK_HOME`, or `~/.infratrack`.
    pub fn config_dir() -> PathBuf {
        if let Ok(home) = env::var("INFRATRACK_HOME") {
            return PathBuf::from(home);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".infratrack")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("infratrack.conf")
    }

    /// Return the default path of the local SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("infratrack.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Config::default())
        }
    }

    /// Keys of `KEYS` missing from the config file on disk.
    pub fn missing_keys() -> AppResult<Vec<&'static str>> {
        let content = fs::read_to_string(Self::config_file())?;
        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;

        let map = yaml.as_mapping();
        Ok(KEYS
            .iter()
            .copied()
            .filter(|k| {
                map.is_none_or(|m| !m.contains_key(serde_yaml::Value::String(k.to_string())))
            })
            .collect())
    }

    /// Point the configuration at a local SQLite file (the `--db` override).
    pub fn use_local_database(&mut self, path: &str) {
        self.backend = BackendKind::Local;
        self.database = path.to_string();
    }

    /// Build the backend this configuration selects.
    pub fn connect(&self) -> AppResult<AnyBackend> {
        match self.backend {
            BackendKind::Remote => Ok(AnyBackend::Remote(RestBackend::new(
                &self.supabase_url,
                &self.supabase_key,
            )?)),
            BackendKind::Local => {
                let db = expand_tilde(&self.database);
                Ok(AnyBackend::Local(LocalBackend::open(
                    &db.to_string_lossy(),
                    &self.public_base,
                )?))
            }
        }
    }

    /// Initialize configuration file and, for the local backend, the database.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let mut config = Config::default();

        if let Some(name) = custom_db {
            let p = std::path::Path::new(&name);
            let db_path = if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            };
            config.use_local_database(&db_path.to_string_lossy());
        }

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config)
    }
}
