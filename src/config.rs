use crate::model::seed;
use crate::model::{Record, TableConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "animal-table";

/// One table on screen: its configuration plus the seed used when nothing
/// has been persisted yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(flatten)]
    pub table: TableConfig,
    #[serde(default)]
    pub seed: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding persisted collections and the log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_tables")]
    pub tables: Vec<TableSpec>,
}

fn default_tables() -> Vec<TableSpec> {
    seed::default_tables()
        .into_iter()
        .map(|(table, seed)| TableSpec { table, seed })
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            tables: default_tables(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file at `path`, or the default location when `None`.
    ///
    /// A missing default config is written out so it can be edited; an
    /// unparseable one falls back to the built-in tables.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Config> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => match Self::default_path() {
                Some(p) => (p, false),
                None => return Ok(Config::default()),
            },
        };

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !explicit => {
                let config = Config::default();
                if let Err(e) = config.save(&path) {
                    tracing::warn!("Could not write default config: {}", e);
                }
                return Ok(config);
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Could not read config {}: {}",
                    path.display(),
                    e
                ))
            }
        };

        let parsed = serde_json::from_str::<Config>(&contents)
            .map_err(anyhow::Error::from)
            .and_then(|config| config.validate().map(|()| config));

        match parsed {
            Ok(config) => Ok(config),
            Err(e) if !explicit => {
                tracing::warn!("Ignoring config {}: {}", path.display(), e);
                Ok(Config::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Invalid config {}: {}",
                path.display(),
                e
            )),
        }
    }

    /// Table ids become storage file names, so they must be unique and
    /// limited to ASCII letters, digits, `-` and `_`
    pub fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.tables {
            let id = spec.table.id.as_str();
            let safe = !id.is_empty()
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !safe {
                anyhow::bail!("table id '{}' may only use letters, digits, '-' and '_'", id);
            }
            if !seen.insert(id) {
                anyhow::bail!("table id '{}' is used more than once", id);
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// `<platform data dir>/animal-table`, or `./.animal-table` when the
    /// platform has none
    pub fn platform_data_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .unwrap_or_else(|| PathBuf::from(".animal-table"))
    }

    /// Where collections are stored: configured, else the platform data dir
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::platform_data_dir)
    }
}
