use std::{env, path::Path, path::PathBuf};

use config::{ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use dynojson::{convert::DEFAULT_MAX_DEPTH, document::DEFAULT_INDENT, Converter, Direction};
use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::debug;

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

const CONFIG_FILES: [(&str, FileFormat); 5] = [
    ("config.json5", FileFormat::Json5),
    ("config.json", FileFormat::Json),
    ("config.yaml", FileFormat::Yaml),
    ("config.toml", FileFormat::Toml),
    ("config.ini", FileFormat::Ini),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Spaces per indentation level in rendered output; 0 renders compact JSON.
    pub indent: usize,
    pub max_depth: usize,
    /// Direction the TUI starts in.
    pub direction: Direction,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            max_depth: DEFAULT_MAX_DEPTH,
            direction: Direction::default(),
            color: true,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(&get_config_dir(), true)
    }

    /// Layer the config files found in `config_dir`, then (optionally) `DYNOJSON_*` variables.
    pub fn load(config_dir: &Path, with_env: bool) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        for (file, format) in CONFIG_FILES {
            let path = config_dir.join(file);
            if path.exists() {
                debug!("loading config from {}", path.display());
            }
            builder = builder.add_source(File::from(path).format(format).required(false));
        }

        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(&PROJECT_NAME)
                    .try_parsing(true)
                    .ignore_empty(true),
            );
        }

        builder.build()?.try_deserialize()
    }

    pub fn converter(&self) -> Converter {
        Converter::new().with_max_depth(self.max_depth)
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = DATA_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "dynojson", env!("CARGO_PKG_NAME"))
}
