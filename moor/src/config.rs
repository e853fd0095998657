//! Configuration
//!
//! Precedence: CLI > environment > config file > defaults. The config file
//! lives at the XDG config dir (`moor/config.toml`) unless `--config`
//! points elsewhere.

use std::env;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "moor")]
#[command(version)]
#[command(about = "A full-screen project navigator with per-project todos", long_about = None)]
pub struct CliArgs {
    /// Path to custom config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the projects database
    #[arg(long, value_name = "FILE")]
    pub db: Option<PathBuf>,

    /// Directory scanned for git repositories
    #[arg(short, long, value_name = "DIR")]
    pub projects_dir: Option<PathBuf>,

    /// Editor command launched on ENTER in the file tree
    #[arg(short, long, value_name = "CMD")]
    pub editor: Option<String>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("projects directory {0} does not exist")]
    MissingProjectsDir(PathBuf),

    #[error("editor command is empty")]
    EmptyEditor,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where the SQLite database lives
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// The directory scanned for projects
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    /// The editor command
    #[serde(default = "default_editor")]
    pub editor: String,

    /// How many rows the cursor travels into a list before it scrolls
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: usize,
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("moor").join("projects.db"))
        .unwrap_or_else(|| PathBuf::from("projects.db"))
}

fn default_projects_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_editor() -> String {
    env::var("EDITOR").unwrap_or_else(|_| "vi".to_string())
}

fn default_scroll_threshold() -> usize {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            projects_dir: default_projects_dir(),
            editor: default_editor(),
            scroll_threshold: default_scroll_threshold(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence:
    /// CLI args > environment variables > config file > defaults
    pub fn load_with_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        let config_path = args.config.clone().or_else(Self::default_config_path);
        if let Some(path) = &config_path {
            if path.exists() {
                config = Self::load_from_file(path)?;
            }
        }

        config.apply_env_vars();
        config.apply_cli_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })
    }

    fn apply_env_vars(&mut self) {
        if let Ok(val) = env::var("MOOR_DB") {
            self.db_path = PathBuf::from(val);
        }
        if let Ok(val) = env::var("MOOR_PROJECTS_DIR") {
            self.projects_dir = PathBuf::from(val);
        }
        if let Ok(val) = env::var("MOOR_EDITOR") {
            self.editor = val;
        }
    }

    fn apply_cli_args(&mut self, args: &CliArgs) {
        if let Some(db) = &args.db {
            self.db_path = db.clone();
        }
        if let Some(dir) = &args.projects_dir {
            self.projects_dir = dir.clone();
        }
        if let Some(editor) = &args.editor {
            self.editor = editor.clone();
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.projects_dir.is_dir() {
            return Err(ConfigError::MissingProjectsDir(self.projects_dir.clone()));
        }
        if self.editor.trim().is_empty() {
            return Err(ConfigError::EmptyEditor);
        }
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("moor").join("config.toml"))
    }
}
