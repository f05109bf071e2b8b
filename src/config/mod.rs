// src/config/mod.rs
pub mod types;

pub use self::types::{
    BackupConfig, ConventionConfig, LecternToml, MetadataConfig, SiteConfig,
};

use crate::error::{LecternError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "lectern.toml";
pub const IGNORE_FILE: &str = ".lecternignore";

/// Directories never descended into during discovery.
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    ".lectern_backup",
    "build",
    "_site",
    ".quarto",
    "__pycache__",
    ".ipynb_checkpoints",
    "node_modules",
    "target",
    ".venv",
    "venv",
    ".cache",
];

/// Runtime configuration: parsed `lectern.toml` plus repo-local state.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    pub site: SiteConfig,
    pub conventions: ConventionConfig,
    pub metadata: MetadataConfig,
    pub backup: BackupConfig,
    /// Extra directory names to prune, from `.lecternignore`.
    pub extra_prunes: Vec<String>,
    pub verbose: bool,
}

impl Config {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            site: SiteConfig::default(),
            conventions: ConventionConfig::default(),
            metadata: MetadataConfig::default(),
            backup: BackupConfig::default(),
            extra_prunes: Vec::new(),
            verbose: false,
        }
    }

    /// Creates a config for `root`, layering `lectern.toml` and
    /// `.lecternignore` over defaults when present.
    ///
    /// # Errors
    /// Returns error if `lectern.toml` exists but is not valid TOML.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(root);
        let toml_path = config.root.join(CONFIG_FILE);
        if toml_path.exists() {
            let raw = fs::read_to_string(&toml_path)
                .map_err(|e| LecternError::io(e, &toml_path))?;
            config.parse_toml(&raw)?;
        }
        let ignore_path = config.root.join(IGNORE_FILE);
        if let Ok(raw) = fs::read_to_string(&ignore_path) {
            for line in raw.lines() {
                config.process_ignore_line(line);
            }
        }
        Ok(config)
    }

    /// Applies the contents of a `lectern.toml` document.
    ///
    /// # Errors
    /// Returns `LecternError::Config` on parse failure.
    pub fn parse_toml(&mut self, raw: &str) -> Result<()> {
        let parsed: LecternToml = toml::from_str(raw)
            .map_err(|e| LecternError::Config(format!("{CONFIG_FILE}: {e}")))?;
        self.site = parsed.site;
        self.conventions = parsed.conventions;
        self.metadata = parsed.metadata;
        self.backup = parsed.backup;
        Ok(())
    }

    pub fn process_ignore_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }
        self.extra_prunes.push(trimmed.trim_matches('/').to_string());
    }

    /// True if a directory name should be skipped during walks.
    #[must_use]
    pub fn should_prune(&self, name: &str) -> bool {
        PRUNE_DIRS.contains(&name) || self.extra_prunes.iter().any(|p| p == name)
    }

    /// Absolute path of the flat notebooks directory.
    #[must_use]
    pub fn notebooks_dir(&self) -> PathBuf {
        self.root.join(&self.conventions.notebooks_dir)
    }

    /// Colab badge URL for a notebook path relative to the repo root.
    ///
    /// # Errors
    /// Returns `LecternError::Config` when `site.github_repo` is unset.
    pub fn colab_url(&self, rel_path: &Path) -> Result<String> {
        if self.site.github_repo.is_empty() {
            return Err(LecternError::Config(
                "site.github_repo is not set in lectern.toml (needed to build Colab links)"
                    .to_string(),
            ));
        }
        let rel = rel_path.to_string_lossy().replace('\\', "/");
        Ok(format!(
            "https://colab.research.google.com/github/{}/blob/{}/{}",
            self.site.github_repo, self.site.branch, rel
        ))
    }
}
