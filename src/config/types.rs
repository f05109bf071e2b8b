use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// GitHub slug (`user/repo`) used to build Colab badge URLs.
    #[serde(default)]
    pub github_repo: String,
    #[serde(default = "default_branch")]
    pub branch: String,
    /// Published site base, e.g. `https://user.github.io/repo`.
    #[serde(default)]
    pub url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            github_repo: String::new(),
            branch: default_branch(),
            url: String::new(),
        }
    }
}

fn default_branch() -> String {
    "main".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConventionConfig {
    /// Top-level category directories expected at the repo root.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// Flat directory holding every notebook.
    #[serde(default = "default_notebooks_dir")]
    pub notebooks_dir: String,
    /// Site index page that links the notebooks.
    #[serde(default = "default_index_page")]
    pub index_page: String,
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            notebooks_dir: default_notebooks_dir(),
            index_page: default_index_page(),
        }
    }
}

fn default_categories() -> Vec<String> {
    [
        "basics",
        "maths",
        "optimization",
        "supervised",
        "unsupervised",
        "neural-networks",
        "advanced",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_notebooks_dir() -> String {
    "notebooks".to_string()
}

fn default_index_page() -> String {
    "notebooks.qmd".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Author written into generated front-matter. Empty means omit the line.
    #[serde(default)]
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    /// How many timestamped snapshots to keep under `.lectern_backup/`.
    #[serde(default = "default_retention")]
    pub retention: usize,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            retention: default_retention(),
        }
    }
}

fn default_retention() -> usize {
    5
}

/// On-disk shape of `lectern.toml`. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecternToml {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub conventions: ConventionConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub backup: BackupConfig,
}
