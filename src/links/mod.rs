// src/links/mod.rs
//! Markdown link extraction and existence checking for Quarto pages.

pub mod report;

use crate::config::Config;
use crate::discovery;
use crate::error::Result;
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").unwrap_or_else(|_| unreachable!()));

/// Classification of a broken link by its target extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    MissingHtml,
    MissingPdf,
    MissingNotebook,
    MissingSource,
    Other,
}

impl LinkKind {
    #[must_use]
    pub fn classify(url: &str) -> Self {
        if url.ends_with(".html") {
            Self::MissingHtml
        } else if url.ends_with(".pdf") {
            Self::MissingPdf
        } else if url.ends_with(".ipynb") {
            Self::MissingNotebook
        } else if [".tex", ".py", ".md"].iter().any(|e| url.ends_with(e)) {
            Self::MissingSource
        } else {
            Self::Other
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MissingHtml => "missing-html",
            Self::MissingPdf => "missing-pdf",
            Self::MissingNotebook => "missing-notebook",
            Self::MissingSource => "missing-source",
            Self::Other => "other",
        }
    }

    /// Remediation hints shown in reports.
    #[must_use]
    pub fn suggestions(self) -> &'static [&'static str] {
        match self {
            Self::MissingHtml => &[
                "Convert .ipynb notebooks to .html with nbconvert",
                "Set up CI to auto-convert notebooks",
                "Link directly to .ipynb files instead of .html",
            ],
            Self::MissingPdf => &[
                "Compile .tex files to .pdf (lectern compile)",
                "Add CI to auto-compile LaTeX",
                "Check whether the PDF lives at a different path",
            ],
            Self::MissingNotebook => &[
                "Verify the notebook exists in the notebooks directory",
                "Check for typos in the filename",
                "Ensure the notebook was committed",
            ],
            Self::MissingSource | Self::Other => &[],
        }
    }
}

/// A link whose relative target does not exist on disk.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
    /// Page containing the link, relative to the repo root.
    pub file: PathBuf,
    pub line: usize,
    pub text: String,
    pub url: String,
    pub kind: LinkKind,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LinkSummary {
    pub files_checked: usize,
    pub total_links: usize,
    pub broken: Vec<BrokenLink>,
}

impl LinkSummary {
    #[must_use]
    pub fn has_broken(&self) -> bool {
        !self.broken.is_empty()
    }

    #[must_use]
    pub fn by_kind(&self) -> BTreeMap<LinkKind, usize> {
        let mut counts = BTreeMap::new();
        for link in &self.broken {
            *counts.entry(link.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Working links as a percentage, 100.0 when there are no links.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn success_rate(&self) -> f64 {
        if self.total_links == 0 {
            return 100.0;
        }
        (self.total_links - self.broken.len()) as f64 / self.total_links as f64 * 100.0
    }
}

/// Extracts `[text](url)` links with their 1-based line numbers.
#[must_use]
pub fn extract_links(content: &str) -> Vec<(String, String, usize)> {
    MARKDOWN_LINK
        .captures_iter(content)
        .filter_map(|cap| {
            let m = cap.get(0)?;
            let line = content[..m.start()].matches('\n').count() + 1;
            Some((cap[1].to_string(), cap[2].to_string(), line))
        })
        .collect()
}

#[must_use]
pub fn is_external(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://") || url.starts_with("mailto:")
}

/// Whether a link target resolves to an existing file. External URLs and
/// pure-anchor links pass unchecked.
#[must_use]
pub fn target_exists(url: &str, page: &Path, root: &Path) -> bool {
    if is_external(url) {
        return true;
    }
    let path_part = url.split('#').next().unwrap_or("");
    if path_part.is_empty() {
        return true;
    }
    let resolved = if let Some(stripped) = path_part.strip_prefix('/') {
        root.join(stripped)
    } else {
        page.parent().unwrap_or_else(|| Path::new(".")).join(path_part)
    };
    resolved.exists()
}

/// Checks every link in every `.qmd` page under the repo root. Pages are
/// scanned in parallel; unreadable pages are skipped with a warning.
///
/// # Errors
/// Currently infallible, kept fallible for parity with the other checkers.
pub fn check_all(config: &Config) -> Result<LinkSummary> {
    let pages = discovery::qmd_files(config);

    let per_file: Vec<(usize, Vec<BrokenLink>)> = pages
        .par_iter()
        .map(|page| check_page(config, page))
        .collect();

    let mut summary = LinkSummary {
        files_checked: pages.len(),
        ..LinkSummary::default()
    };
    for (count, mut broken) in per_file {
        summary.total_links += count;
        summary.broken.append(&mut broken);
    }
    Ok(summary)
}

fn check_page(config: &Config, page: &Path) -> (usize, Vec<BrokenLink>) {
    let Ok(content) = fs::read_to_string(page) else {
        eprintln!("WARN: could not read {}", page.display());
        return (0, Vec::new());
    };

    let links = extract_links(&content);
    let total = links.len();
    let rel = discovery::rel_to_root(page, &config.root).to_path_buf();

    let broken = links
        .into_iter()
        .filter(|(_, url, _)| !target_exists(url, page, &config.root))
        .map(|(text, url, line)| BrokenLink {
            file: rel.clone(),
            line,
            kind: LinkKind::classify(&url),
            text,
            url,
        })
        .collect();
    (total, broken)
}
