// src/notebook/metadata.rs
//! Quarto front-matter generation, with title/description/tag inference
//! from the notebook filename when nothing is supplied.

use super::Cell;

/// Metadata destined for a notebook's front-matter cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub author: String,
    /// ISO date (`YYYY-MM-DD`).
    pub date: String,
}

impl FrontMatter {
    /// Renders the YAML block (keys in alphabetical order, the way the
    /// site generator rewrites them).
    #[must_use]
    pub fn to_yaml(&self) -> String {
        let tags_yaml = self
            .tags
            .iter()
            .map(|t| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(", ");

        let mut out = String::from("---\n");
        if !self.author.is_empty() {
            out.push_str(&format!("author: {}\n", self.author));
        }
        out.push_str(&format!("date: {}\n", self.date));
        out.push_str(&format!("description: {}\n", self.description));
        out.push_str(&format!("tags: [{tags_yaml}]\n"));
        out.push_str(&format!("title: '{}'\n", self.title));
        out.push_str("---");
        out
    }

    #[must_use]
    pub fn into_cell(self) -> Cell {
        Cell::raw(format!("{}\n", self.to_yaml()))
    }
}

/// Filename keywords mapped to subject tags.
const TAG_RULES: &[(&[&str], &[&str])] = &[
    (&["linear", "regression"], &["linear-regression", "supervised-learning"]),
    (&["logistic", "classification"], &["logistic-regression", "classification"]),
    (&["gradient"], &["optimization"]),
    (&["cnn", "conv", "neural"], &["deep-learning", "neural-networks"]),
    (&["svm"], &["svm", "supervised-learning"]),
    (&["decision", "tree"], &["decision-trees", "supervised-learning"]),
    (&["ensemble", "random", "forest"], &["ensemble-methods", "supervised-learning"]),
    (&["bias", "variance"], &["model-evaluation", "bias-variance"]),
    (&["pca"], &["dimensionality-reduction", "unsupervised-learning"]),
    (&["kmeans", "cluster"], &["clustering", "unsupervised-learning"]),
    (&["visualization", "plot", "chart"], &["visualization"]),
    (&["numpy", "pandas", "sklearn"], &["python-libraries"]),
];

/// Infers title, description, and tags from a notebook filename stem.
#[must_use]
pub fn infer_from_stem(stem: &str) -> (String, String, Vec<String>) {
    let title = title_case(stem);
    let lower = stem.to_lowercase();

    let mut tags: Vec<String> = Vec::new();
    for (keywords, rule_tags) in TAG_RULES {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            for tag in *rule_tags {
                if !tags.iter().any(|t| t == tag) {
                    tags.push((*tag).to_string());
                }
            }
        }
    }
    if tags.is_empty() {
        tags = vec!["machine-learning".to_string(), "tutorial".to_string()];
    }

    let description = format!(
        "Interactive tutorial on {} with practical implementations and visualizations",
        title.to_lowercase()
    );
    (title, description, tags)
}

fn title_case(stem: &str) -> String {
    stem.replace(['-', '_'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Today as `YYYY-MM-DD`.
#[must_use]
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
