use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lectern", version, about = "Maintenance toolkit for teaching-content repositories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Repository root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkFormat {
    Terminal,
    Markdown,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add Quarto front-matter and a Colab badge to notebooks
    Annotate {
        /// Notebook file, or a directory with --batch
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
        #[arg(long)]
        author: Option<String>,
        /// Process every notebook under a directory
        #[arg(long)]
        batch: bool,
        /// Preview changes without modifying files
        #[arg(long)]
        dry_run: bool,
    },
    /// Add Colab badges to notebooks that have front-matter but no badge
    Badge {
        #[arg(long)]
        dry_run: bool,
    },
    /// Report front-matter, badge, or index coverage
    Coverage {
        /// Badge coverage instead of front-matter coverage
        #[arg(long)]
        badges: bool,
        /// Audit notebooks on disk against the site index page
        #[arg(long)]
        index: bool,
    },
    /// Check markdown links in Quarto pages against the filesystem
    Links {
        #[arg(long, value_enum, default_value_t = LinkFormat::Terminal)]
        format: LinkFormat,
        /// Also write a JSON audit report
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },
    /// Validate naming conventions for notebooks and slides
    Naming,
    /// Validate the repository directory layout
    Layout,
    /// Normalize straight quotes to LaTeX quotes in .tex files
    Quotes {
        #[arg(long)]
        dry_run: bool,
    },
    /// Structural slide repair: quiz boxes, pause thinning, whitespace
    Tidy {
        #[arg(long)]
        dry_run: bool,
    },
    /// Verify notebook image references and \includepdf targets
    Assets,
    /// Compile every slide file with pdflatex
    Compile,
    /// Restore the most recent backup snapshot
    Restore,
}
