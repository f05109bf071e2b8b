// src/latex/structure.rs
//! Structural slide repair: quiz-box migration, pause thinning, and
//! whitespace squeezing. Every transform is an independent substitution
//! applied in a fixed order, and the whole pass is a fixpoint on its own
//! output.

use crate::config::Config;
use regex::{Captures, Regex};
use std::path::PathBuf;
use std::sync::LazyLock;
use walkdir::WalkDir;

macro_rules! re {
    ($pattern:expr) => {
        LazyLock::new(|| Regex::new($pattern).unwrap_or_else(|_| unreachable!()))
    };
}

// The popquiz counter now lives in the beamer theme; local definitions
// fight with it.
static NEWCOUNTER: LazyLock<Regex> = re!(r"\\newcounter\{popquiz\}");
static SETCOUNTER: LazyLock<Regex> = re!(r"\\setcounter\{popquiz\}\{\d+\}");
static QUIZ_FRAME_TITLE: LazyLock<Regex> =
    re!(r"\\begin\{frame\}\{Pop Quiz \\stepcounter\{popquiz\}\\?#\\thepopquiz\}");

static QUIZ_BOX_WITH_COUNTER: LazyLock<Regex> = re!(
    r"(?s)\\stepcounter\{popquiz\}\s*\\begin\{tcolorbox\}\[colback=blue!5!white,colframe=blue!75!black,title=Quick Question.*?\](.*?)\\end\{tcolorbox\}"
);
static QUIZ_BOX: LazyLock<Regex> = re!(
    r"(?s)\\begin\{tcolorbox\}\[colback=blue!5!white,colframe=blue!75!black,title=Quick Question.*?\](.*?)\\end\{tcolorbox\}"
);

static PAUSE_RUN: LazyLock<Regex> = re!(r"(\\pause\s*){3,}");
static PAUSE_BEFORE_FRAME_END: LazyLock<Regex> = re!(r"(?:\\pause\s*)+\\end\{frame\}");
static PAUSE_AFTER_FRAME_BEGIN: LazyLock<Regex> =
    re!(r"(\\begin\{frame\}(?:\{[^}]*\})?(?:\[[^\]]*\])?)\s*(?:\\pause\s*)+");
static PAUSE_BEFORE_SECTION: LazyLock<Regex> = re!(r"(?:\\pause\s*)+\\section");

static ITEMIZE: LazyLock<Regex> = re!(r"(?s)\\begin\{itemize\}(.*?)\\end\{itemize\}");
static ITEM_SPLIT: LazyLock<Regex> = re!(r"\\item\s+");

static BLANK_RUN: LazyLock<Regex> = re!(r"\n\s*\n\s*\n+");
static NEWLINE_RUN: LazyLock<Regex> = re!(r"\n{4,}");

/// Applies the whole repair pass to one slide source.
#[must_use]
pub fn fix_slides(content: &str) -> String {
    let mut content = NEWCOUNTER.replace_all(content, "").into_owned();
    content = SETCOUNTER.replace_all(&content, "").into_owned();
    content = QUIZ_FRAME_TITLE
        .replace_all(&content, r"\begin{frame}{Quick Quiz}")
        .into_owned();

    content = QUIZ_BOX_WITH_COUNTER
        .replace_all(&content, "\\begin{popquizbox}{}\n$1\n\\end{popquizbox}")
        .into_owned();
    content = QUIZ_BOX
        .replace_all(&content, "\\begin{popquizbox}{}\n$1\n\\end{popquizbox}")
        .into_owned();

    content = PAUSE_RUN
        .replace_all(&content, "\\pause\n\\pause\n")
        .into_owned();
    content = PAUSE_BEFORE_FRAME_END
        .replace_all(&content, r"\end{frame}")
        .into_owned();
    content = PAUSE_AFTER_FRAME_BEGIN.replace_all(&content, "$1\n").into_owned();
    content = PAUSE_BEFORE_SECTION
        .replace_all(&content, r"\section")
        .into_owned();

    content = ITEMIZE
        .replace_all(&content, |caps: &Captures<'_>| respace_items(&caps[1]))
        .into_owned();

    content = BLANK_RUN.replace_all(&content, "\n\n").into_owned();
    NEWLINE_RUN.replace_all(&content, "\n\n").into_owned()
}

/// Re-emits an itemize body with a `\pause` before every third item and
/// before emphasized items. A pause is only inserted when the preceding
/// item does not already end with one, which keeps the pass idempotent.
fn respace_items(body: &str) -> String {
    let pieces: Vec<&str> = ITEM_SPLIT.split(body).collect();
    if pieces.len() <= 1 {
        return format!("\\begin{{itemize}}{body}\\end{{itemize}}");
    }

    let mut out = String::from("\\begin{itemize}");
    out.push_str(pieces[0]);
    for (index, item) in pieces[1..].iter().enumerate() {
        let position = index + 1;
        let wants_pause = position > 1 && (position % 3 == 0 || item.contains("\\textbf{"));
        let previous_pauses = pieces[index].trim_end().ends_with("\\pause");
        if wants_pause && !previous_pauses {
            out.push_str("\\pause\n");
        }
        out.push_str("\\item ");
        out.push_str(item);
    }
    out.push_str("\\end{itemize}");
    out
}

/// Leftover files in slide directories worth cleaning up by hand:
/// sibling backups and LaTeX build auxiliaries. Reported, never deleted.
#[must_use]
pub fn residue(config: &Config) -> (Vec<PathBuf>, Vec<PathBuf>) {
    const AUX_EXT: &[&str] = &["aux", "log", "nav", "out", "snm", "toc", "fls", "fdb_latexmk"];

    let mut backups = Vec::new();
    let mut auxiliaries = Vec::new();
    let walker = WalkDir::new(&config.root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            !(e.file_type().is_dir() && config.should_prune(&e.file_name().to_string_lossy()))
        });

    for entry in walker.filter_map(std::result::Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let in_slides = path
            .components()
            .any(|c| c.as_os_str().to_string_lossy() == "slides");
        if !in_slides {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".backup") || name.ends_with(".backup-colab") {
            backups.push(path.to_path_buf());
        } else if path
            .extension()
            .is_some_and(|e| AUX_EXT.contains(&e.to_string_lossy().as_ref()))
        {
            auxiliaries.push(path.to_path_buf());
        }
    }
    (backups, auxiliaries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_runs_collapse_to_two() {
        let src = "a\n\\pause \\pause \\pause \\pause b";
        let out = fix_slides(src);
        assert_eq!(out.matches("\\pause").count(), 2);
    }

    #[test]
    fn pause_against_frame_end_is_dropped() {
        let out = fix_slides("text\n\\pause\n\\end{frame}\n");
        assert!(!out.contains("\\pause"));
        assert!(out.contains("\\end{frame}"));
    }

    #[test]
    fn counter_definitions_are_removed() {
        let out = fix_slides("\\newcounter{popquiz}\n\\setcounter{popquiz}{3}\nrest");
        assert!(!out.contains("popquiz}"));
        assert!(out.contains("rest"));
    }

    #[test]
    fn quiz_box_migrates_to_popquizbox() {
        let src = "\\begin{tcolorbox}[colback=blue!5!white,colframe=blue!75!black,title=Quick Question 1]\nWhat is entropy?\n\\end{tcolorbox}";
        let out = fix_slides(src);
        assert!(out.contains("\\begin{popquizbox}{}"));
        assert!(out.contains("What is entropy?"));
        assert!(out.contains("\\end{popquizbox}"));
        assert!(!out.contains("tcolorbox"));
    }

    #[test]
    fn pause_run_after_frame_header_clears_in_one_pass() {
        let src = "\\begin{frame}{T}\n\\pause\n\\pause\ntext\n\\end{frame}\n";
        let once = fix_slides(src);
        assert!(!once.contains("\\pause"), "got {once:?}");
        assert_eq!(once, fix_slides(&once));
    }

    #[test]
    fn fix_is_idempotent() {
        let src = "\\begin{frame}{T}\n\\pause\n\\begin{itemize}\n\\item a\n\\item b\n\\item \\textbf{c}\n\\end{itemize}\n\\pause\\pause\\pause\n\\end{frame}\n";
        let once = fix_slides(src);
        let twice = fix_slides(&once);
        assert_eq!(once, twice);
    }
}
