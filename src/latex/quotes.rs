// src/latex/quotes.rs
//! Straight-quote normalization: `"text"` becomes ```` ``text'' ````.
//!
//! Quotes inside verbatim environments, inline code, and math must never
//! be rewritten, so those regions are located first and any quote match
//! overlapping them is left alone.

use regex::Regex;
use std::sync::LazyLock;

static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap_or_else(|_| unreachable!()));

/// Regions that must not be touched. The regex crate has no
/// backreferences, so each environment is spelled out.
static PROTECTED: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?s)\\begin\{verbatim\}.*?\\end\{verbatim\}",
        r"(?s)\\begin\{Verbatim\}.*?\\end\{Verbatim\}",
        r"(?s)\\begin\{lstlisting\}.*?\\end\{lstlisting\}",
        r"\\verb\|[^|]*\|",
        r"\\lstinline\{[^}]*\}",
        r"\\texttt\{[^}]*\}",
        r"\$[^$]*\$",
        r"(?s)\\\[.*?\\\]",
        r"(?s)\\begin\{equation\*?\}.*?\\end\{equation\*?\}",
        r"(?s)\\begin\{align\*?\}.*?\\end\{align\*?\}",
        r"(?s)\\begin\{gather\*?\}.*?\\end\{gather\*?\}",
        r"(?s)\\begin\{multline\*?\}.*?\\end\{multline\*?\}",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap_or_else(|_| unreachable!()))
    .collect()
});

fn protected_ranges(content: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    for re in PROTECTED.iter() {
        for m in re.find_iter(content) {
            ranges.push((m.start(), m.end()));
        }
    }
    ranges.sort_unstable();
    ranges
}

/// Rewrites straight double quotes outside protected regions.
#[must_use]
pub fn fix_quotes(content: &str) -> String {
    let ranges = protected_ranges(content);
    let mut out = String::with_capacity(content.len());
    let mut last = 0;

    for cap in QUOTE.captures_iter(content) {
        let Some(m) = cap.get(0) else { continue };
        let overlaps = ranges
            .iter()
            .any(|&(start, end)| m.start() < end && start < m.end());
        if overlaps {
            continue;
        }
        out.push_str(&content[last..m.start()]);
        out.push_str("``");
        out.push_str(&cap[1]);
        out.push_str("''");
        last = m.end();
    }
    out.push_str(&content[last..]);
    out
}
