//! File name derivation for exported pages.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::options::UNTITLED;

fn reserved_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap())
}

fn whitespace_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Derive a filesystem-safe file stem from a page title.
///
/// Reserved characters are stripped, accented letters are folded to their
/// ASCII base (`á` → `a`, `ñ` → `n`), the result is lower-cased and runs of
/// whitespace become single hyphens. Distinct titles may map to the same
/// stem; the exporter does not disambiguate them.
///
/// # Example
///
/// ```
/// use unnotion::render::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Módulo Uno"), "modulo-uno");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let stripped = reserved_chars().replace_all(title, "");
    let folded: String = stripped
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let stem = whitespace_runs()
        .replace_all(folded.trim(), "-")
        .into_owned();

    if stem.is_empty() {
        UNTITLED.to_string()
    } else {
        stem
    }
}

/// Derive the `<stem>.md` file name for a page title.
pub fn markdown_filename(title: &str) -> String {
    format!("{}.md", sanitize_filename(title))
}
