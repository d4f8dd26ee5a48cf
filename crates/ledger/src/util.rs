//! Internal helpers for name normalization.
//!
//! These utilities are **not** part of the public API. Uniqueness of
//! wallet and category names is enforced against the normalized key,
//! so "Groceries" and "  gróceries " collide.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Collapse runs of whitespace and trim, preserving the user's casing.
///
/// Returns `None` when nothing printable remains.
pub(crate) fn normalize_display(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut out = String::new();
    for token in trimmed.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Reduce a display name to its uniqueness key: NFKD, strip combining
/// marks, lowercase alphanumerics, collapse everything else to single
/// spaces.
pub(crate) fn normalize_key(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut out = String::new();
    let mut prev_space = false;
    for ch in trimmed.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        None
    } else {
        Some(normalized.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_collapses_whitespace() {
        assert_eq!(
            normalize_display("  Rent   &  Bills ").as_deref(),
            Some("Rent & Bills")
        );
        assert_eq!(normalize_display("   "), None);
    }

    #[test]
    fn key_folds_case_and_accents() {
        assert_eq!(normalize_key("Gróceries").as_deref(), Some("groceries"));
        assert_eq!(
            normalize_key("  Rent & Bills ").as_deref(),
            Some("rent bills")
        );
        assert_eq!(normalize_key("Groceries").as_deref(), Some("groceries"));
    }

    #[test]
    fn key_rejects_symbol_only_names() {
        assert_eq!(normalize_key("!!!"), None);
    }
}
