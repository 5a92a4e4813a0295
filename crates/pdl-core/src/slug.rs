//! Slug codec for deep-link path segments.
//!
//! The transform is lossy and one-way: distinct names may collapse to the
//! same slug, and a received slug is only ever used as an opaque matching
//! token against re-encoded candidate names. It is never parsed back into
//! structured data and must not be treated as an authoritative identifier.

use crate::types::ids::ProgramId;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Segment used when a company has no usable display name.
pub const UNKNOWN_COMPANY_SEGMENT: &str = "company";

/// Normalize a display name into a URL-safe path segment.
///
/// Exact steps, kept bit-compatible with deployed links: lowercase,
/// NFD-decompose and drop combining marks, drop everything outside
/// `[a-z0-9\s-]`, collapse whitespace runs into a single hyphen, collapse
/// hyphen runs, trim leading/trailing separators.
///
/// Total and deterministic; empty or all-punctuation input yields `""`.
/// Idempotent on already-valid slugs.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;
    for ch in lowered.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_whitespace() || ch == '-' {
            // Separators only materialize between kept characters, which
            // trims the ends and collapses runs in one pass.
            pending_sep = !out.is_empty();
        } else if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep {
                out.push('-');
                pending_sep = false;
            }
            out.push(ch);
        }
        // Anything else is dropped without acting as a separator, matching
        // the deployed strip-then-hyphenate order ("Foo&Bar" -> "foobar").
    }
    out
}

/// Path segment for a program: the slugified name, or `program-{id}` when
/// no name is available or the name slugifies to nothing.
pub fn program_segment(name: Option<&str>, id: ProgramId) -> String {
    match name.map(slugify) {
        Some(slug) if !slug.is_empty() => slug,
        _ => format!("program-{id}"),
    }
}

/// Path segment for a company: the slugified name, or the literal
/// `company` when unknown.
pub fn company_segment(name: Option<&str>) -> String {
    match name.map(slugify) {
        Some(slug) if !slug.is_empty() => slug,
        _ => UNKNOWN_COMPANY_SEGMENT.to_string(),
    }
}

/// Detail route for a company + program pair.
pub fn detail_path(company_name: Option<&str>, program_name: Option<&str>, id: ProgramId) -> String {
    format!(
        "/company/{}/program/{}",
        company_segment(company_name),
        program_segment(program_name, id)
    )
}

/// Best-effort resolution of a received slug: re-encode each candidate name
/// and return the first match. Callers resolve by cached numeric ID first
/// and fall back to this, then to the listing page.
pub fn match_by_slug<'a, T>(
    slug: &str,
    candidates: &'a [T],
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    candidates.iter().find(|c| slugify(name_of(c)) == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Fabrica de Lideres"), "fabrica-de-lideres");
    }

    #[test]
    fn strips_accents() {
        assert_eq!(slugify("São Paulo"), "sao-paulo");
        assert_eq!(slugify("Liderança Ágil"), "lideranca-agil");
    }

    #[test]
    fn collapses_punctuation_and_whitespace() {
        assert_eq!(slugify("Foo  &  Bar!!"), "foo-bar");
        assert_eq!(slugify("Foo & Bar"), "foo-bar");
    }

    #[test]
    fn punctuation_without_whitespace_joins_words() {
        assert_eq!(slugify("Foo&Bar"), "foobar");
    }

    #[test]
    fn collapses_hyphen_runs_and_trims() {
        assert_eq!(slugify("--a--b--"), "a-b");
        assert_eq!(slugify("  edge  "), "edge");
    }

    #[test]
    fn empty_and_punctuation_only_yield_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!???"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn deterministic_and_idempotent() {
        let name = "Programa de Liderança 2024";
        let once = slugify(name);
        assert_eq!(once, slugify(name));
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn program_segment_falls_back_to_id() {
        let id = ProgramId::new(42);
        assert_eq!(program_segment(Some("Turma Alfa"), id), "turma-alfa");
        assert_eq!(program_segment(None, id), "program-42");
        assert_eq!(program_segment(Some("!!!"), id), "program-42");
    }

    #[test]
    fn company_segment_falls_back_to_literal() {
        assert_eq!(company_segment(Some("IC2 Evolutiva")), "ic2-evolutiva");
        assert_eq!(company_segment(None), "company");
        assert_eq!(company_segment(Some("   ")), "company");
    }

    #[test]
    fn detail_path_combines_segments() {
        assert_eq!(
            detail_path(Some("IC2 Evolutiva"), Some("Turma Alfa"), ProgramId::new(7)),
            "/company/ic2-evolutiva/program/turma-alfa"
        );
        assert_eq!(
            detail_path(None, None, ProgramId::new(7)),
            "/company/company/program/program-7"
        );
    }

    #[test]
    fn match_by_slug_reencodes_candidates() {
        let names = vec!["Turma Alfa".to_string(), "São Paulo 2024".to_string()];
        let hit = match_by_slug("sao-paulo-2024", &names, String::as_str);
        assert_eq!(hit.map(String::as_str), Some("São Paulo 2024"));
        assert!(match_by_slug("nope", &names, String::as_str).is_none());
    }

    #[test]
    fn slug_is_not_injective() {
        assert_eq!(slugify("Foo & Bar"), slugify("Foo Bar"));
    }
}
