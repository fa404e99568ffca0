//! URL slug generation.

use rand::Rng;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Number of digits in the random suffix.
const SUFFIX_DIGITS: usize = 6;

/// Generate a slug for `name`: lower-case ASCII words joined by single
/// hyphens, followed by a random six-digit tag, e.g. `sao-paulo-042137`.
///
/// The tag makes collisions unlikely, not impossible. Uniqueness is
/// enforced by the store and `GenericRepository::create_slugged` retries.
pub fn make_slug(name: &str) -> String {
    let suffix = rand::thread_rng().gen_range(0..1_000_000u32);
    let base = slug_base(name);
    if base.is_empty() {
        format!("{suffix:0width$}", width = SUFFIX_DIGITS)
    } else {
        format!("{base}-{suffix:0width$}", width = SUFFIX_DIGITS)
    }
}

/// The deterministic part of a slug: diacritics stripped, lower-cased,
/// runs of anything else collapsed to one hyphen, no leading or trailing
/// hyphen.
pub fn slug_base(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !out.is_empty() {
                out.push('-');
            }
            pending_hyphen = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `^[a-z0-9]+(-[a-z0-9]+)*-\d{6}$`
    fn is_well_formed(slug: &str) -> bool {
        let Some((base, tag)) = slug.rsplit_once('-') else {
            return false;
        };
        tag.len() == SUFFIX_DIGITS
            && tag.chars().all(|c| c.is_ascii_digit())
            && !base.is_empty()
            && base.split('-').all(|word| {
                !word.is_empty()
                    && word
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            })
    }

    #[test]
    fn test_slug_base() {
        assert_eq!(slug_base("São Paulo!!"), "sao-paulo");
        assert_eq!(slug_base("  --Ação  & Reação-- "), "acao-reacao");
        assert_eq!(slug_base("Módulo 3: Introdução"), "modulo-3-introducao");
        assert_eq!(slug_base("!!!"), "");
    }

    #[test]
    fn test_make_slug_structure() {
        for name in ["São Paulo!!", "Über   Café", "a", "Course #101 (2024)", "ÀÉÎÕÜ ç"] {
            let slug = make_slug(name);
            assert!(is_well_formed(&slug), "malformed slug {slug}");
            assert!(!slug.contains("--"));
        }
    }

    #[test]
    fn test_make_slug_without_alphanumerics_is_just_the_tag() {
        let slug = make_slug("¿?");
        assert_eq!(slug.len(), SUFFIX_DIGITS);
        assert!(slug.chars().all(|c| c.is_ascii_digit()));
    }
}
