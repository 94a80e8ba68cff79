//! Canonical form for free-text names.

use longbox_core::constants::LEADING_ARTICLES;

/// Canonicalizes names for comparison: lowercase, punctuation mapped to
/// word boundaries (hyphens kept), whitespace collapsed, and optionally
/// leading articles stripped.
///
/// Normalization is pure and idempotent: `normalize(normalize(s)) ==
/// normalize(s)` for every input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    strip_leading_articles: bool,
}

impl Normalizer {
    pub fn new(strip_leading_articles: bool) -> Self {
        Self {
            strip_leading_articles,
        }
    }

    pub fn normalize(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len());
        let mut pending_space = false;

        for c in name.trim().chars() {
            if c.is_alphanumeric() || c == '-' {
                if pending_space && !out.is_empty() {
                    out.push(' ');
                }
                pending_space = false;
                // char-wise lowercasing, not locale collation, so the result
                // is stable across environments.
                for lc in c.to_lowercase() {
                    out.push(lc);
                }
            } else {
                // Whitespace and punctuation both collapse to one boundary.
                pending_space = true;
            }
        }

        if self.strip_leading_articles {
            strip_articles(&mut out);
        }
        out
    }
}

/// Drop leading articles until a fixed point, so repeated normalization is
/// stable ("The A-Team" strips both "the" and "a"). A lone article is kept:
/// a name never normalizes to the empty string this way.
fn strip_articles(name: &mut String) {
    loop {
        let Some((first, rest)) = name.split_once(' ') else {
            return;
        };
        if LEADING_ARTICLES.contains(&first) {
            *name = rest.to_string();
        } else {
            return;
        }
    }
}
