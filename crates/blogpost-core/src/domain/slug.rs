//! Slug derivation and per-site deduplication.

use std::collections::HashSet;

/// Turn a title into a URL-safe slug.
///
/// Lower-cases the title, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen and trims hyphens from both ends.
/// A title with no ASCII alphanumerics yields an empty string.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// The slug a create request asks for, before deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugCandidate {
    /// Supplied by the caller; stored as-is, never suffixed.
    Explicit(String),
    /// Derived from the title; suffixed on collision.
    Derived(String),
}

impl SlugCandidate {
    /// Pick the candidate for a create request.
    ///
    /// A caller slug that is empty or whitespace-only counts as absent.
    pub fn for_post(title: &str, explicit: Option<&str>) -> Self {
        match explicit {
            Some(slug) if !slug.trim().is_empty() => Self::Explicit(slug.to_string()),
            _ => Self::Derived(slugify(title)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Explicit(slug) | Self::Derived(slug) => slug,
        }
    }

    /// Whether the store must be consulted for colliding slugs.
    pub fn needs_dedup(&self) -> bool {
        matches!(self, Self::Derived(_))
    }

    /// Resolve against the slugs already taken under the same target site.
    ///
    /// `taken` only needs the slugs starting with the candidate; anything
    /// else cannot collide with the candidate or its suffixed forms.
    pub fn resolve<S: AsRef<str>>(self, taken: &[S]) -> String {
        match self {
            Self::Explicit(slug) => slug,
            Self::Derived(base) => {
                let taken: HashSet<&str> = taken.iter().map(AsRef::as_ref).collect();
                first_free(&base, &taken)
            }
        }
    }
}

/// First of `base`, `base-2`, `base-3`, ... not present in `taken`.
fn first_free(base: &str, taken: &HashSet<&str>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }

    (2u64..)
        .map(|suffix| format!("{base}-{suffix}"))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}
