//! File-name slugs for detail pages.
//!
//! Every detail page is named after its row's title:
//! - `"Quicksort"` → `quicksort`
//! - `"  Dijkstra's Shortest Path "` → `dijkstra-s-shortest-path`
//! - `"A* / IDA*"` → `a-ida`
//! - `"???"` → `untitled`
//!
//! [`slugify`] alone does not guarantee uniqueness: two rows titled
//! "Quicksort" produce the same slug. [`SlugAllocator`] handles that by
//! numbering repeats in row order (`quicksort`, `quicksort-2`, ...).
//!
//! Slugs are capped at [`MAX_SLUG_LEN`] bytes so that a long title plus a
//! `-n` suffix and `.html` still fits in a file name.

use std::collections::{HashMap, HashSet};

/// Token used when a title has no `[a-z0-9]` characters at all.
pub const FALLBACK_SLUG: &str = "untitled";

/// Longest slug [`slugify`] returns, in bytes.
pub const MAX_SLUG_LEN: usize = 80;

/// Derive a lowercase, hyphen-delimited, filesystem- and URL-safe token.
///
/// Every maximal run of characters outside `[a-z0-9]` (after lowercasing)
/// collapses to a single `-`, and leading/trailing hyphens are dropped.
/// Non-ASCII letters count as "outside", so `"Café"` becomes `caf`.
/// Output stops at [`MAX_SLUG_LEN`] bytes, never on a hyphen.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_SLUG_LEN));
    let mut pending_dash = false;
    for c in title.trim().chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            let dash = pending_dash && !slug.is_empty();
            if slug.len() + usize::from(dash) + 1 > MAX_SLUG_LEN {
                break;
            }
            if dash {
                slug.push('-');
            }
            slug.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Hands out collision-free file-name stems for one run.
///
/// The first request for a base slug gets it unsuffixed; the n-th request
/// gets `base-n`. A suffixed candidate that was already handed out (say a
/// literal "Sort 2" row earlier in the file) is skipped by bumping the
/// counter further.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    counts: HashMap<String, usize>,
    issued: HashSet<String>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base: &str) -> String {
        let count = self.counts.entry(base.to_string()).or_insert(0);
        loop {
            *count += 1;
            let candidate = if *count == 1 {
                base.to_string()
            } else {
                format!("{base}-{count}")
            };
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}
