// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Normalizes a term name into a URL-safe slug stem.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single hyphen, and trims leading/trailing hyphens. A name with no
/// alphanumeric characters falls back to the literal `term` stem so the
/// unique slug key is never empty. Uniqueness disambiguation (`-2`, `-3`, …)
/// happens where slugs can be read consistently, inside the term-creation
/// transaction.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        slug.push_str("term");
    }
    slug
}
