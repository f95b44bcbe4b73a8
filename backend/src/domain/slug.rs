//! Slug validation predicate for tags.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, hyphens and underscores.

/// Maximum slug length accepted by storage.
pub const SLUG_MAX: usize = 50;

/// Return `true` when `value` is a valid tag slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && value.len() <= SLUG_MAX && has_allowed_slug_chars(value)
}

fn has_allowed_slug_chars(value: &str) -> bool {
    value
        .chars()
        .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-' || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("breakfast", true)]
    #[case("low-carb_2", true)]
    #[case("", false)]
    #[case(" breakfast", false)]
    #[case("Breakfast", false)]
    #[case("lunch!", false)]
    fn validates_slug_shape(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }

    #[rstest]
    fn rejects_overlong_slugs() {
        assert!(!is_valid_slug(&"a".repeat(SLUG_MAX + 1)));
    }
}
