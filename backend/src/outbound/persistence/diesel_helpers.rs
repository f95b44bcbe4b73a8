//! Shared helpers for Diesel repository implementations.
//!
//! Each repository wraps these in its own `map_pool_error` and
//! `map_diesel_error` functions so the port error type stays local.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Extract a readable message from a pool error.
pub fn map_pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Extract a readable message from a Diesel error and emit debug context.
pub fn map_diesel_error_message(error: DieselError, operation: &str) -> String {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(%error, %operation, "diesel operation failed"),
    }
    error.to_string()
}

/// Whether `error` reports a lost connection rather than a failed query.
pub fn is_connection_error(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
    )
}

/// Whether `error` is a unique constraint violation.
pub fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Collect row conversion results, mapping the first error through `map_err`.
pub fn collect_rows<T, E>(
    results: impl Iterator<Item = Result<T, String>>,
    map_err: impl FnOnce(String) -> E,
) -> Result<Vec<T>, E> {
    results.collect::<Result<Vec<_>, _>>().map_err(map_err)
}

/// Convert a row count reported by `COUNT(*)`.
pub fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or_default()
}

/// `LIKE` pattern matching values that start with `prefix` literally.
pub fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("sug", "sug%")]
    #[case("50%", "50\\%%")]
    #[case("a_b", "a\\_b%")]
    #[case("", "%")]
    fn like_prefix_pattern_escapes_wildcards(#[case] prefix: &str, #[case] expected: &str) {
        assert_eq!(like_prefix_pattern(prefix), expected);
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        assert_eq!(
            map_pool_error_message(PoolError::checkout("timed out")),
            "timed out"
        );
    }

    #[rstest]
    fn not_found_is_neither_connection_nor_unique_violation() {
        assert!(!is_connection_error(&DieselError::NotFound));
        assert!(!is_unique_violation(&DieselError::NotFound));
    }

    #[rstest]
    fn negative_counts_clamp_to_zero() {
        assert_eq!(count_to_u64(-1), 0);
        assert_eq!(count_to_u64(12), 12);
    }
}
