//! Shared validation helpers for inbound HTTP adapters.
//!
//! Scalar query parameters arrive through `web::Query` structs with string
//! fields and are validated here, so every failure becomes an
//! `invalid_request` error whose details name the offending field.

use actix_web::web;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, PageRequest, PageRequestError, UserId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidInteger,
    InvalidFlag,
    OutOfRange,
    MalformedBody,
    MalformedQuery,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidInteger => "invalid_integer",
            ErrorCode::InvalidFlag => "invalid_flag",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::MalformedBody => "malformed_body",
            ErrorCode::MalformedQuery => "malformed_query",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) const PAGE: FieldName = FieldName::new("page");
pub(crate) const LIMIT: FieldName = FieldName::new("limit");
pub(crate) const RECIPES_LIMIT: FieldName = FieldName::new("recipes_limit");

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field_name = field.as_str();
    ValidationError::new(field, format!("{field_name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

/// Parse a user id from a path or query segment.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    parse_uuid(value, field).map(UserId::from_uuid)
}

/// Parse a positive integer parameter.
pub(crate) fn parse_positive_u32(value: &str, field: FieldName) -> Result<u32, Error> {
    let field_name = field.as_str();
    let parsed: u32 = value.trim().parse().map_err(|_| {
        ValidationError::new(field, format!("{field_name} must be a positive integer"))
            .with_value(ErrorCode::InvalidInteger, value)
    })?;
    if parsed == 0 {
        return Err(
            ValidationError::new(field, format!("{field_name} must be at least 1"))
                .with_value(ErrorCode::OutOfRange, value),
        );
    }
    Ok(parsed)
}

/// Parse a boolean filter flag: `1`/`true` or `0`/`false`.
pub(crate) fn parse_flag(value: &str, field: FieldName) -> Result<bool, Error> {
    match value.trim() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        _ => {
            let field_name = field.as_str();
            Err(
                ValidationError::new(field, format!("{field_name} must be 0 or 1"))
                    .with_value(ErrorCode::InvalidFlag, value),
            )
        }
    }
}

/// Validate `page`/`limit`, reporting which one was out of range.
pub(crate) fn page_request(page: Option<u32>, limit: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::new(page, limit).map_err(|err| {
        let field = match err {
            PageRequestError::PageOutOfRange => PAGE,
            PageRequestError::LimitOutOfRange { .. } => LIMIT,
        };
        ValidationError::new(field, err.to_string()).with_code(ErrorCode::OutOfRange)
    })
}

/// Parse an optional positive integer parameter.
pub(crate) fn parse_optional_u32(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<u32>, Error> {
    value.map(|raw| parse_positive_u32(raw, field)).transpose()
}

/// Decode `key=value` pairs from a raw query string.
///
/// Only the recipe list needs this: `serde_urlencoded` rejects the repeated
/// `tags` key that `web::Query` would have to deserialize.
pub(crate) fn query_pairs(query: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// JSON extractor configuration that reports malformed bodies as
/// `invalid_request` instead of Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("Malformed JSON body: {err}"))
            .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
            .into()
    })
}

/// Query extractor configuration that reports undecodable query strings
/// (for example a duplicated scalar key) as `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        Error::invalid_request(format!("Malformed query string: {err}"))
            .with_details(json!({ "code": ErrorCode::MalformedQuery.as_str() }))
            .into()
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    fn details(err: &Error) -> &Value {
        err.details().expect("details present")
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case(" 12 ", Some(12))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("many", None)]
    fn positive_integers(#[case] raw: &str, #[case] expected: Option<u32>) {
        assert_eq!(parse_positive_u32(raw, LIMIT).ok(), expected);
    }

    #[rstest]
    #[case("1", true)]
    #[case("true", true)]
    #[case("0", false)]
    #[case("false", false)]
    fn flags(#[case] raw: &str, #[case] expected: bool) {
        assert_eq!(
            parse_flag(raw, FieldName::new("is_favorited")).expect("valid flag"),
            expected
        );
    }

    #[rstest]
    fn bad_flag_names_the_field() {
        let err = parse_flag("yes", FieldName::new("is_in_shopping_cart")).expect_err("invalid");
        assert_eq!(details(&err)["field"], "is_in_shopping_cart");
        assert_eq!(details(&err)["code"], "invalid_flag");
    }

    #[rstest]
    fn oversized_limit_points_at_limit() {
        let err = page_request(Some(1), Some(500)).expect_err("limit too large");
        assert_eq!(details(&err)["field"], "limit");
    }

    #[rstest]
    fn repeated_keys_are_preserved() {
        let pairs = query_pairs("tags=breakfast&tags=lunch&page=2");
        let tags: Vec<&str> = pairs
            .iter()
            .filter(|(key, _)| key == "tags")
            .map(|(_, value)| value.as_str())
            .collect();
        assert_eq!(tags, ["breakfast", "lunch"]);
    }

    #[rstest]
    #[case(None, Some(None))]
    #[case(Some("3"), Some(Some(3)))]
    #[case(Some("0"), None)]
    fn optional_integers(#[case] raw: Option<&str>, #[case] expected: Option<Option<u32>>) {
        assert_eq!(parse_optional_u32(raw, RECIPES_LIMIT).ok(), expected);
    }

    #[rstest]
    fn invalid_user_ids_are_rejected() {
        let err = parse_user_id("not-a-uuid", FieldName::new("author")).expect_err("bad uuid");
        assert_eq!(details(&err)["code"], "invalid_uuid");
        assert_eq!(details(&err)["value"], "not-a-uuid");
    }
}
