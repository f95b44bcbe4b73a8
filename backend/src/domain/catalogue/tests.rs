//! Unit tests for catalogue domain type construction.

use rstest::rstest;

use super::*;

#[rstest]
fn tag_rejects_invalid_slug() {
    let result = Tag::new(TagDraft {
        id: TagId::new(1),
        name: "Breakfast".to_owned(),
        slug: "Break Fast".to_owned(),
    });

    assert_eq!(
        result,
        Err(CatalogueValidationError::InvalidSlug { field: "tag.slug" })
    );
}

#[rstest]
fn tag_trims_name() {
    let tag = Tag::new(TagDraft {
        id: TagId::new(3),
        name: "  Lunch ".to_owned(),
        slug: "lunch".to_owned(),
    })
    .expect("valid tag");

    assert_eq!(tag.name(), "Lunch");
    assert_eq!(tag.slug(), "lunch");
    assert_eq!(tag.id().get(), 3);
}

#[rstest]
#[case("flour,g", Some(("flour", "g")))]
#[case("  salt , pinch ", Some(("salt", "pinch")))]
#[case("cheese, hard, grated,g", Some(("cheese, hard, grated", "g")))]
#[case("   ", None)]
#[case("", None)]
fn parse_line_splits_on_last_comma(#[case] line: &str, #[case] expected: Option<(&str, &str)>) {
    let parsed = IngredientDraft::parse_line(line).expect("line parses");
    let observed = parsed
        .as_ref()
        .map(|draft| (draft.name(), draft.measurement_unit()));
    assert_eq!(observed, expected);
}

#[rstest]
fn parse_line_requires_separator() {
    let err = IngredientDraft::parse_line("no separator").expect_err("missing comma");
    assert!(matches!(err, CatalogueValidationError::MissingSeparator { .. }));
}

#[rstest]
#[case(",g", "ingredient.name")]
#[case("flour, ", "ingredient.measurement_unit")]
fn parse_line_rejects_empty_parts(#[case] line: &str, #[case] field: &'static str) {
    let err = IngredientDraft::parse_line(line).expect_err("blank part");
    assert_eq!(err, CatalogueValidationError::EmptyField { field });
}

#[rstest]
fn ingredient_rejects_overlong_names() {
    let name = "x".repeat(NAME_MAX + 1);
    let err = Ingredient::new(IngredientId::new(1), &name, "g").expect_err("too long");
    assert_eq!(
        err,
        CatalogueValidationError::TooLong {
            field: "ingredient.name",
            max: NAME_MAX
        }
    );
}
