//! Tests for the recipe service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::IngredientAmountInput;
use crate::domain::ports::{
    MockCatalogueRepository, MockRecipeRepository, RecipeRepositoryError,
};
use crate::domain::test_fixtures::{ingredient, recipe, tag, user, views_with_users};

#[fixture]
fn input() -> RecipeInput {
    RecipeInput {
        name: "Pancakes".to_owned(),
        text: "Mix and fry.".to_owned(),
        cooking_time: 15,
        image: Some("data:image/png;base64,iVBORw0KGgo=".to_owned()),
        tags: vec![1],
        ingredients: vec![IngredientAmountInput { id: 10, amount: 200 }],
    }
}

fn complete_catalogue() -> MockCatalogueRepository {
    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_find_tags()
        .returning(|_| Ok(vec![tag(1, "breakfast")]));
    catalogue
        .expect_find_ingredients()
        .returning(|_| Ok(vec![ingredient(10, "flour", "g")]));
    catalogue
}

#[rstest]
#[tokio::test]
async fn create_stores_recipe_and_returns_author_view(input: RecipeInput) {
    let author = user("chef");
    let author_id = author.id().clone();
    let stored = recipe(7, &author_id);

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_create()
        .times(1)
        .return_once(|_, _| Ok(RecipeId::new(7)));
    recipes
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(complete_catalogue()),
        views_with_users(vec![author.clone()]),
    );
    let view = service.create(&author_id, input).await.expect("created");

    assert_eq!(view.recipe.id, RecipeId::new(7));
    assert_eq!(view.author, author);
    assert!(!view.is_favorited);
    assert!(!view.is_in_shopping_cart);
    assert!(!view.author_subscribed);
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_payload_before_storage(mut input: RecipeInput) {
    input.ingredients[0].amount = 0;

    let mut recipes = MockRecipeRepository::new();
    recipes.expect_create().times(0);
    let mut catalogue = MockCatalogueRepository::new();
    catalogue.expect_find_tags().times(0);

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(catalogue),
        views_with_users(Vec::new()),
    );
    let error = service
        .create(&UserId::random(), input)
        .await
        .expect_err("invalid amount");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details");
    assert_eq!(details["field"], "ingredients");
    assert_eq!(details["code"], "out_of_range");
    assert_eq!(details["index"], 0);
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_tags(mut input: RecipeInput) {
    input.tags = vec![1, 99];

    let mut recipes = MockRecipeRepository::new();
    recipes.expect_create().times(0);

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(complete_catalogue()),
        views_with_users(Vec::new()),
    );
    let error = service
        .create(&UserId::random(), input)
        .await
        .expect_err("unknown tag");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), "One or more tags do not exist.");
    let details = error.details().expect("details");
    assert_eq!(details["field"], "tags");
    assert_eq!(details["value"], serde_json::json!([99]));
}

#[rstest]
#[tokio::test]
async fn create_rejects_unknown_ingredients(mut input: RecipeInput) {
    input.ingredients.push(IngredientAmountInput { id: 42, amount: 1 });

    let service = RecipeService::new(
        Arc::new(MockRecipeRepository::new()),
        Arc::new(complete_catalogue()),
        views_with_users(Vec::new()),
    );
    let error = service
        .create(&UserId::random(), input)
        .await
        .expect_err("unknown ingredient");

    assert_eq!(error.message(), "One or more ingredients do not exist.");
    assert_eq!(
        error.details().expect("details")["field"],
        "ingredients"
    );
}

#[rstest]
#[tokio::test]
async fn create_maps_connection_error_to_service_unavailable(input: RecipeInput) {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_create()
        .return_once(|_, _| Err(RecipeRepositoryError::connection("pool unavailable")));

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(complete_catalogue()),
        views_with_users(Vec::new()),
    );
    let error = service
        .create(&UserId::random(), input)
        .await
        .expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn update_of_missing_recipe_is_not_found_even_when_payload_is_invalid(
    mut input: RecipeInput,
) {
    input.tags.clear();
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().return_once(|_| Ok(None));
    recipes.expect_replace().times(0);

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(MockCatalogueRepository::new()),
        views_with_users(Vec::new()),
    );
    let error = service
        .update(&UserId::random(), RecipeId::new(3), input)
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_by_non_author_is_forbidden_before_validation(mut input: RecipeInput) {
    input.name.clear();
    let author = UserId::random();
    let stored = recipe(3, &author);
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    recipes.expect_replace().times(0);

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(MockCatalogueRepository::new()),
        views_with_users(Vec::new()),
    );
    let error = service
        .update(&UserId::random(), RecipeId::new(3), input)
        .await
        .expect_err("forbidden");

    assert_eq!(error.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_by_author_replaces_recipe(input: RecipeInput) {
    let author = user("chef");
    let author_id = author.id().clone();
    let before = recipe(3, &author_id);
    let mut after = recipe(3, &author_id);
    after.name = "Pancakes".to_owned();

    let mut recipes = MockRecipeRepository::new();
    let mut sequence = mockall::Sequence::new();
    recipes
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| Ok(Some(before)));
    recipes
        .expect_replace()
        .times(1)
        .in_sequence(&mut sequence)
        .withf(|id, draft| *id == RecipeId::new(3) && draft.name() == "Pancakes")
        .return_once(|_, _| Ok(true));
    recipes
        .expect_find_by_id()
        .times(1)
        .in_sequence(&mut sequence)
        .return_once(move |_| Ok(Some(after)));

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(complete_catalogue()),
        views_with_users(vec![author]),
    );
    let view = service
        .update(&author_id, RecipeId::new(3), input)
        .await
        .expect("updated");

    assert_eq!(view.recipe.name, "Pancakes");
}

#[rstest]
#[case::missing(None, ErrorCode::NotFound)]
#[case::foreign(Some(false), ErrorCode::Forbidden)]
#[tokio::test]
async fn delete_enforces_existence_then_authorship(
    #[case] owned_by_actor: Option<bool>,
    #[case] expected: ErrorCode,
) {
    let actor = UserId::random();
    let stored = owned_by_actor.map(|owned| {
        let author = if owned { actor.clone() } else { UserId::random() };
        recipe(5, &author)
    });
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(stored));
    recipes.expect_delete().times(0);

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(MockCatalogueRepository::new()),
        views_with_users(Vec::new()),
    );
    let error = service
        .delete(&actor, RecipeId::new(5))
        .await
        .expect_err("rejected");

    assert_eq!(error.code(), expected);
}

#[tokio::test]
async fn delete_by_author_removes_recipe() {
    let actor = UserId::random();
    let stored = recipe(5, &actor);
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    recipes
        .expect_delete()
        .times(1)
        .withf(|id| *id == RecipeId::new(5))
        .return_once(|_| Ok(true));

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(MockCatalogueRepository::new()),
        views_with_users(Vec::new()),
    );
    service
        .delete(&actor, RecipeId::new(5))
        .await
        .expect("deleted");
}

#[tokio::test]
async fn get_returns_not_found_for_unknown_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().return_once(|_| Ok(None));

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(MockCatalogueRepository::new()),
        views_with_users(Vec::new()),
    );
    let error = service
        .get(None, RecipeId::new(404))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Recipe not found.");
}

#[tokio::test]
async fn list_decorates_every_recipe_in_order() {
    let first = user("first");
    let second = user("second");
    let page_items = vec![recipe(2, second.id()), recipe(1, first.id())];

    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_list()
        .withf(|filter, _| filter.tags == vec!["breakfast".to_owned()])
        .return_once(move |_, request| {
            Ok(Page {
                items: page_items,
                total: 9,
                request,
            })
        });

    let service = RecipeService::new(
        Arc::new(recipes),
        Arc::new(MockCatalogueRepository::new()),
        views_with_users(vec![first.clone(), second.clone()]),
    );
    let filter = RecipeFilter {
        tags: vec!["breakfast".to_owned()],
        ..RecipeFilter::default()
    };
    let page = service
        .list(None, filter, PageRequest::default())
        .await
        .expect("listed");

    assert_eq!(page.total, 9);
    let authors: Vec<_> = page.items.iter().map(|view| view.author.clone()).collect();
    assert_eq!(authors, vec![second, first]);
}
