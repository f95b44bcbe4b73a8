//! In-process implementation of every driven port.
//!
//! One [`InMemoryCookbook`] value backs all repositories so cascades (recipe
//! deletion clearing favorites, cart entries and links) behave like the
//! database schema.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use cookbook::domain::ports::{
    AuthorRecipes, CatalogueRepository, CatalogueRepositoryError, FavoriteRepository,
    FavoriteRepositoryError, IngredientUpsert, RecipeRepository, RecipeRepositoryError,
    ShoppingListRepository, ShoppingListRepositoryError, ShortLinkRepository,
    ShortLinkRepositoryError, ShortLinkSubject, SubscriptionRepository,
    SubscriptionRepositoryError, UserPersistenceError, UserRepository,
};
use cookbook::domain::{
    Amount, CartLine, ImageData, Ingredient, IngredientDraft, IngredientId, MembershipAdd,
    MembershipRemoval, Page, PageRequest, Recipe, RecipeDraft, RecipeFilter, RecipeId,
    RecipeIngredient, RecipeSummary, ShortLinkClaim, ShortLinkToken, Tag, TagDraft, TagId, User,
    UserId,
};
use uuid::Uuid;

#[derive(Default)]
struct State {
    users: Vec<User>,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
    recipes: BTreeMap<i64, Recipe>,
    next_recipe_id: i64,
    favorites: BTreeSet<(Uuid, i64)>,
    lists: BTreeSet<Uuid>,
    cart: BTreeSet<(Uuid, i64)>,
    subscriptions: BTreeSet<(Uuid, Uuid)>,
    links: HashMap<i64, ShortLinkToken>,
}

impl State {
    fn build_recipe(&self, id: RecipeId, author: UserId, draft: &RecipeDraft) -> Recipe {
        let tags = draft
            .tags()
            .iter()
            .filter_map(|tag_id| self.tags.iter().find(|tag| tag.id() == *tag_id).cloned())
            .collect();
        let ingredients = draft
            .ingredients()
            .iter()
            .filter_map(|line| {
                self.ingredients
                    .iter()
                    .find(|ingredient| ingredient.id() == line.ingredient)
                    .map(|ingredient| RecipeIngredient {
                        ingredient: ingredient.clone(),
                        amount: line.amount,
                    })
            })
            .collect();
        Recipe {
            id,
            author,
            name: draft.name().to_owned(),
            text: draft.text().to_owned(),
            image: draft.image().as_str().to_owned(),
            cooking_time: draft.cooking_time(),
            tags,
            ingredients,
        }
    }

    fn matches(&self, recipe: &Recipe, filter: &RecipeFilter) -> bool {
        let id = recipe.id.get();
        let author_ok = filter
            .author
            .as_ref()
            .is_none_or(|author| *author == recipe.author);
        let tags_ok = filter.tags.is_empty()
            || recipe
                .tags
                .iter()
                .any(|tag| filter.tags.iter().any(|slug| slug == tag.slug()));
        let favorite_ok = filter
            .favorited_by
            .as_ref()
            .is_none_or(|user| self.favorites.contains(&(*user.as_uuid(), id)));
        let cart_ok = filter
            .in_cart_of
            .as_ref()
            .is_none_or(|user| self.cart.contains(&(*user.as_uuid(), id)));
        author_ok && tags_ok && favorite_ok && cart_ok
    }
}

fn paginate<T: Clone>(items: &[T], request: PageRequest) -> Page<T> {
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
    Page {
        items: items.iter().skip(offset).take(limit).cloned().collect(),
        total: items.len() as u64,
        request,
    }
}

/// Shared in-memory cookbook.
#[derive(Clone, Default)]
pub struct InMemoryCookbook {
    state: Arc<Mutex<State>>,
}

impl InMemoryCookbook {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("in-memory state poisoned")
    }

    pub fn add_user(&self, user: User) {
        self.lock().users.push(user);
    }

    pub fn add_tag(&self, id: i64, name: &str, slug: &str) -> Tag {
        let tag = Tag::new(TagDraft {
            id: TagId::new(id),
            name: name.to_owned(),
            slug: slug.to_owned(),
        })
        .expect("valid tag");
        self.lock().tags.push(tag.clone());
        tag
    }

    pub fn add_ingredient(&self, name: &str, unit: &str) -> Ingredient {
        let mut state = self.lock();
        let id = IngredientId::new(state.ingredients.len() as i64 + 1);
        let ingredient = Ingredient::new(id, name, unit).expect("valid ingredient");
        state.ingredients.push(ingredient.clone());
        ingredient
    }

    /// Store a recipe directly, bypassing HTTP.
    pub fn add_recipe(&self, author: &UserId, name: &str, lines: &[(&Ingredient, u32)]) -> RecipeId {
        let mut state = self.lock();
        state.next_recipe_id += 1;
        let id = RecipeId::new(state.next_recipe_id);
        let recipe = Recipe {
            id,
            author: author.clone(),
            name: name.to_owned(),
            text: format!("How to make {name}."),
            image: "data:image/png;base64,iVBORw0KGgo=".to_owned(),
            cooking_time: 10,
            tags: Vec::new(),
            ingredients: lines
                .iter()
                .map(|(ingredient, amount)| RecipeIngredient {
                    ingredient: (*ingredient).clone(),
                    amount: Amount::new(*amount).expect("positive amount"),
                })
                .collect(),
        };
        state.recipes.insert(id.get(), recipe);
        id
    }
}

#[async_trait]
impl UserRepository for InMemoryCookbook {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .iter()
            .filter(|user| ids.contains(user.id()))
            .cloned()
            .collect())
    }

    async fn set_avatar(
        &self,
        id: &UserId,
        avatar: Option<ImageData>,
    ) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock();
        let Some(slot) = state.users.iter_mut().find(|user| user.id() == id) else {
            return Ok(false);
        };
        *slot = slot.clone().with_avatar(avatar);
        Ok(true)
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryCookbook {
    async fn list_tags(&self) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        let mut tags = self.lock().tags.clone();
        tags.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(tags)
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, CatalogueRepositoryError> {
        Ok(self.lock().tags.iter().find(|tag| tag.id() == id).cloned())
    }

    async fn find_tags(&self, ids: &[TagId]) -> Result<Vec<Tag>, CatalogueRepositoryError> {
        Ok(self
            .lock()
            .tags
            .iter()
            .filter(|tag| ids.contains(&tag.id()))
            .cloned()
            .collect())
    }

    async fn list_ingredients(
        &self,
        name_prefix: Option<String>,
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        let prefix = name_prefix.map(|prefix| prefix.to_lowercase());
        let mut found: Vec<Ingredient> = self
            .lock()
            .ingredients
            .iter()
            .filter(|ingredient| {
                prefix
                    .as_deref()
                    .is_none_or(|prefix| ingredient.name().to_lowercase().starts_with(prefix))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(found)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, CatalogueRepositoryError> {
        Ok(self
            .lock()
            .ingredients
            .iter()
            .find(|ingredient| ingredient.id() == id)
            .cloned())
    }

    async fn find_ingredients(
        &self,
        ids: &[IngredientId],
    ) -> Result<Vec<Ingredient>, CatalogueRepositoryError> {
        Ok(self
            .lock()
            .ingredients
            .iter()
            .filter(|ingredient| ids.contains(&ingredient.id()))
            .cloned()
            .collect())
    }

    async fn get_or_create_ingredient(
        &self,
        draft: &IngredientDraft,
    ) -> Result<IngredientUpsert, CatalogueRepositoryError> {
        let mut state = self.lock();
        if let Some(existing) = state.ingredients.iter().find(|ingredient| {
            ingredient.name() == draft.name()
                && ingredient.measurement_unit() == draft.measurement_unit()
        }) {
            return Ok(IngredientUpsert::Existing(existing.clone()));
        }
        let id = IngredientId::new(state.ingredients.len() as i64 + 1);
        let created = draft.clone().into_ingredient(id);
        state.ingredients.push(created.clone());
        Ok(IngredientUpsert::Created(created))
    }
}

#[async_trait]
impl RecipeRepository for InMemoryCookbook {
    async fn create(
        &self,
        author: &UserId,
        draft: &RecipeDraft,
    ) -> Result<RecipeId, RecipeRepositoryError> {
        let mut state = self.lock();
        state.next_recipe_id += 1;
        let id = RecipeId::new(state.next_recipe_id);
        let recipe = state.build_recipe(id, author.clone(), draft);
        state.recipes.insert(id.get(), recipe);
        Ok(id)
    }

    async fn replace(
        &self,
        id: RecipeId,
        draft: &RecipeDraft,
    ) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock();
        let Some(author) = state.recipes.get(&id.get()).map(|recipe| recipe.author.clone()) else {
            return Ok(false);
        };
        let recipe = state.build_recipe(id, author, draft);
        state.recipes.insert(id.get(), recipe);
        Ok(true)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, RecipeRepositoryError> {
        let mut state = self.lock();
        let key = id.get();
        if state.recipes.remove(&key).is_none() {
            return Ok(false);
        }
        state.favorites.retain(|(_, recipe)| *recipe != key);
        state.cart.retain(|(_, recipe)| *recipe != key);
        state.links.remove(&key);
        Ok(true)
    }

    async fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(self.lock().recipes.get(&id.get()).cloned())
    }

    async fn find_summary(
        &self,
        id: RecipeId,
    ) -> Result<Option<RecipeSummary>, RecipeRepositoryError> {
        Ok(self.lock().recipes.get(&id.get()).map(Recipe::summary))
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<Page<Recipe>, RecipeRepositoryError> {
        let state = self.lock();
        let matching: Vec<Recipe> = state
            .recipes
            .values()
            .rev()
            .filter(|recipe| state.matches(recipe, filter))
            .cloned()
            .collect();
        Ok(paginate(&matching, page))
    }

    async fn author_recipes(
        &self,
        author: &UserId,
        limit: Option<u32>,
    ) -> Result<AuthorRecipes, RecipeRepositoryError> {
        let state = self.lock();
        let all: Vec<RecipeSummary> = state
            .recipes
            .values()
            .rev()
            .filter(|recipe| recipe.author == *author)
            .map(Recipe::summary)
            .collect();
        let total = all.len() as u64;
        let take = limit.map_or(all.len(), |limit| limit as usize);
        Ok(AuthorRecipes {
            recipes: all.into_iter().take(take).collect(),
            total,
        })
    }
}

fn toggle_add(set: &mut BTreeSet<(Uuid, i64)>, key: (Uuid, i64)) -> MembershipAdd {
    if set.insert(key) {
        MembershipAdd::Created
    } else {
        MembershipAdd::AlreadyExists
    }
}

fn toggle_remove(set: &mut BTreeSet<(Uuid, i64)>, key: &(Uuid, i64)) -> MembershipRemoval {
    if set.remove(key) {
        MembershipRemoval::Removed
    } else {
        MembershipRemoval::NotFound
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryCookbook {
    async fn add(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipAdd, FavoriteRepositoryError> {
        Ok(toggle_add(
            &mut self.lock().favorites,
            (*user.as_uuid(), recipe.get()),
        ))
    }

    async fn remove(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipRemoval, FavoriteRepositoryError> {
        Ok(toggle_remove(
            &mut self.lock().favorites,
            &(*user.as_uuid(), recipe.get()),
        ))
    }

    async fn favorited_among(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, FavoriteRepositoryError> {
        let state = self.lock();
        Ok(recipes
            .iter()
            .copied()
            .filter(|recipe| state.favorites.contains(&(*user.as_uuid(), recipe.get())))
            .collect())
    }
}

#[async_trait]
impl ShoppingListRepository for InMemoryCookbook {
    async fn ensure_list(&self, user: &UserId) -> Result<(), ShoppingListRepositoryError> {
        self.lock().lists.insert(*user.as_uuid());
        Ok(())
    }

    async fn add(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipAdd, ShoppingListRepositoryError> {
        Ok(toggle_add(
            &mut self.lock().cart,
            (*user.as_uuid(), recipe.get()),
        ))
    }

    async fn remove(
        &self,
        user: &UserId,
        recipe: RecipeId,
    ) -> Result<MembershipRemoval, ShoppingListRepositoryError> {
        Ok(toggle_remove(
            &mut self.lock().cart,
            &(*user.as_uuid(), recipe.get()),
        ))
    }

    async fn in_cart_among(
        &self,
        user: &UserId,
        recipes: &[RecipeId],
    ) -> Result<Vec<RecipeId>, ShoppingListRepositoryError> {
        let state = self.lock();
        Ok(recipes
            .iter()
            .copied()
            .filter(|recipe| state.cart.contains(&(*user.as_uuid(), recipe.get())))
            .collect())
    }

    async fn lines(&self, user: &UserId) -> Result<Vec<CartLine>, ShoppingListRepositoryError> {
        let state = self.lock();
        let owner = *user.as_uuid();
        Ok(state
            .cart
            .iter()
            .filter(|(who, _)| *who == owner)
            .filter_map(|(_, recipe)| state.recipes.get(recipe))
            .flat_map(|recipe| {
                recipe.ingredients.iter().map(|line| CartLine {
                    recipe: recipe.id,
                    ingredient: line.ingredient.clone(),
                    amount: line.amount,
                })
            })
            .collect())
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryCookbook {
    async fn add(
        &self,
        subscriber: &UserId,
        author: &UserId,
    ) -> Result<MembershipAdd, SubscriptionRepositoryError> {
        let inserted = self
            .lock()
            .subscriptions
            .insert((*subscriber.as_uuid(), *author.as_uuid()));
        Ok(if inserted {
            MembershipAdd::Created
        } else {
            MembershipAdd::AlreadyExists
        })
    }

    async fn remove(
        &self,
        subscriber: &UserId,
        author: &UserId,
    ) -> Result<MembershipRemoval, SubscriptionRepositoryError> {
        let removed = self
            .lock()
            .subscriptions
            .remove(&(*subscriber.as_uuid(), *author.as_uuid()));
        Ok(if removed {
            MembershipRemoval::Removed
        } else {
            MembershipRemoval::NotFound
        })
    }

    async fn subscribed_among(
        &self,
        subscriber: &UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, SubscriptionRepositoryError> {
        let state = self.lock();
        Ok(authors
            .iter()
            .filter(|author| {
                state
                    .subscriptions
                    .contains(&(*subscriber.as_uuid(), *author.as_uuid()))
            })
            .cloned()
            .collect())
    }

    async fn list_authors(
        &self,
        subscriber: &UserId,
        page: PageRequest,
    ) -> Result<Page<User>, SubscriptionRepositoryError> {
        let state = self.lock();
        let mut authors: Vec<User> = state
            .users
            .iter()
            .filter(|user| {
                state
                    .subscriptions
                    .contains(&(*subscriber.as_uuid(), *user.id().as_uuid()))
            })
            .cloned()
            .collect();
        authors.sort_by(|a, b| a.username().as_ref().cmp(b.username().as_ref()));
        Ok(paginate(&authors, page))
    }
}

#[async_trait]
impl ShortLinkRepository for InMemoryCookbook {
    async fn find_subject(
        &self,
        recipe: RecipeId,
    ) -> Result<Option<ShortLinkSubject>, ShortLinkRepositoryError> {
        let state = self.lock();
        Ok(state
            .recipes
            .get(&recipe.get())
            .map(|found| ShortLinkSubject {
                name: found.name.clone(),
                token: state.links.get(&recipe.get()).cloned(),
            }))
    }

    async fn claim(
        &self,
        recipe: RecipeId,
        token: &ShortLinkToken,
    ) -> Result<ShortLinkClaim, ShortLinkRepositoryError> {
        let mut state = self.lock();
        if let Some(existing) = state.links.get(&recipe.get()) {
            return Ok(ShortLinkClaim::AlreadyAssigned(existing.clone()));
        }
        if state.links.values().any(|held| held == token) {
            return Ok(ShortLinkClaim::Taken);
        }
        state.links.insert(recipe.get(), token.clone());
        Ok(ShortLinkClaim::Claimed)
    }

    async fn resolve(
        &self,
        token: &ShortLinkToken,
    ) -> Result<Option<RecipeId>, ShortLinkRepositoryError> {
        Ok(self
            .lock()
            .links
            .iter()
            .find(|(_, held)| *held == token)
            .map(|(recipe, _)| RecipeId::new(*recipe)))
    }
}
