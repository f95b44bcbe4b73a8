//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`;
//! each pulls this module in with `mod support;`.

#![allow(dead_code)]

pub mod in_memory;

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use cookbook::Trace;
use cookbook::domain::ports::{FIXTURE_USER_ID, FixtureLoginService};
use cookbook::domain::{User, UserId, UserParts};
use cookbook::inbound::http::routes;
use cookbook::inbound::http::short_links::resolve_short_link;
use cookbook::inbound::http::state::{HttpState, HttpStatePorts, Repositories};
use serde_json::json;
use uuid::Uuid;

use in_memory::InMemoryCookbook;

pub const BASE_URL: &str = "https://cookbook.test";

/// Build a user with a throwaway email.
pub fn user(id: Uuid, username: &str) -> User {
    let email = format!("{username}@cookbook.test");
    User::try_from_parts(UserParts {
        id,
        email: &email,
        username,
        first_name: "Test",
        last_name: "Cook",
        avatar: None,
    })
    .expect("valid user")
}

/// Identity returned by the development login.
pub fn admin_id() -> UserId {
    UserId::new(FIXTURE_USER_ID).expect("fixture id")
}

/// Store seeded with the development login's user.
pub fn seeded_store() -> InMemoryCookbook {
    let store = InMemoryCookbook::default();
    store.add_user(user(*admin_id().as_uuid(), "admin"));
    store
}

/// Full application over `store`, wired the way the server wires it.
pub fn app(
    store: &InMemoryCookbook,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let repo = Arc::new(store.clone());
    let ports = HttpStatePorts::from_repositories(Repositories {
        login: Arc::new(FixtureLoginService),
        users: repo.clone(),
        catalogue: repo.clone(),
        recipes: repo.clone(),
        favorites: repo.clone(),
        shopping_lists: repo.clone(),
        subscriptions: repo.clone(),
        short_links: repo,
    });
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(HttpState::new(ports, BASE_URL)))
        .wrap(Trace)
        .service(web::scope("/api").wrap(session).configure(routes::api))
        .service(resolve_short_link)
}

/// Log in as the development user and return the session cookie.
pub async fn login<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({"username": "admin", "password": "password"}))
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "development login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
