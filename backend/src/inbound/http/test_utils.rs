//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web};

use crate::domain::ports::{
    FixtureCatalogueRepository, FixtureFavoriteRepository, FixtureLoginService,
    FixtureRecipeRepository, FixtureShoppingListRepository, FixtureShortLinkRepository,
    FixtureSubscriptionRepository, FixtureUserRepository,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts, Repositories};
use crate::inbound::http::auth::LoginRequest;

/// Base URL used by handler tests.
pub const TEST_BASE_URL: &str = "http://cookbook.test";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Ports wired over empty fixture repositories.
pub fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts::from_repositories(Repositories {
        login: Arc::new(FixtureLoginService),
        users: Arc::new(FixtureUserRepository),
        catalogue: Arc::new(FixtureCatalogueRepository),
        recipes: Arc::new(FixtureRecipeRepository),
        favorites: Arc::new(FixtureFavoriteRepository),
        shopping_lists: Arc::new(FixtureShoppingListRepository),
        subscriptions: Arc::new(FixtureSubscriptionRepository),
        short_links: Arc::new(FixtureShortLinkRepository),
    })
}

/// Wrap `ports` as handler state.
pub fn state_with(ports: HttpStatePorts) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(ports, TEST_BASE_URL))
}

/// Log in with the fixture credentials and return the session cookie.
///
/// The app under test must mount the login handler at `/api/auth/login`.
pub async fn login_cookie<S>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(LoginRequest {
                username: "admin".into(),
                password: "password".into(),
            })
            .to_request(),
    )
    .await;
    assert!(response.status().is_success(), "fixture login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
