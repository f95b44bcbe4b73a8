//! Database provisioning and row seeding for the Diesel adapter suites.
//!
//! Databases are recreated with the `postgres` client because `DROP
//! DATABASE` cannot run inside the transaction Diesel would open. Schema comes
//! from the crate's embedded migrations, which also insert the development
//! user that every seeded recipe is authored by.

use cookbook::domain::UserId;
use cookbook::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Development user inserted by the initial migration.
pub const ADMIN_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

pub fn admin() -> UserId {
    UserId::new(ADMIN_ID).expect("migration user id")
}

/// Render a `postgres` error with its SQLSTATE and detail.
///
/// `Display` collapses server errors to `db error`, which hides the cause in
/// CI logs.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };
    let mut summary = format!("postgres error {:?}: {}", db_error.code(), db_error.message());
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    summary
}

/// Recreate `name` on `cluster`, migrate it and return its URL.
pub fn fresh_database(
    runtime: &Runtime,
    cluster: &TestCluster,
    name: &str,
) -> Result<String, String> {
    let admin_url = cluster.connection().database_url("postgres");
    let mut client =
        Client::connect(&admin_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("DROP DATABASE IF EXISTS \"{name}\" WITH (FORCE)"))
        .map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = cluster.connection().database_url(name);
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| err.to_string())?;
    Ok(url)
}

/// Small pool sized for one test at a time.
pub fn test_pool(runtime: &Runtime, url: &str) -> Result<DbPool, String> {
    let config = PoolConfig::new(url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())
}

/// Direct SQL access for arranging rows the adapters only read.
pub struct Seeder {
    client: Client,
}

impl Seeder {
    pub fn connect(url: &str) -> Result<Self, String> {
        let client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
        Ok(Self { client })
    }

    /// Insert a catalogue ingredient and return its id.
    pub fn ingredient(&mut self, name: &str, unit: &str) -> Result<i64, String> {
        let row = self
            .client
            .query_one(
                "INSERT INTO ingredients (name, measurement_unit) VALUES ($1, $2) RETURNING id",
                &[&name, &unit],
            )
            .map_err(|err| format_postgres_error(&err))?;
        Ok(row.get(0))
    }

    /// Insert a recipe by the development user with `(ingredient, amount)`
    /// lines and return its id.
    pub fn recipe(&mut self, name: &str, lines: &[(i64, i32)]) -> Result<i64, String> {
        let author = Uuid::parse_str(ADMIN_ID).map_err(|err| err.to_string())?;
        let text = format!("How to make {name}.");
        let cooking_time: i32 = 10;
        let row = self
            .client
            .query_one(
                "INSERT INTO recipes (author_id, name, text, image, cooking_time) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
                &[&author, &name, &text, &IMAGE, &cooking_time],
            )
            .map_err(|err| format_postgres_error(&err))?;
        let id: i64 = row.get(0);
        for (ingredient, amount) in lines {
            self.client
                .execute(
                    "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, amount) \
                     VALUES ($1, $2, $3)",
                    &[&id, ingredient, amount],
                )
                .map_err(|err| format_postgres_error(&err))?;
        }
        Ok(id)
    }
}
