//! Load ingredients from a `name,unit` file into the catalogue.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use clap::Parser;
use cookbook::domain::IngredientDraft;
use cookbook::domain::ports::{CatalogueRepository, IngredientUpsert};
use cookbook::outbound::persistence::{DbPool, DieselCatalogueRepository, PoolConfig};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const DATABASE_URL_ENV: &str = "COOKBOOK_DATABASE_URL";

/// `load-ingredients` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "load-ingredients",
    about = "Get-or-create catalogue ingredients from a name,unit file",
    version
)]
struct CliArgs {
    /// File with one `name,unit` pair per line.
    #[arg(value_name = "file")]
    file: PathBuf,
    /// Database connection URL. Falls back to `COOKBOOK_DATABASE_URL`.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
}

/// Counts reported once the file has been processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct LoadSummary {
    created: usize,
    existing: usize,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let contents = read_file(&args.file)?;
    let drafts = parse_drafts(&contents)?;

    let database_url = resolve_database_url(args.database_url)?;
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;
    let repository = DieselCatalogueRepository::new(pool);

    let summary = load(&repository, &drafts).await?;
    info!(
        created = summary.created,
        existing = summary.existing,
        file = %args.file.display(),
        "ingredients loaded"
    );
    println!("created={}", summary.created);
    println!("existing={}", summary.existing);
    Ok(())
}

/// Parse every non-blank line, reporting the first malformed one by number.
fn parse_drafts(contents: &str) -> io::Result<Vec<IngredientDraft>> {
    let mut drafts = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        match IngredientDraft::parse_line(line) {
            Ok(Some(draft)) => drafts.push(draft),
            Ok(None) => {}
            Err(error) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {}: {error}", index + 1),
                ));
            }
        }
    }
    Ok(drafts)
}

async fn load<R>(repository: &R, drafts: &[IngredientDraft]) -> io::Result<LoadSummary>
where
    R: CatalogueRepository + ?Sized,
{
    let mut summary = LoadSummary::default();
    for draft in drafts {
        let outcome = repository
            .get_or_create_ingredient(draft)
            .await
            .map_err(|error| {
                io::Error::other(format!("store ingredient '{}': {error}", draft.name()))
            })?;
        match outcome {
            IngredientUpsert::Created(_) => summary.created += 1,
            IngredientUpsert::Existing(_) => summary.existing += 1,
        }
    }
    Ok(summary)
}

fn read_file(path: &Path) -> io::Result<String> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "input path must be a file"))?;
    let directory = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|error| {
        io::Error::other(format!(
            "open input parent directory '{}': {error}",
            parent.display()
        ))
    })?;
    let mut file = directory.open(Path::new(file_name)).map_err(|error| {
        io::Error::other(format!("open input file '{}': {error}", path.display()))
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|error| {
        io::Error::other(format!("read input file '{}': {error}", path.display()))
    })?;
    Ok(contents)
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var(DATABASE_URL_ENV).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or COOKBOOK_DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "COOKBOOK_DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
