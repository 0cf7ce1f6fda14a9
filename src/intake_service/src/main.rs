use color_eyre::eyre::Result;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use intake_adapters::{Argon2Hasher, PostgresStore, Settings};
use intake_application::{ProvisionOutcome, ProvisionUserUseCase};
use intake_axum::{AppState, router};
use intake_core::{CredentialHasher, UserStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    let settings = Settings::load()?;

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.database_url.expose_secret())
        .await?;

    sqlx::migrate!().run(&pg_pool).await?;

    let store = PostgresStore::new(pg_pool);
    let hasher = Argon2Hasher::default();

    if settings.seed_demo_users {
        seed_demo_users(&store, &hasher).await?;
    }

    let state = AppState {
        users: store.clone(),
        contacts: store,
        hasher,
        sessions: intake_adapters::SessionManager::new(settings.session_config()),
        csrf: settings.csrf_protect(),
    };

    let listener = tokio::net::TcpListener::bind(&settings.address).await?;
    tracing::info!("Intake service listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// Provision the development demo accounts. Safe to run on every startup;
/// accounts that already exist are left untouched.
async fn seed_demo_users<U, H>(store: &U, hasher: &H) -> Result<(), Box<dyn std::error::Error>>
where
    U: UserStore,
    H: CredentialHasher,
{
    let demo_accounts = [("Ahmed", "ahmed123"), ("Umer", "umer123")];

    for (username, password) in demo_accounts {
        let outcome = ProvisionUserUseCase::new(store, hasher)
            .execute(username, Secret::from(password.to_owned()))
            .await?;

        match outcome {
            ProvisionOutcome::Created(user) => {
                tracing::info!(username = %user.username, "seeded demo account")
            }
            ProvisionOutcome::AlreadyExists => {
                tracing::debug!(username, "demo account already present")
            }
        }
    }

    Ok(())
}
