//! Seeds the role catalog and a handful of sample users.
//!
//! Usage: `cargo run --bin seed` (DATABASE_URL optional, defaults to the
//! local sqlite file).

use dotenv::dotenv;
use telemed_backend::{
    config::Config,
    db::{self, DBClient, RoleExt, UserExt},
    models::NewUser,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match db::connect_pool(&config.database_url, 5).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!("Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    if let Err(err) = db_client.seed_roles().await {
        tracing::error!("Failed to seed roles: {}", err);
        std::process::exit(1);
    }
    tracing::info!("Role catalog seeded");

    let users = vec![
        sample_user("michael_brown", "michael.brown@example.com", "pass1234", "администратор"),
        sample_user("sarah_wilson", "sarah.wilson@example.com", "mysecurepwd", "администратор"),
        sample_user("david_clark", "david.clark@example.com", "davidsafe123", "администратор"),
        sample_user("emma_walker", "emma.walker@example.com", "walker987", "администратор"),
        sample_user("james_martin", "james.martin@example.com", "martinpass001", "пользователь"),
    ];

    match db_client.save_users(&users).await {
        Ok(ids) => tracing::info!(?ids, "Sample users created"),
        Err(err) => {
            tracing::error!("Failed to create sample users: {}", err);
            std::process::exit(1);
        }
    }
}

fn sample_user(username: &str, email: &str, password: &str, role: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    }
}
