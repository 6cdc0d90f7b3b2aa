use sqlx::{
    Pool, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use std::str::FromStr;

mod role;
pub use role::RoleExt;

mod user;
pub use user::UserExt;

mod hospital;
pub use hospital::HospitalExt;

mod patient;
pub use patient::PatientExt;

#[derive(Debug, Clone)]
pub struct DBClient {
    pool: Pool<Sqlite>,
}

impl DBClient {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        DBClient { pool }
    }
}

/// Open a connection pool and bring the schema up to date.
///
/// Foreign key enforcement is off by default in sqlite and the cascade
/// declarations depend on it, so it is switched on per connection here.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<Pool<Sqlite>, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
