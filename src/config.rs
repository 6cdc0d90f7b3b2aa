#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
}

impl Config {
    pub fn init() -> Config {
        // Default is a local file-backed sqlite store, so the service runs
        // without any environment set up.
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://telemed.db".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8222);

        Config { database_url, port }
    }
}
