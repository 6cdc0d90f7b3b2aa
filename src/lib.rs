pub mod config;
pub mod db;
pub mod dtos;
pub mod error;
pub mod handler;
pub mod models;
pub mod routes;

use config::Config;
use db::DBClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub env: Arc<Config>,
    pub db_client: DBClient,
}
