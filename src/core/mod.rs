mod config;
pub mod db;

pub use config::{AppConfig, DEFAULT_GOOGLE_AUTH_URL, DEFAULT_GOOGLE_TOKEN_URL};
