use std::env;

use crate::domain::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageDefaults};

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub page_defaults: PageDefaults,
    pub seed_demo: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://member_search.db?mode=rwc".to_string());

        let default_size = parse_var("DEFAULT_PAGE_SIZE")
            .filter(|s| *s >= 1)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        let max_size = parse_var("MAX_PAGE_SIZE")
            .filter(|s| *s >= 1)
            .unwrap_or(MAX_PAGE_SIZE)
            .max(default_size);

        Self {
            database_url,
            port: parse_var("PORT").unwrap_or(8080),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .ok()
                .map(|s| {
                    s.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(Vec::new),
            page_defaults: PageDefaults {
                default_size,
                max_size,
            },
            seed_demo: env::var("SEED_DEMO").is_ok(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
