pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Number of records returned by a history listing.
pub const RECENT_LIMIT: i64 = 50;

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub database_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into()).filter(|u: &String| !u.is_empty());
        self
    }

    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var(DATABASE_URL_VAR)
                .ok()
                .filter(|u| !u.is_empty()),
        }
    }
}
