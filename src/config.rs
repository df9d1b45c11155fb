use crate::errors::ConfigError;
use std::env;

pub const DEFAULT_SUPABASE_URL: &str = "https://ffsjivkbrrjxcykczzoz.supabase.co";

#[derive(Debug, Clone)]
pub struct Config {
    pub supabase_url: String,
    pub anon_key: String,
}

impl Config {
    /// Project URL falls back to the bundled default; the anon key must come
    /// from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let supabase_url =
            env::var("SUPABASE_URL").unwrap_or_else(|_| DEFAULT_SUPABASE_URL.to_string());
        let anon_key = env::var("SUPABASE_ANON_KEY").map_err(|_| ConfigError::MissingAnonKey)?;
        Ok(Self {
            supabase_url,
            anon_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_is_a_supabase_project() {
        assert!(DEFAULT_SUPABASE_URL.starts_with("https://"));
        assert!(DEFAULT_SUPABASE_URL.ends_with(".supabase.co"));
    }
}
