use anyhow::{Result, bail};

pub const DEFAULT_LOG_FILTER: &str = "overflow=warn";

const LOG_VAR: &str = "OVERFLOW_LOG";
const CLEAR_SCREEN_VAR: &str = "OVERFLOW_CLEAR_SCREEN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tracing filter directives. `None` defers to `RUST_LOG`, then
    /// [`DEFAULT_LOG_FILTER`].
    pub log_filter: Option<String>,
    /// Clear the screen before every menu.
    pub clear_screen: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_filter = lookup(LOG_VAR).filter(|value| !value.trim().is_empty());
        let clear_screen = match lookup(CLEAR_SCREEN_VAR) {
            Some(value) => parse_bool(CLEAR_SCREEN_VAR, &value)?,
            None => true,
        };

        Ok(Self {
            log_filter,
            clear_screen,
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", key, other),
    }
}
