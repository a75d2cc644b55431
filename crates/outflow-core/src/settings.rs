//! Dashboard settings
//!
//! Read once at startup and handed to the dashboard client. Variables:
//!
//! - `USER_BEHAVIOR_URL`: base URL of the expense API (e.g. `http://127.0.0.1:8000`)
//! - `DAILY_EXPENSES`, `WEEKLY_EXPENSES`, `MONTHLY_EXPENSES`, `CATEGORY_EXPENSES`:
//!   path suffix of each expense endpoint
//!
//! A `.env` file in the working directory is loaded first if present.

use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Granularity;

pub const BASE_URL_VAR: &str = "USER_BEHAVIOR_URL";
pub const DAILY_VAR: &str = "DAILY_EXPENSES";
pub const WEEKLY_VAR: &str = "WEEKLY_EXPENSES";
pub const MONTHLY_VAR: &str = "MONTHLY_EXPENSES";
pub const CATEGORY_VAR: &str = "CATEGORY_EXPENSES";

/// Where the dashboard finds each expense endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    pub base_url: String,
    pub daily_path: String,
    pub weekly_path: String,
    pub monthly_path: String,
    pub category_path: String,
}

impl DashboardSettings {
    /// Load `.env` (if any) and read settings from the process environment
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => return Err(Error::Config(format!("invalid .env file: {}", e))),
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| Error::Config(format!("{} is not set", name)))
        };

        Ok(Self {
            base_url: require(BASE_URL_VAR)?,
            daily_path: require(DAILY_VAR)?,
            weekly_path: require(WEEKLY_VAR)?,
            monthly_path: require(MONTHLY_VAR)?,
            category_path: require(CATEGORY_VAR)?,
        })
    }

    /// Settings for a server using the default route names
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            daily_path: "daily_expenses".into(),
            weekly_path: "weekly_expenses".into(),
            monthly_path: "monthly_expenses".into(),
            category_path: "category_expenses".into(),
        }
    }

    pub fn path_for(&self, granularity: Granularity) -> &str {
        match granularity {
            Granularity::Day => &self.daily_path,
            Granularity::Week => &self.weekly_path,
            Granularity::Month => &self.monthly_path,
            Granularity::Category => &self.category_path,
        }
    }

    /// Full endpoint URL, joining base and suffix with exactly one slash
    pub fn endpoint_url(&self, granularity: Granularity) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.path_for(granularity).trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_from_lookup() {
        let env = vars(&[
            (BASE_URL_VAR, "http://localhost:8000/"),
            (DAILY_VAR, "/daily_expenses"),
            (WEEKLY_VAR, "weekly_expenses"),
            (MONTHLY_VAR, "monthly_expenses"),
            (CATEGORY_VAR, "category_expenses"),
        ]);

        let settings = DashboardSettings::from_lookup(|k| env.get(k).cloned()).unwrap();
        assert_eq!(
            settings.endpoint_url(Granularity::Day),
            "http://localhost:8000/daily_expenses"
        );
        assert_eq!(
            settings.endpoint_url(Granularity::Category),
            "http://localhost:8000/category_expenses"
        );
    }

    #[test]
    fn test_missing_variable() {
        let env = vars(&[(BASE_URL_VAR, "http://localhost:8000"), (DAILY_VAR, "d")]);
        match DashboardSettings::from_lookup(|k| env.get(k).cloned()) {
            Err(Error::Config(msg)) => assert!(msg.contains(WEEKLY_VAR)),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_variable_is_missing() {
        let env = vars(&[
            (BASE_URL_VAR, "  "),
            (DAILY_VAR, "d"),
            (WEEKLY_VAR, "w"),
            (MONTHLY_VAR, "m"),
            (CATEGORY_VAR, "c"),
        ]);
        assert!(DashboardSettings::from_lookup(|k| env.get(k).cloned()).is_err());
    }

    #[test]
    fn test_with_base_url() {
        let settings = DashboardSettings::with_base_url("http://127.0.0.1:3000");
        assert_eq!(
            settings.endpoint_url(Granularity::Month),
            "http://127.0.0.1:3000/monthly_expenses"
        );
    }
}
